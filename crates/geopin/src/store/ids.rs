//! Record id generation.

use chrono::Utc;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Generates `poi-{millis}-{suffix}` ids.
///
/// The millisecond part never repeats within one generator: when the clock
/// has not advanced (or went backwards) the previous value plus one is used.
/// The suffix is nine random base-36 characters.
#[derive(Debug)]
pub(crate) struct IdGenerator {
    last_millis: i64,
    rng: fastrand::Rng,
}

impl IdGenerator {
    pub(crate) fn new() -> Self {
        Self {
            last_millis: 0,
            rng: fastrand::Rng::new(),
        }
    }

    pub(crate) fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let millis = if now > self.last_millis {
            now
        } else {
            self.last_millis + 1
        };
        self.last_millis = millis;

        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| char::from(BASE36[self.rng.usize(..BASE36.len())]))
            .collect();

        format!("poi-{}-{}", millis, suffix)
    }
}
