use std::time::Duration;

use rand::Rng;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct JitterRange {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_ms: u64,
}

impl JitterRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        JitterRange { min_ms, max_ms }
    }

    pub const fn zero() -> Self {
        JitterRange::new(0, 0)
    }

    pub fn sample(&self) -> Duration {
        let millis = if self.max_ms <= self.min_ms {
            self.min_ms
        } else {
            rand::thread_rng().gen_range(self.min_ms..=self.max_ms)
        };

        Duration::from_millis(millis)
    }

    pub async fn pause(&self, reason: &str) {
        let delay = self.sample();
        if delay.is_zero() {
            return;
        }

        log::debug!("Waiting {}ms ({})", delay.as_millis(), reason);
        tokio::time::sleep(delay).await;
    }
}
