use serde::{Deserialize, Serialize};
use std::fmt;

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

/// Elapsed service time as reported by the healthcheck endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Uptime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Uptime {
    pub fn new(days: u64, hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Splits a whole number of seconds into days, hours, minutes and seconds.
    pub fn from_secs(total: u64) -> Self {
        let (days, rem) = (total / SECS_PER_DAY, total % SECS_PER_DAY);
        let (hours, rem) = (rem / SECS_PER_HOUR, rem % SECS_PER_HOUR);
        let (minutes, seconds) = (rem / SECS_PER_MINUTE, rem % SECS_PER_MINUTE);
        Self::new(days, hours, minutes, seconds)
    }

    /// The sentence shown under a healthy message. Seconds are not displayed.
    pub fn live_since(&self) -> String {
        format!(
            "Live since {} days, {} hours, {} minutes",
            self.days, self.hours, self.minutes
        )
    }
}

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.live_since())
    }
}

/// Body of a successful healthcheck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthcheckResponse {
    pub message: String,
    pub uptime: Uptime,
}

impl HealthcheckResponse {
    pub fn new(message: impl Into<String>, uptime: Uptime) -> Self {
        Self {
            message: message.into(),
            uptime,
        }
    }
}
