use std::time::SystemTime;

use chrono::{DateTime, Utc};

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub fn from_system_time(time: SystemTime) -> DateTime<Utc> {
    DateTime::from(time)
}
