use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Months, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TtlUnit {
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

/// Cache entry lifetime as a single `(unit, magnitude)` pair, configured
/// in YAML as `ttl: { seconds: 500 }`. Exactly one unit may be set at a
/// time; magnitude 0 means entries never expire.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "BTreeMap<TtlUnit, u32>")]
pub struct CacheTtl {
    unit: TtlUnit,
    magnitude: u32,
}

impl CacheTtl {
    pub fn new(unit: TtlUnit, magnitude: u32) -> Self {
        Self { unit, magnitude }
    }

    pub const fn forever() -> Self {
        Self {
            unit: TtlUnit::Seconds,
            magnitude: 0,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.magnitude == 0
    }

    /// Instant after which an entry written at `created_at` is stale.
    /// None means the entry never expires.
    ///
    /// Months and weeks go through calendar arithmetic, not a
    /// fixed-seconds approximation: a month is however long that month is.
    pub fn deadline(&self, created_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.magnitude == 0 {
            return None;
        }
        match self.unit {
            TtlUnit::Months => created_at.checked_add_months(Months::new(self.magnitude)),
            TtlUnit::Weeks => created_at.checked_add_signed(Duration::weeks(self.magnitude as i64)),
            TtlUnit::Days => created_at.checked_add_signed(Duration::days(self.magnitude as i64)),
            TtlUnit::Hours => created_at.checked_add_signed(Duration::hours(self.magnitude as i64)),
            TtlUnit::Minutes => {
                created_at.checked_add_signed(Duration::minutes(self.magnitude as i64))
            }
            TtlUnit::Seconds => {
                created_at.checked_add_signed(Duration::seconds(self.magnitude as i64))
            }
        }
    }

    pub fn expired(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.deadline(created_at)
            .map(|deadline| deadline < now)
            .unwrap_or(false)
    }
}

impl TryFrom<BTreeMap<TtlUnit, u32>> for CacheTtl {
    type Error = String;

    fn try_from(duration: BTreeMap<TtlUnit, u32>) -> Result<Self, Self::Error> {
        if duration.len() > 1 {
            return Err(format!(
                "ttl takes exactly one unit, got {}",
                duration.len()
            ));
        }
        match duration.into_iter().next() {
            Some((unit, magnitude)) => Ok(Self { unit, magnitude }),
            None => Err("ttl takes exactly one unit, got none".to_owned()),
        }
    }
}
