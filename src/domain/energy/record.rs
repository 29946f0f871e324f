//! Daily consumption records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ConsumptionRecordId, DeviceId, Timestamp, UserId, ValidationError};

/// Energy in kilowatt-hours. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Kwh(f64);

impl Kwh {
    pub const ZERO: Kwh = Kwh(0.0);

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format("kwh", "must be a finite number"));
        }
        if value < 0.0 {
            return Err(ValidationError::invalid_format("kwh", "cannot be negative"));
        }
        Ok(Self(value))
    }

    /// Parses user input such as `"12.5"`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value: f64 = input
            .trim()
            .parse()
            .map_err(|_| ValidationError::invalid_format("kwh", "not a number"))?;
        Self::new(value)
    }

    /// Energy used by a load of `watts` running for `hours`.
    pub fn from_power(watts: u32, hours: f64) -> Result<Self, ValidationError> {
        Self::new(watts as f64 * hours / 1000.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Kwh {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Kwh::new(value)
    }
}

impl From<Kwh> for f64 {
    fn from(kwh: Kwh) -> Self {
        kwh.0
    }
}

impl fmt::Display for Kwh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kWh", self.0)
    }
}

/// One day's consumption for a user, optionally tied to a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub id: ConsumptionRecordId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub kwh: Kwh,
    pub device_id: Option<DeviceId>,
}

impl ConsumptionRecord {
    /// Creates a record, rejecting dates after `today`.
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        kwh: Kwh,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if date > today {
            return Err(ValidationError::invalid_format(
                "date",
                format!("{} is in the future", date),
            ));
        }
        Ok(Self {
            id: ConsumptionRecordId::new(),
            user_id,
            date,
            kwh,
            device_id: None,
        })
    }

    /// Same as [`ConsumptionRecord::new`] with today taken from the clock.
    pub fn for_today_or_earlier(
        user_id: UserId,
        date: NaiveDate,
        kwh: Kwh,
    ) -> Result<Self, ValidationError> {
        Self::new(user_id, date, kwh, Timestamp::now().date())
    }

    pub fn with_device(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }
}
