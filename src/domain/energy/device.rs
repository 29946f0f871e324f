//! Electrical devices registered by a user.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DeviceId, UserId, ValidationError};

use super::Kwh;

/// Upper bound on rated power accepted from the device form, in watts.
pub const MAX_RATED_POWER_WATTS: u32 = 100_000;

/// A device whose consumption the user tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub user_id: UserId,
    pub name: String,
    pub rated_power_watts: u32,
}

impl Device {
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        rated_power_watts: u32,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if rated_power_watts == 0 || rated_power_watts > MAX_RATED_POWER_WATTS {
            return Err(ValidationError::out_of_range(
                "rated_power_watts",
                1,
                MAX_RATED_POWER_WATTS as i64,
                rated_power_watts as i64,
            ));
        }
        Ok(Self {
            id: DeviceId::new(),
            user_id,
            name,
            rated_power_watts,
        })
    }

    /// Estimated daily energy if the device runs `hours_per_day` hours.
    pub fn estimated_daily_kwh(&self, hours_per_day: f64) -> Result<Kwh, ValidationError> {
        if !(0.0..=24.0).contains(&hours_per_day) {
            return Err(ValidationError::invalid_format(
                "hours_per_day",
                "must be between 0 and 24",
            ));
        }
        Kwh::from_power(self.rated_power_watts, hours_per_day)
    }
}
