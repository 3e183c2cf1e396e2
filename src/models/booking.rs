use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;
use validator::Validate;

use crate::models::WorkerId;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

/// `worker_id` is a weak reference; deleting the worker leaves the booking as is.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub worker_id: WorkerId,
    /// Snapshot taken when booking; not resynced on rename.
    pub worker_name: String,
    pub service: String,
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub service: String,
    pub date: DateTime<Utc>,
    pub customer_name: String,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingDto {
    pub worker_id: WorkerId,
    #[validate(custom = "crate::utils::validation::validate_not_blank")]
    pub service: String,
    #[validate(custom = "crate::utils::validation::validate_not_blank")]
    pub customer_name: String,
    #[validate(custom = "crate::utils::validation::validate_phone_field")]
    pub customer_phone: String,
    /// Requested slot; defaults to the time of the request.
    pub date: Option<DateTime<Utc>>,
}
