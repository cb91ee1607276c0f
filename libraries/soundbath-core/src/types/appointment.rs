/// Appointment domain types
use super::ids::AppointmentId;
use crate::error::{Result, SoundbathError};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Services offered on the booking form
pub const SERVICE_OFFERINGS: &[&str] = &[
    "30-minute sound bath",
    "60-minute individual healing",
    "90-minute deep healing",
    "Group sound healing",
    "Private custom healing",
];

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Submitted by a visitor, awaiting confirmation
    #[default]
    Pending,
    /// Confirmed by an admin
    Confirmed,
    /// Cancelled
    Cancelled,
    /// Session took place
    Completed,
}

impl AppointmentStatus {
    /// All statuses, in the order the admin dashboard lists them
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Awaiting confirmation",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = SoundbathError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(SoundbathError::invalid_input(format!(
                "unknown appointment status '{other}'"
            ))),
        }
    }
}

/// A stored appointment request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique appointment identifier
    pub id: AppointmentId,

    /// WeChat display name of the visitor
    pub wechat_name: String,

    /// Contact phone number
    pub phone: String,

    /// Requested service
    pub service: String,

    /// Requested time, as entered on the form
    pub appointment_time: String,

    /// Current status
    #[serde(default)]
    pub status: AppointmentStatus,

    /// When the request was submitted
    pub created_at: DateTime<Utc>,
}

/// Appointment request as submitted by a visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    /// WeChat display name of the visitor
    pub wechat_name: String,

    /// Contact phone number
    pub phone: String,

    /// Requested service
    pub service: String,

    /// Requested time (`YYYY-MM-DDTHH:MM`, optional seconds, or RFC 3339)
    pub appointment_time: String,

    /// Initial status, always `pending` for visitor submissions
    #[serde(default)]
    pub status: AppointmentStatus,
}

impl NewAppointment {
    /// Create a pending appointment request
    pub fn new(
        wechat_name: impl Into<String>,
        phone: impl Into<String>,
        service: impl Into<String>,
        appointment_time: impl Into<String>,
    ) -> Self {
        Self {
            wechat_name: wechat_name.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
            service: service.into().trim().to_string(),
            appointment_time: appointment_time.into().trim().to_string(),
            status: AppointmentStatus::Pending,
        }
    }

    /// Validate the form fields
    ///
    /// # Errors
    /// Returns `SoundbathError::InvalidInput` naming the first bad field
    pub fn validate(&self) -> Result<()> {
        if self.wechat_name.trim().is_empty() {
            return Err(SoundbathError::invalid_input("wechat_name is required"));
        }
        if self.service.trim().is_empty() {
            return Err(SoundbathError::invalid_input("service is required"));
        }
        validate_phone(&self.phone)?;
        parse_appointment_time(&self.appointment_time)?;
        Ok(())
    }
}

fn validate_phone(phone: &str) -> Result<()> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(SoundbathError::invalid_input("phone is required"));
    }

    if let Some(bad) = phone
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' ')))
    {
        return Err(SoundbathError::invalid_input(format!(
            "phone contains invalid character '{bad}'"
        )));
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(5..=20).contains(&digits) {
        return Err(SoundbathError::invalid_input(format!(
            "phone must contain 5-20 digits, got {digits}"
        )));
    }

    Ok(())
}

/// Parse a requested appointment time
///
/// Accepts the `datetime-local` form format with or without seconds, or a
/// full RFC 3339 timestamp.
pub fn parse_appointment_time(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SoundbathError::invalid_input("appointment_time is required"));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_local());
    }

    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| {
            SoundbathError::invalid_input(format!("appointment_time '{value}' is not a valid time"))
        })
}
