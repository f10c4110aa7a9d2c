//! Request and response bodies of the clinic API

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 6;

/// Email and password login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// New account registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Apply the backend's field rules before sending
    pub fn validate(&self) -> Result<(), String> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Account as returned by `/me` and `/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub allergies: Option<String>,
    pub chronic_conditions: Option<String>,
    pub current_medications: Option<String>,
}

impl UserProfile {
    /// Full name when known, username otherwise
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }
}

/// Partial profile update; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chronic_conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_medications: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(username) = &self.username {
            validate_username(username)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

/// Half-day booking window; the wire values are the backend's literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    /// 08:00 to 11:30
    #[serde(rename = "เช้า")]
    Morning,
    /// 13:00 to 17:30
    #[serde(rename = "บ่าย")]
    Afternoon,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 2] = [TimeSlot::Morning, TimeSlot::Afternoon];

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning (08:00-11:30)",
            TimeSlot::Afternoon => "Afternoon (13:00-17:30)",
        }
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "morning" | "เช้า" => Ok(TimeSlot::Morning),
            "afternoon" | "บ่าย" => Ok(TimeSlot::Afternoon),
            other => Err(format!("unknown time slot '{other}'")),
        }
    }
}

/// Booked appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub user_id: Option<i64>,
    pub doctor_name: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub time_slot: TimeSlot,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New booking; the backend assigns the time inside the slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub appointment_date: NaiveDate,
    pub time_slot: TimeSlot,
    pub reason: Option<String>,
    pub doctor_name: Option<String>,
}

/// Partial appointment update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
}

/// Plain acknowledgement body (`{"detail": "..."}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

fn validate_username(username: &str) -> Result<(), String> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(format!(
            "username must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters"
        ));
    }
    if !username.chars().all(char::is_alphanumeric) {
        return Err("username must contain only letters and digits".to_string());
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), String> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("email address is not valid".to_string()),
    }
}

fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(format!(
            "password must be at least {PASSWORD_MIN_LEN} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registration(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_registration_rules() {
        assert!(registration("alice01", "alice@example.com", "secret1").validate().is_ok());
        assert!(registration("al", "alice@example.com", "secret1").validate().is_err());
        assert!(registration("alice_01", "alice@example.com", "secret1").validate().is_err());
        assert!(registration("สมชาย01", "somchai@example.com", "secret1").validate().is_ok());
        assert!(registration("สมชาย 01", "somchai@example.com", "secret1").validate().is_err());
        assert!(registration(&"a".repeat(21), "alice@example.com", "secret1").validate().is_err());
        assert!(registration("alice01", "alice.example.com", "secret1").validate().is_err());
        assert!(registration("alice01", "alice@example.com", "12345").validate().is_err());
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            phone_number: Some("0812345678".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "phone_number": "0812345678" })
        );
        assert!(update.validate().is_ok());

        let bad = ProfileUpdate {
            password: Some("123".into()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_time_slot_wire_values() {
        assert_eq!(serde_json::to_value(TimeSlot::Morning).unwrap(), json!("เช้า"));
        assert_eq!(
            serde_json::from_value::<TimeSlot>(json!("บ่าย")).unwrap(),
            TimeSlot::Afternoon
        );
        assert_eq!("Morning".parse::<TimeSlot>().unwrap(), TimeSlot::Morning);
        assert!("evening".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_appointment_decodes_backend_payload() {
        let appointment: Appointment = serde_json::from_value(json!({
            "id": 7,
            "user_id": 3,
            "doctor_name": "Dr. Somchai",
            "appointment_date": "2025-03-14",
            "appointment_time": "08:30:00",
            "time_slot": "เช้า",
            "reason": null,
            "status": "pending",
            "created_at": "2025-03-01T09:15:02.123456",
            "updated_at": "2025-03-01T09:15:02.123456"
        }))
        .unwrap();

        assert_eq!(appointment.id, 7);
        assert_eq!(appointment.time_slot, TimeSlot::Morning);
        assert_eq!(appointment.appointment_time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut profile: UserProfile = serde_json::from_value(json!({
            "id": 1,
            "username": "alice01",
            "email": "alice@example.com"
        }))
        .unwrap();
        assert_eq!(profile.display_name(), "alice01");

        profile.first_name = Some("Alice".into());
        profile.last_name = Some("Smith".into());
        assert_eq!(profile.display_name(), "Alice Smith");
    }
}
