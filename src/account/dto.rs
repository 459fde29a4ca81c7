use serde::{Deserialize, Serialize};
use time::{format_description::FormatItem, macros::format_description, Date};

use crate::{
    account::{
        repo_types::User,
        validate::{is_valid_email, is_valid_phone},
    },
    error::ApiError,
};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Request body for POST /api/check-user.
#[derive(Debug, Deserialize)]
pub struct CheckUserRequest {
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckUserResponse {
    pub exists: bool,
    pub requires_password: bool,
}

/// Request body for POST /api/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone: Option<String>,
    pub password: Option<String>,
}

/// Request body for POST /api/register. Fields are `Option` so a missing
/// one can be reported by name; an empty string counts as missing too.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub phone: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
}

/// A registration payload that passed every syntactic check.
#[derive(Debug)]
pub struct NewRegistration {
    pub phone: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub birth_date: Date,
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Validation(format!("{name} is required"))),
    }
}

impl RegisterRequest {
    /// Checks presence in field-declaration order, then formats, and parses
    /// the birth date. No storage is touched here.
    pub fn validate(self) -> Result<NewRegistration, ApiError> {
        let phone = required(self.phone, "phone")?;
        let password = required(self.password, "password")?;
        let full_name = required(self.full_name, "full_name")?;
        let email = required(self.email, "email")?;
        let birth_date = required(self.birth_date, "birth_date")?;

        if !is_valid_phone(&phone) {
            return Err(ApiError::Validation("Invalid phone number".into()));
        }
        if !is_valid_email(&email) {
            return Err(ApiError::Validation("Invalid email address".into()));
        }
        let birth_date = Date::parse(&birth_date, DATE_FORMAT)
            .map_err(|_| ApiError::Validation("Invalid birth date".into()))?;

        Ok(NewRegistration {
            phone,
            password,
            full_name,
            email,
            birth_date,
        })
    }
}

/// Response for login/register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned on login/register.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub phone: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            phone: user.phone.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Response for GET /api/profile: the public fields plus the birth date.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: ProfileUser,
}

#[derive(Debug, Serialize)]
pub struct ProfileUser {
    pub id: i64,
    pub phone: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
}

impl From<&User> for ProfileUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            phone: user.phone.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            birth_date: user
                .birth_date
                .and_then(|d| d.format(DATE_FORMAT).ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn full_request() -> RegisterRequest {
        RegisterRequest {
            phone: Some("+15551234567".into()),
            password: Some("secret1".into()),
            full_name: Some("A B".into()),
            email: Some("a@b.com".into()),
            birth_date: Some("1990-01-01".into()),
        }
    }

    fn validation_message(err: ApiError) -> String {
        match err {
            ApiError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_payload_parses() {
        let reg = full_request().validate().expect("should validate");
        assert_eq!(reg.phone, "+15551234567");
        assert_eq!(reg.birth_date.to_string(), "1990-01-01");
    }

    #[test]
    fn missing_fields_are_named_in_declaration_order() {
        let err = RegisterRequest {
            phone: None,
            password: None,
            full_name: None,
            email: None,
            birth_date: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(validation_message(err), "phone is required");

        let mut req = full_request();
        req.email = None;
        assert_eq!(
            validation_message(req.validate().unwrap_err()),
            "email is required"
        );

        let mut req = full_request();
        req.birth_date = Some("".into());
        assert_eq!(
            validation_message(req.validate().unwrap_err()),
            "birth_date is required"
        );
    }

    #[test]
    fn bad_phone_and_email_are_rejected() {
        let mut req = full_request();
        req.phone = Some("0123".into());
        assert_eq!(
            validation_message(req.validate().unwrap_err()),
            "Invalid phone number"
        );

        let mut req = full_request();
        req.email = Some("not-an-email".into());
        assert_eq!(
            validation_message(req.validate().unwrap_err()),
            "Invalid email address"
        );
    }

    #[test]
    fn malformed_birth_date_is_rejected() {
        for bad in ["01-01-1990", "1990/01/01", "1990-13-01", "yesterday"] {
            let mut req = full_request();
            req.birth_date = Some(bad.into());
            assert_eq!(
                validation_message(req.validate().unwrap_err()),
                "Invalid birth date",
                "input: {bad}"
            );
        }
    }

    #[test]
    fn profile_user_formats_birth_date_as_iso() {
        let user = User {
            id: 1,
            phone: "+15551234567".into(),
            password_hash: "hash".into(),
            full_name: Some("A B".into()),
            email: Some("a@b.com".into()),
            birth_date: Some(datetime!(1990-01-01 00:00 UTC).date()),
            created_at: datetime!(2024-01-01 00:00 UTC),
        };
        let profile = ProfileUser::from(&user);
        assert_eq!(profile.birth_date.as_deref(), Some("1990-01-01"));

        let json = serde_json::to_value(&PublicUser::from(&user)).unwrap();
        assert_eq!(json["phone"], "+15551234567");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("birth_date").is_none());
    }

    #[test]
    fn check_user_response_shape() {
        let json = serde_json::to_value(CheckUserResponse {
            exists: false,
            requires_password: false,
        })
        .unwrap();
        assert_eq!(json["exists"], false);
        assert_eq!(json["requires_password"], false);
    }
}
