//! Login form, validated credentials and the login endpoint's wire DTOs.
//!
//! A [`LoginForm`] is what the user typed. It becomes [`Credentials`] only
//! after validation, so nothing unvalidated can reach the network.
//! The response DTOs accept any JSON object and leave every field optional;
//! deciding which missing fields are fatal is the exchange client's job.

use campusdesk_core::serde::deserialize_non_empty_string;
use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::roles::Role;

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if role.trim().is_empty() {
        return Err(ValidationError::new("role").with_message(Cow::Borrowed("Role is required")));
    }
    role.parse::<Role>().map(|_| ()).map_err(|_| {
        ValidationError::new("role").with_message(Cow::Borrowed(
            "Role must be one of Admin, Faculty or Student",
        ))
    })
}

/// Raw login form input. Missing fields deserialize as empty strings.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(custom(function = "validate_role"))]
    pub role: String,
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// A validated login triple. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub role: Role,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl TryFrom<LoginForm> for Credentials {
    type Error = ValidationErrors;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        let form = LoginForm {
            email: form.email.trim().to_string(),
            ..form
        };
        form.validate()?;

        let role = form.role.parse::<Role>().map_err(|_| {
            let mut errors = ValidationErrors::new();
            errors.add("role", ValidationError::new("role"));
            errors
        })?;

        Ok(Credentials {
            role,
            email: form.email,
            password: form.password,
        })
    }
}

/// Joins field errors into one user-facing sentence, ordered by field name.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `user` object of a successful login response. Extra fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    pub role: Option<String>,
}

/// Body of a 2xx `POST /auth/login` response.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseBody {
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserPayload>,
}

/// Body of a 2xx `POST /auth/refresh` response.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponseBody {
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    pub refresh_token: Option<String>,
}

/// Body of a non-2xx response from the authentication API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(role: &str, email: &str, password: &str) -> LoginForm {
        LoginForm {
            role: role.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_form_becomes_credentials() {
        let credentials = Credentials::try_from(form("Student", "a@b.com", "x")).unwrap();
        assert_eq!(credentials.role, Role::Student);
        assert_eq!(credentials.email, "a@b.com");
        assert_eq!(credentials.password, "x");
    }

    #[test]
    fn test_email_is_trimmed() {
        let credentials = Credentials::try_from(form("admin", "  a@b.com ", "x")).unwrap();
        assert_eq!(credentials.email, "a@b.com");
        assert_eq!(credentials.role, Role::Admin);
    }

    #[test]
    fn test_empty_password_rejected() {
        let errors = Credentials::try_from(form("Student", "a@b.com", "")).unwrap_err();
        assert_eq!(describe_validation_errors(&errors), "Password is required");
    }

    #[test]
    fn test_empty_email_rejected() {
        let errors = Credentials::try_from(form("Student", "", "x")).unwrap_err();
        assert_eq!(describe_validation_errors(&errors), "A valid email is required");
    }

    #[test]
    fn test_malformed_email_rejected() {
        assert!(Credentials::try_from(form("Student", "not-an-email", "x")).is_err());
    }

    #[test]
    fn test_empty_role_rejected() {
        let errors = Credentials::try_from(form("", "a@b.com", "x")).unwrap_err();
        assert_eq!(describe_validation_errors(&errors), "Role is required");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let errors = Credentials::try_from(form("Parent", "a@b.com", "x")).unwrap_err();
        assert!(describe_validation_errors(&errors).contains("Admin, Faculty or Student"));
    }

    #[test]
    fn test_all_empty_reports_every_field() {
        let errors = Credentials::try_from(LoginForm::default()).unwrap_err();
        assert_eq!(
            describe_validation_errors(&errors),
            "A valid email is required, Password is required, Role is required"
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let form = form("Student", "a@b.com", "hunter2");
        assert!(!format!("{:?}", form).contains("hunter2"));
        let credentials = Credentials::try_from(form).unwrap();
        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }

    #[test]
    fn test_login_response_body_full() {
        let body: LoginResponseBody = serde_json::from_str(
            r#"{"accessToken":"t1","refreshToken":"t2","user":{"name":"A","email":"a@b.com","role":"Student","id":7}}"#,
        )
        .unwrap();
        assert_eq!(body.access_token.as_deref(), Some("t1"));
        assert_eq!(body.refresh_token.as_deref(), Some("t2"));
        let user = body.user.unwrap();
        assert_eq!(user.name.as_deref(), Some("A"));
        assert_eq!(user.role.as_deref(), Some("Student"));
    }

    #[test]
    fn test_login_response_body_missing_fields() {
        let body: LoginResponseBody = serde_json::from_str(r#"{"accessToken":""}"#).unwrap();
        assert!(body.access_token.is_none());
        assert!(body.refresh_token.is_none());
        assert!(body.user.is_none());
    }

    #[test]
    fn test_error_body() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"Invalid credentials"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Invalid credentials"));

        let body: ErrorBody = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(body.message.is_none());
    }
}
