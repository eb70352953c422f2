//! Customer request and response shapes.

use serde::{Deserialize, Serialize};

use confectionery_core::{CustomerId, Email, password_violations};

use super::{require_text, require_text_if_present};
use crate::models::Customer;

/// Body of `POST /customers/`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomerInput {
    #[serde(rename = "fName")]
    pub first_name: String,
    #[serde(rename = "lName")]
    pub last_name: String,
    pub email: String,
    pub password: Option<String>,
    #[serde(rename = "passwordConfirmation")]
    pub password_confirmation: Option<String>,
}

/// A validated customer create request; the password is still plaintext.
#[derive(Debug)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: Option<String>,
}

impl CustomerInput {
    /// Check every field rule.
    ///
    /// # Errors
    ///
    /// Returns one message per violated rule.
    pub fn validate(self) -> Result<CustomerDraft, Vec<String>> {
        let mut errors = Vec::new();

        require_text(&mut errors, "fName", &self.first_name);
        require_text(&mut errors, "lName", &self.last_name);
        let email = parse_email(&mut errors, &self.email);
        check_password(
            &mut errors,
            self.password.as_deref(),
            self.password_confirmation.as_deref(),
        );

        match email {
            Some(email) if errors.is_empty() => Ok(CustomerDraft {
                first_name: self.first_name,
                last_name: self.last_name,
                email,
                password: self.password,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PATCH /customers/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomerPatch {
    #[serde(rename = "fName")]
    pub first_name: Option<String>,
    #[serde(rename = "lName")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "passwordConfirmation")]
    pub password_confirmation: Option<String>,
}

/// A validated customer patch; the password is still plaintext.
#[derive(Debug, Default)]
pub struct CustomerPatchDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub password: Option<String>,
}

impl CustomerPatch {
    /// Check the rules of every present field.
    ///
    /// # Errors
    ///
    /// Returns one message per violated rule.
    pub fn validate(self) -> Result<CustomerPatchDraft, Vec<String>> {
        let mut errors = Vec::new();

        require_text_if_present(&mut errors, "fName", self.first_name.as_deref());
        require_text_if_present(&mut errors, "lName", self.last_name.as_deref());
        let email = self
            .email
            .as_deref()
            .and_then(|raw| parse_email(&mut errors, raw));
        check_password(
            &mut errors,
            self.password.as_deref(),
            self.password_confirmation.as_deref(),
        );

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CustomerPatchDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            email,
            password: self.password,
        })
    }
}

fn parse_email(errors: &mut Vec<String>, raw: &str) -> Option<Email> {
    if raw.is_empty() {
        errors.push("email is required".to_string());
        return None;
    }
    Email::parse(raw)
        .map_err(|e| errors.push(format!("email is invalid: {e}")))
        .ok()
}

fn check_password(errors: &mut Vec<String>, password: Option<&str>, confirmation: Option<&str>) {
    let Some(password) = password else {
        return;
    };

    errors.extend(password_violations(password).iter().map(ToString::to_string));

    match confirmation {
        None => errors.push("passwordConfirmation is required".to_string()),
        Some(confirmation) if confirmation != password => {
            errors.push("password and passwordConfirmation must match".to_string());
        }
        Some(_) => {}
    }
}

/// Customer as returned by the API. The password hash is never included.
#[derive(Debug, Serialize)]
pub struct CustomerOutput {
    pub id: CustomerId,
    #[serde(rename = "fName")]
    pub first_name: String,
    #[serde(rename = "lName")]
    pub last_name: String,
    pub email: Email,
}

impl From<Customer> for CustomerOutput {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> CustomerInput {
        CustomerInput {
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            email: "ana@example.com".to_string(),
            password: None,
            password_confirmation: None,
        }
    }

    #[test]
    fn test_missing_fields_decode_then_fail_validation() {
        let parsed: CustomerInput = serde_json::from_str("{}").unwrap();
        let errors = parsed.validate().unwrap_err();

        assert_eq!(
            errors,
            vec!["fName is required", "lName is required", "email is required"]
        );
    }

    #[test]
    fn test_valid_without_password() {
        let draft = input().validate().unwrap();
        assert_eq!(draft.email.as_str(), "ana@example.com");
        assert!(draft.password.is_none());
    }

    #[test]
    fn test_invalid_email() {
        let errors = CustomerInput {
            email: "not-an-email".to_string(),
            ..input()
        }
        .validate()
        .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("email is invalid"));
    }

    #[test]
    fn test_weak_password_lists_each_rule() {
        let errors = CustomerInput {
            password: Some("password".to_string()),
            password_confirmation: Some("password".to_string()),
            ..input()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            errors,
            vec![
                "password must contain at least one uppercase letter",
                "password must contain at least one digit",
                "password must contain at least one special character",
            ]
        );
    }

    #[test]
    fn test_password_confirmation() {
        let missing = CustomerInput {
            password: Some("Passw0rd!".to_string()),
            ..input()
        }
        .validate()
        .unwrap_err();
        assert_eq!(missing, vec!["passwordConfirmation is required"]);

        let mismatch = CustomerInput {
            password: Some("Passw0rd!".to_string()),
            password_confirmation: Some("Passw0rd?".to_string()),
            ..input()
        }
        .validate()
        .unwrap_err();
        assert_eq!(mismatch, vec!["password and passwordConfirmation must match"]);

        let ok = CustomerInput {
            password: Some("Passw0rd!".to_string()),
            password_confirmation: Some("Passw0rd!".to_string()),
            ..input()
        }
        .validate()
        .unwrap();
        assert_eq!(ok.password.as_deref(), Some("Passw0rd!"));
    }

    #[test]
    fn test_patch_checks_only_present_fields() {
        let empty: CustomerPatch = serde_json::from_str("{}").unwrap();
        let draft = empty.validate().unwrap();
        assert!(draft.first_name.is_none());
        assert!(draft.email.is_none());

        let blank: CustomerPatch = serde_json::from_str(r#"{"fName": ""}"#).unwrap();
        assert_eq!(blank.validate().unwrap_err(), vec!["fName is required"]);
    }

    #[test]
    fn test_output_hides_password_hash() {
        let customer = Customer {
            id: CustomerId::new(7),
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            email: Email::parse("ana@example.com").unwrap(),
            active: true,
            password_hash: Some("$argon2id$v=19$...".to_string()),
        };

        let json = serde_json::to_value(CustomerOutput::from(customer)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "fName": "Ana",
                "lName": "Souza",
                "email": "ana@example.com",
            })
        );
    }
}
