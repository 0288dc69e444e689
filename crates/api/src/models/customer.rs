//! Customer domain types and field validation.
//!
//! Validation is an explicit function per input shape, returning the list of
//! violated constraints. The service joins the messages into a single
//! validation error; nothing here touches the database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clientele_core::{CustomerId, Email, EmailError};

/// Minimum length of a customer name.
pub const NAME_MIN_LENGTH: usize = 3;
/// Maximum length of a customer name (column width).
pub const NAME_MAX_LENGTH: usize = 255;
/// Maximum length of a phone number (column width).
pub const PHONE_MAX_LENGTH: usize = 20;
/// Minimum length of an address.
pub const ADDRESS_MIN_LENGTH: usize = 5;

/// A customer record (domain type).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique customer ID, assigned at creation, never reused.
    pub id: CustomerId,
    /// Customer's display name.
    pub name: String,
    /// Customer's email address, unique across all customers.
    pub email: Email,
    /// Customer's phone number.
    pub phone: String,
    /// Customer's postal address.
    pub address: String,
    /// When the customer was created. Never modified.
    pub created_at: DateTime<Utc>,
    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl NewCustomer {
    /// Collect every violated field constraint, in field order.
    ///
    /// Returns an empty list when the input is valid.
    #[must_use]
    pub fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        check_name(&self.name, &mut violations);
        check_email(&self.email, &mut violations);
        check_phone(&self.phone, &mut violations);
        check_address(&self.address, &mut violations);
        violations
    }
}

/// Partial update for a customer. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CustomerPatch {
    /// Whether the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }

    /// Collect violated constraints for the supplied fields only.
    ///
    /// Omitted fields are not checked (partial validation).
    #[must_use]
    pub fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut violations);
        }
        if let Some(email) = &self.email {
            check_email(email, &mut violations);
        }
        if let Some(phone) = &self.phone {
            check_phone(phone, &mut violations);
        }
        if let Some(address) = &self.address {
            check_address(address, &mut violations);
        }
        violations
    }
}

fn check_name(name: &str, violations: &mut Vec<String>) {
    if name.is_empty() {
        violations.push("Name is required".to_string());
        return;
    }
    let chars = name.chars().count();
    if chars < NAME_MIN_LENGTH {
        violations.push(format!(
            "Name must be at least {NAME_MIN_LENGTH} characters long"
        ));
    }
    if chars > NAME_MAX_LENGTH {
        violations.push(format!(
            "Name must be at most {NAME_MAX_LENGTH} characters long"
        ));
    }
}

fn check_email(email: &str, violations: &mut Vec<String>) {
    match Email::parse(email) {
        Ok(_) => {}
        Err(EmailError::Empty) => violations.push("Email is required".to_string()),
        Err(EmailError::TooLong { max }) => {
            violations.push(format!("Email must be at most {max} characters long"));
        }
        Err(_) => violations.push("Invalid email format".to_string()),
    }
}

fn check_phone(phone: &str, violations: &mut Vec<String>) {
    if phone.is_empty() {
        violations.push("Phone is required".to_string());
        return;
    }
    if phone.chars().count() > PHONE_MAX_LENGTH {
        violations.push(format!(
            "Phone must be at most {PHONE_MAX_LENGTH} characters long"
        ));
    }
    let valid = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')'));
    if !valid {
        violations.push("Invalid phone format".to_string());
    }
}

fn check_address(address: &str, violations: &mut Vec<String>) {
    if address.is_empty() {
        violations.push("Address is required".to_string());
        return;
    }
    if address.chars().count() < ADDRESS_MIN_LENGTH {
        violations.push(format!(
            "Address must be at least {ADDRESS_MIN_LENGTH} characters long"
        ));
    }
}
