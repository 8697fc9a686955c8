// --- File: crates/dripper_booking/src/payment.rs ---
//! Simulated checkout.
//!
//! No gateway is contacted. A form that passes validation always succeeds and
//! yields a receipt holding only the last four card digits.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::BookingError;
use crate::slots::TimeSlot;

/// Checkout form as submitted by the customer.
#[derive(Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PaymentForm {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Jane Doe"))]
    pub name: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "jane@example.com"))]
    pub email: String,
    #[serde(default, alias = "cardNumber")]
    #[cfg_attr(feature = "openapi", schema(example = "4242 4242 4242 4242"))]
    pub card_number: String,
    #[serde(default, alias = "expiryDate")]
    #[cfg_attr(feature = "openapi", schema(example = "12/28"))]
    pub expiry_date: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "123"))]
    pub cvv: String,
}

// Card data never reaches Debug output.
impl fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("card_number", &"***")
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"***")
            .finish()
    }
}

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// What the customer is paying for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct OrderSummary {
    #[cfg_attr(feature = "openapi", schema(example = "Haircut & Style, Hair Treatment"))]
    pub service_names: String,
    pub total_duration_minutes: i64,
    pub total_price_cents: i64,
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

/// Result of a successful simulated payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PaymentReceipt {
    #[cfg_attr(feature = "openapi", schema(example = "DS-1A2B3C4D"))]
    pub reference: String,
    pub customer_name: String,
    pub customer_email: String,
    #[cfg_attr(feature = "openapi", schema(example = "4242"))]
    pub card_last4: String,
    pub amount_cents: i64,
    pub order: OrderSummary,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub paid_at: DateTime<Utc>,
}

/// Returns every field error found in `form`, empty when the form is valid.
pub fn validate_payment_form(form: &PaymentForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "is required",
        });
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.push(FieldError {
            field: "email",
            message: "is required",
        });
    } else if !is_valid_email(email) {
        errors.push(FieldError {
            field: "email",
            message: "is not a valid email address",
        });
    }

    let digits = card_digits(&form.card_number);
    if form.card_number.trim().is_empty() {
        errors.push(FieldError {
            field: "card_number",
            message: "is required",
        });
    } else if !(12..=19).contains(&digits.len())
        || form
            .card_number
            .chars()
            .any(|c| !(c.is_ascii_digit() || c == ' ' || c == '-'))
    {
        errors.push(FieldError {
            field: "card_number",
            message: "must contain 12 to 19 digits",
        });
    }

    let expiry = form.expiry_date.trim();
    if expiry.is_empty() {
        errors.push(FieldError {
            field: "expiry_date",
            message: "is required",
        });
    } else if !is_valid_expiry(expiry) {
        errors.push(FieldError {
            field: "expiry_date",
            message: "must be MM/YY",
        });
    }

    let cvv = form.cvv.trim();
    if cvv.is_empty() {
        errors.push(FieldError {
            field: "cvv",
            message: "is required",
        });
    } else if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
        errors.push(FieldError {
            field: "cvv",
            message: "must be 3 or 4 digits",
        });
    }

    errors
}

/// Validates the form and records a successful payment for `order`.
pub fn process_payment(
    form: &PaymentForm,
    order: OrderSummary,
    now: DateTime<Utc>,
) -> Result<PaymentReceipt, BookingError> {
    let errors = validate_payment_form(form);
    if !errors.is_empty() {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(BookingError::InvalidPayment(message));
    }

    let digits = card_digits(&form.card_number);
    let card_last4 = digits[digits.len().saturating_sub(4)..].to_string();
    let receipt = PaymentReceipt {
        reference: new_reference(),
        customer_name: form.name.trim().to_string(),
        customer_email: form.email.trim().to_string(),
        card_last4,
        amount_cents: order.total_price_cents,
        order,
        paid_at: now,
    };

    info!(
        reference = %receipt.reference,
        amount_cents = receipt.amount_cents,
        "Simulated payment accepted"
    );
    Ok(receipt)
}

/// "DS-" followed by eight upper-case hex characters.
pub fn new_reference() -> String {
    let id = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("DS-{}", &id[..8])
}

/// "March 15, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn card_digits(card_number: &str) -> String {
    card_number.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn is_valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    if !month.chars().chain(year.chars()).all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u32>(), Ok(1..=12))
}
