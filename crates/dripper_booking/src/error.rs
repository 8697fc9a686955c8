// --- File: crates/dripper_booking/src/error.rs ---
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, NaiveTime};
use dripper_common::{
    config_error, conflict, not_found, service_unavailable, validation_error, DripperError,
    HttpStatusCode, IntoHttpResponse,
};
use thiserror::Error;
use uuid::Uuid;

use crate::wizard::BookingStep;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Booking session {0} not found")]
    SessionNotFound(Uuid),

    #[error("Booking session {0} not found")]
    MalformedSessionId(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Select at least one service before continuing")]
    NoServicesSelected,

    #[error("Action requires the {expected} step, but the booking is at the {actual} step")]
    WrongStep {
        expected: BookingStep,
        actual: BookingStep,
    },

    #[error("Dates in the past cannot be booked: {0}")]
    PastDate(NaiveDate),

    #[error("Select a date first")]
    NoDateSelected,

    #[error("{0} is not an available time slot")]
    UnavailableTime(NaiveTime),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Booking is missing a service, date or time")]
    IncompleteBooking,

    #[error("Payment details are invalid: {0}")]
    InvalidPayment(String),

    #[error("Booking is already complete, start a new one")]
    AlreadyComplete,

    #[error("Booking configuration error: {0}")]
    Config(String),

    #[error("Booking is disabled")]
    Disabled,
}

impl From<BookingError> for DripperError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::SessionNotFound(id) => not_found(format!("Booking session {}", id)),
            BookingError::MalformedSessionId(raw) => not_found(format!("Booking session {}", raw)),
            BookingError::WrongStep { .. } | BookingError::AlreadyComplete => conflict(err),
            BookingError::Config(msg) => config_error(msg),
            BookingError::Disabled => service_unavailable(err),
            other => validation_error(other),
        }
    }
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::SessionNotFound(_) | BookingError::MalformedSessionId(_) => 404,
            BookingError::WrongStep { .. } | BookingError::AlreadyComplete => 409,
            BookingError::Config(_) => 500,
            BookingError::Disabled => 503,
            _ => 422,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        DripperError::from(self).into_http_response()
    }
}
