// File: crates/dripper_booking/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::calendar::{CalendarDay, MonthView};
use crate::catalog::Service;
use crate::logic::{
    CatalogResponse, SelectDateRequest, SelectServiceRequest, SelectTimeRequest, ServiceView,
    SlotsResponse, StepIndicator, WizardView,
};
use crate::payment::{OrderSummary, PaymentForm, PaymentReceipt};
use crate::slots::TimeSlot;
use crate::wizard::BookingStep;
use dripper_common::ErrorBody;

#[utoipa::path(
    get,
    path = "/booking/services",
    responses(
        (status = 200, description = "Bookable services", body = CatalogResponse),
        (status = 503, description = "Booking is disabled", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_list_services_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions",
    responses(
        (status = 201, description = "New wizard session on the service step", body = WizardView),
        (status = 503, description = "Booking is disabled", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_create_session_handler() {}

#[utoipa::path(
    get,
    path = "/booking/sessions/{id}",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    responses(
        (status = 200, description = "Current wizard state", body = WizardView),
        (status = 404, description = "Unknown or expired session", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_get_session_handler() {}

#[utoipa::path(
    delete,
    path = "/booking/sessions/{id}",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    responses(
        (status = 204, description = "Session discarded"),
        (status = 404, description = "Unknown or expired session", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_delete_session_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions/{id}/services",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    request_body(content = SelectServiceRequest, example = json!({"service_id": "1"})),
    responses(
        (status = 200, description = "Service added (selecting it twice is a no-op)", body = WizardView),
        (status = 409, description = "Not on the service step", body = ErrorBody),
        (status = 422, description = "Unknown service", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_select_service_handler() {}

#[utoipa::path(
    delete,
    path = "/booking/sessions/{id}/services/{service_id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Wizard session id"),
        ("service_id" = String, Path, description = "Service to remove")
    ),
    responses(
        (status = 200, description = "Service removed", body = WizardView),
        (status = 409, description = "Not on the service step", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_remove_service_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions/{id}/continue",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    responses(
        (status = 200, description = "Moved to the date step", body = WizardView),
        (status = 422, description = "No service selected", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_continue_handler() {}

#[utoipa::path(
    get,
    path = "/booking/sessions/{id}/calendar",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    responses(
        (status = 200, description = "42-day month grid", body = MonthView),
        (status = 404, description = "Unknown or expired session", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_calendar_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions/{id}/calendar/previous",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    responses(
        (status = 200, description = "Previous month grid", body = MonthView),
        (status = 409, description = "Not on the date step", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_previous_month_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions/{id}/calendar/next",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    responses(
        (status = 200, description = "Next month grid", body = MonthView),
        (status = 409, description = "Not on the date step", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_next_month_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions/{id}/date",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    request_body(content = SelectDateRequest, example = json!({"date": "2025-05-15"})),
    responses(
        (status = 200, description = "Date set, moved to the time step", body = WizardView),
        (status = 409, description = "Not on the date step", body = ErrorBody),
        (status = 422, description = "Malformed or past date", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_select_date_handler() {}

#[utoipa::path(
    get,
    path = "/booking/sessions/{id}/slots",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    responses(
        (status = 200, description = "Slots for the selected date", body = SlotsResponse),
        (status = 422, description = "No date selected", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_slots_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions/{id}/time",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    request_body(content = SelectTimeRequest, example = json!({"time": "10:30"})),
    responses(
        (status = 200, description = "Time set, moved to the payment step", body = WizardView),
        (status = 409, description = "Not on the time step", body = ErrorBody),
        (status = 422, description = "Not an available slot", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_select_time_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions/{id}/payment",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    request_body(content = PaymentForm, example = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "card_number": "4242 4242 4242 4242",
        "expiry_date": "12/28",
        "cvv": "123"
    })),
    responses(
        (status = 200, description = "Simulated payment accepted, booking complete", body = WizardView),
        (status = 409, description = "Not on the payment step or already complete", body = ErrorBody),
        (status = 422, description = "Invalid payment details", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_payment_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions/{id}/back",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    responses(
        (status = 200, description = "Previous step, clearing the step left behind", body = WizardView),
        (status = 409, description = "Booking already complete", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_back_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions/{id}/next",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    responses(
        (status = 200, description = "Next step when the current one is satisfied", body = WizardView),
        (status = 409, description = "Booking already complete", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_next_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions/{id}/previous",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    responses(
        (status = 200, description = "Previous step, keeping selections", body = WizardView),
        (status = 409, description = "Booking already complete", body = ErrorBody)
    ),
    tag = "Booking"
)]
fn doc_previous_handler() {}

#[utoipa::path(
    post,
    path = "/booking/sessions/{id}/reset",
    params(("id" = uuid::Uuid, Path, description = "Wizard session id")),
    responses(
        (status = 200, description = "Fresh wizard on the service step", body = WizardView)
    ),
    tag = "Booking"
)]
fn doc_reset_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_list_services_handler,
        doc_create_session_handler,
        doc_get_session_handler,
        doc_delete_session_handler,
        doc_select_service_handler,
        doc_remove_service_handler,
        doc_continue_handler,
        doc_calendar_handler,
        doc_previous_month_handler,
        doc_next_month_handler,
        doc_select_date_handler,
        doc_slots_handler,
        doc_select_time_handler,
        doc_payment_handler,
        doc_back_handler,
        doc_next_handler,
        doc_previous_handler,
        doc_reset_handler
    ),
    components(
        schemas(
            Service,
            ServiceView,
            CatalogResponse,
            BookingStep,
            StepIndicator,
            WizardView,
            CalendarDay,
            MonthView,
            TimeSlot,
            SlotsResponse,
            SelectServiceRequest,
            SelectDateRequest,
            SelectTimeRequest,
            PaymentForm,
            OrderSummary,
            PaymentReceipt,
            ErrorBody
        )
    ),
    tags(
        (name = "Booking", description = "Appointment booking wizard API")
    )
)]
pub struct BookingApiDoc;
