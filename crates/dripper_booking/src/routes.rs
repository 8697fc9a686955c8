// --- File: crates/dripper_booking/src/routes.rs ---

use crate::handlers::{
    back_handler, calendar_handler, continue_handler, create_session_handler,
    delete_session_handler, get_session_handler, list_services_handler, next_handler,
    next_month_handler, payment_handler, previous_handler, previous_month_handler,
    remove_service_handler, reset_handler, select_date_handler, select_service_handler,
    select_time_handler, slots_handler, BookingState,
};
use crate::pages::{
    back_action, booking_page, continue_action, landing_page, next_action, next_month_action,
    payment_action, previous_action, previous_month_action, remove_service_action, reset_action,
    select_date_action, select_service_action, select_time_action, start_booking_page,
};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

/// JSON API for the booking wizard. The backend nests it under `/api`.
pub fn routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/booking/services", get(list_services_handler))
        .route("/booking/sessions", post(create_session_handler))
        .route(
            "/booking/sessions/{id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .route("/booking/sessions/{id}/services", post(select_service_handler))
        .route(
            "/booking/sessions/{id}/services/{service_id}",
            delete(remove_service_handler),
        )
        .route("/booking/sessions/{id}/continue", post(continue_handler))
        .route("/booking/sessions/{id}/calendar", get(calendar_handler))
        .route(
            "/booking/sessions/{id}/calendar/previous",
            post(previous_month_handler),
        )
        .route("/booking/sessions/{id}/calendar/next", post(next_month_handler))
        .route("/booking/sessions/{id}/date", post(select_date_handler))
        .route("/booking/sessions/{id}/slots", get(slots_handler))
        .route("/booking/sessions/{id}/time", post(select_time_handler))
        .route("/booking/sessions/{id}/payment", post(payment_handler))
        .route("/booking/sessions/{id}/back", post(back_handler))
        .route("/booking/sessions/{id}/next", post(next_handler))
        .route("/booking/sessions/{id}/previous", post(previous_handler))
        .route("/booking/sessions/{id}/reset", post(reset_handler))
        .with_state(state)
}

/// Server-rendered pages, mounted at the site root.
pub fn page_routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/booking", get(start_booking_page))
        .route("/booking/{id}", get(booking_page))
        .route("/booking/{id}/services", post(select_service_action))
        .route(
            "/booking/{id}/services/{service_id}/remove",
            post(remove_service_action),
        )
        .route("/booking/{id}/continue", post(continue_action))
        .route("/booking/{id}/calendar/previous", post(previous_month_action))
        .route("/booking/{id}/calendar/next", post(next_month_action))
        .route("/booking/{id}/date", post(select_date_action))
        .route("/booking/{id}/time", post(select_time_action))
        .route("/booking/{id}/payment", post(payment_action))
        .route("/booking/{id}/back", post(back_action))
        .route("/booking/{id}/next", post(next_action))
        .route("/booking/{id}/previous", post(previous_action))
        .route("/booking/{id}/reset", post(reset_action))
        .with_state(state)
}
