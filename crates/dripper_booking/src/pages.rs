// File: crates/dripper_booking/src/pages.rs
//! Server-rendered booking pages.
//!
//! Every wizard operation is a plain form post answered with a 303 redirect
//! back to `/booking/{id}`. Rejected posts re-render the page with the
//! message and the error's status code.

use axum::{
    extract::{rejection::FormRejection, FromRequestParts, State},
    http::{request::Parts, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::{Datelike, NaiveDate, Utc};
use dripper_common::HttpStatusCode;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::calendar::CalendarDay;
use crate::catalog::{format_price, ServiceCatalog};
use crate::error::BookingError;
use crate::extract::{form_payload, ServicePath, SessionPath};
use crate::handlers::BookingState;
use crate::logic::{
    catalog_view, parse_date, parse_time, step_indicators, SelectDateRequest,
    SelectServiceRequest, SelectTimeRequest,
};
use crate::payment::{format_long_date, PaymentForm};
use crate::settings::BookingSettings;
use crate::wizard::{BookingStep, BookingWizard};

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#f9fafb;color:#111827}\
nav{background:#fff;border-bottom:1px solid #e5e7eb;padding:1rem 1.5rem}\
nav a{font-weight:700;font-size:1.25rem;color:#111827;text-decoration:none}\
main{max-width:56rem;margin:2rem auto;padding:0 1rem}\
.card{background:#fff;border-radius:.5rem;box-shadow:0 1px 3px rgba(0,0,0,.1);overflow:hidden}\
.header{display:flex;align-items:center;gap:1rem;padding:1.5rem;border-bottom:1px solid #e5e7eb}\
.header h1{margin:0;font-size:1.5rem}.header p{margin:.25rem 0 0;color:#4b5563}\
.steps{display:flex;justify-content:space-between;padding:1rem;background:#f9fafb;border-bottom:1px solid #e5e7eb;color:#9ca3af}\
.steps .current{color:#3b82f6;font-weight:600}\
.body{padding:1.5rem}.grid2{display:grid;grid-template-columns:1fr 1fr;gap:1.5rem}\
.calendar{display:grid;grid-template-columns:repeat(7,1fr);gap:.5rem}\
.slots{display:grid;grid-template-columns:repeat(4,1fr);gap:.5rem}\
form.inline{display:inline;margin:0}\
button{cursor:pointer;border:1px solid #e5e7eb;border-radius:.5rem;background:#fff;padding:.5rem .75rem;font:inherit}\
button.primary{background:#3b82f6;color:#fff;border:none;width:100%;padding:.75rem}\
button:disabled{opacity:.5;cursor:not-allowed}\
.service{width:100%;text-align:left;display:flex;justify-content:space-between;padding:1rem}\
.service.selected,.day.selected,.slot.selected{border-color:#3b82f6;background:#eff6ff}\
.day{width:100%;text-align:center}.day.other-month{color:#9ca3af}.day.today{border:2px solid #3b82f6}\
.muted{color:#6b7280}.row{display:flex;justify-content:space-between;margin:.5rem 0}\
.empty{border:2px dashed #d1d5db;border-radius:.5rem;padding:2rem;text-align:center;color:#6b7280}\
.alert{background:#fef2f2;color:#991b1b;border:1px solid #fecaca;border-radius:.5rem;padding:.75rem 1rem;margin-bottom:1rem}\
label{display:block;font-size:.875rem;margin-top:.75rem}input{width:100%;padding:.5rem;box-sizing:border-box}\
.confirmation{text-align:center}\
";

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn booking_path(id: Uuid) -> String {
    format!("/booking/{}", id)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">DripperScheduler</a></nav>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape_html(title),
        style = STYLE,
    )
}

/// A one-button form posting to `/booking/{id}/{action}`.
fn action_form(
    id: Uuid,
    action: &str,
    label: &str,
    class: &str,
    fields: &[(&str, &str)],
    disabled: bool,
) -> String {
    let mut html = format!(
        "<form class=\"inline\" method=\"post\" action=\"{}/{}\">",
        booking_path(id),
        escape_html(action)
    );
    for (name, value) in fields {
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            escape_html(name),
            escape_html(value)
        ));
    }
    html.push_str(&format!(
        "<button type=\"submit\" class=\"{}\"{}>{}</button></form>",
        escape_html(class),
        if disabled { " disabled" } else { "" },
        label
    ));
    html
}

pub fn render_landing() -> String {
    layout(
        "DripperScheduler",
        "<div class=\"card body confirmation\">\
         <h1>Welcome to DripperScheduler</h1>\
         <p class=\"muted\">Book your appointments easily and quickly</p>\
         <p><a href=\"/booking\">Book an Appointment</a></p></div>",
    )
}

pub fn render_error(status: StatusCode, message: &str) -> String {
    layout(
        "DripperScheduler",
        &format!(
            "<div class=\"card body\"><h1>{}</h1><div class=\"alert\" role=\"alert\">{}</div>\
             <p><a href=\"/booking\">Start a new booking</a></p></div>",
            status.as_u16(),
            escape_html(message)
        ),
    )
}

/// What the page renderer needs besides the wizard itself.
pub struct PageContext<'a> {
    pub settings: &'a BookingSettings,
    pub catalog: &'a ServiceCatalog,
    pub today: NaiveDate,
}

pub fn render_booking_page(
    wizard: &BookingWizard,
    ctx: &PageContext<'_>,
    error: Option<&str>,
    form: Option<&PaymentForm>,
) -> String {
    let id = wizard.id();
    let mut body = String::from("<div class=\"card\">");

    // Header
    body.push_str("<div class=\"header\">");
    if wizard.can_go_back() {
        body.push_str(&action_form(id, "back", "&larr;", "back", &[], false));
    }
    body.push_str(&format!(
        "<div><h1>Book an Appointment</h1><p>{}</p></div></div>",
        escape_html(wizard.subtitle())
    ));

    if !wizard.is_complete() {
        body.push_str("<div class=\"steps\">");
        for indicator in step_indicators(wizard.step()) {
            body.push_str(&format!(
                "<span class=\"{}\">{}</span>",
                if indicator.is_current { "current" } else { "" },
                escape_html(indicator.label)
            ));
        }
        body.push_str("</div>");
    }

    body.push_str("<div class=\"body\">");
    if let Some(message) = error {
        body.push_str(&format!(
            "<div class=\"alert\" role=\"alert\">{}</div>",
            escape_html(message)
        ));
    }
    if wizard.is_complete() {
        body.push_str(&render_confirmation(wizard));
    } else {
        match wizard.step() {
            BookingStep::Service => body.push_str(&render_service_step(wizard, ctx)),
            BookingStep::Date => body.push_str(&render_date_step(wizard, ctx)),
            BookingStep::Time => body.push_str(&render_time_step(wizard, ctx)),
            BookingStep::Payment => body.push_str(&render_payment_step(wizard, ctx, form)),
        }
    }
    body.push_str("</div></div>");

    layout("Book an Appointment - DripperScheduler", &body)
}

fn render_service_step(wizard: &BookingWizard, ctx: &PageContext<'_>) -> String {
    let id = wizard.id();
    let symbol = &ctx.settings.currency_symbol;
    let mut html = String::from("<div class=\"grid2\"><div><h3>Available Services</h3>");

    for service in catalog_view(ctx.catalog, symbol, Some(wizard)).services {
        let label = format!(
            "<span><strong>{}</strong><br><span class=\"muted\">{}</span></span>\
             <span><strong>{}</strong><br><span class=\"muted\">{} min</span></span>",
            escape_html(&service.name),
            escape_html(&service.description),
            escape_html(&service.price_label),
            service.duration_minutes
        );
        let class = if service.is_selected { "service selected" } else { "service" };
        html.push_str(&format!(
            "<div>{}</div>",
            action_form(id, "services", &label, class, &[("service_id", &service.id)], false)
        ));
    }

    html.push_str("</div><div><h3>Selected Services</h3>");
    if wizard.selected_services().is_empty() {
        html.push_str("<div class=\"empty\">No services selected yet</div>");
    } else {
        for service in wizard.selected_services() {
            let remove = action_form(
                id,
                &format!("services/{}/remove", service.id),
                "&times;",
                "remove",
                &[],
                false,
            );
            html.push_str(&format!(
                "<div class=\"row\"><span><strong>{}</strong><br><span class=\"muted\">{} min</span></span>\
                 <span>{} {}</span></div>",
                escape_html(&service.name),
                service.duration_minutes,
                escape_html(&format_price(service.price_cents, symbol)),
                remove
            ));
        }
        html.push_str(&format!(
            "<div class=\"row\"><span class=\"muted\">Total Duration</span><span>{} min</span></div>\
             <div class=\"row\"><span class=\"muted\">Total Price</span><strong>{}</strong></div>",
            wizard.total_duration_minutes(),
            escape_html(&format_price(wizard.total_price_cents(), symbol))
        ));
        html.push_str(&action_form(
            id,
            "continue",
            "Continue to Date Selection &rarr;",
            "primary",
            &[],
            false,
        ));
    }
    html.push_str("</div></div>");
    html
}

fn render_day(id: Uuid, day: &CalendarDay) -> String {
    let mut class = String::from("day");
    if day.is_selected {
        class.push_str(" selected");
    } else if day.is_today {
        class.push_str(" today");
    }
    if !day.is_current_month {
        class.push_str(" other-month");
    }
    if day.is_past {
        class.push_str(" past");
    }
    let label = format!(
        "<small>{}</small><br><strong>{}</strong>",
        day.date.format("%a"),
        day.date.day()
    );
    let value = day.date.format("%Y-%m-%d").to_string();
    format!(
        "<div>{}</div>",
        action_form(id, "date", &label, &class, &[("date", &value)], !day.is_selectable())
    )
}

fn render_date_step(wizard: &BookingWizard, ctx: &PageContext<'_>) -> String {
    let id = wizard.id();
    let view = wizard.calendar(ctx.today);
    let mut html = format!(
        "<div class=\"row\"><h2>{}</h2><span>{} {}</span></div><div class=\"calendar\">",
        escape_html(&view.title),
        action_form(id, "calendar/previous", "&lsaquo;", "nav", &[], false),
        action_form(id, "calendar/next", "&rsaquo;", "nav", &[], false)
    );
    for weekday in &view.weekdays {
        html.push_str(&format!("<div class=\"muted\" style=\"text-align:center\">{}</div>", weekday));
    }
    for day in &view.days {
        html.push_str(&render_day(id, day));
    }
    html.push_str("</div>");
    html
}

fn render_time_step(wizard: &BookingWizard, ctx: &PageContext<'_>) -> String {
    let id = wizard.id();
    let mut html = String::from("<h2>Select a Time</h2>");
    match wizard.available_slots(ctx.settings) {
        Ok(slots) if !slots.is_empty() => {
            html.push_str("<div class=\"slots\">");
            for slot in slots {
                let value = slot.time.format("%H:%M").to_string();
                html.push_str(&format!(
                    "<div>{}</div>",
                    action_form(id, "time", &escape_html(&slot.label), "slot", &[("time", &value)], false)
                ));
            }
            html.push_str("</div>");
        }
        _ => html.push_str("<div class=\"empty\">No time slots available for this date</div>"),
    }
    html
}

fn render_payment_step(
    wizard: &BookingWizard,
    ctx: &PageContext<'_>,
    form: Option<&PaymentForm>,
) -> String {
    let Some(order) = wizard.order_summary() else {
        return String::from("<div class=\"empty\">Booking is missing a service, date or time</div>");
    };
    let symbol = &ctx.settings.currency_symbol;
    let total = format_price(order.total_price_cents, symbol);
    let name = form.map(|f| f.name.as_str()).unwrap_or_default();
    let email = form.map(|f| f.email.as_str()).unwrap_or_default();
    let expiry = form.map(|f| f.expiry_date.as_str()).unwrap_or_default();

    format!(
        "<h2>Appointment Summary</h2>\
         <div class=\"row\"><span class=\"muted\">Service</span><span>{services}</span></div>\
         <div class=\"row\"><span class=\"muted\">Date</span><span>{date}</span></div>\
         <div class=\"row\"><span class=\"muted\">Time</span><span>{time}</span></div>\
         <div class=\"row\"><span class=\"muted\">Total Amount</span><strong>{total}</strong></div>\
         <h2>Payment Details</h2>\
         <form method=\"post\" action=\"{path}/payment\">\
         <label for=\"name\">Full Name</label><input type=\"text\" id=\"name\" name=\"name\" required value=\"{name}\">\
         <label for=\"email\">Email</label><input type=\"email\" id=\"email\" name=\"email\" required value=\"{email}\">\
         <label for=\"card_number\">Card Number</label><input type=\"text\" id=\"card_number\" name=\"card_number\" required placeholder=\"1234 5678 9012 3456\" autocomplete=\"cc-number\">\
         <div class=\"grid2\"><div><label for=\"expiry_date\">Expiry Date</label><input type=\"text\" id=\"expiry_date\" name=\"expiry_date\" required placeholder=\"MM/YY\" value=\"{expiry}\"></div>\
         <div><label for=\"cvv\">CVV</label><input type=\"text\" id=\"cvv\" name=\"cvv\" required placeholder=\"123\" autocomplete=\"cc-csc\"></div></div>\
         <p><button type=\"submit\" class=\"primary\">Pay {total}</button></p></form>",
        services = escape_html(&order.service_names),
        date = escape_html(&format_long_date(order.date)),
        time = escape_html(&order.slot.label),
        total = escape_html(&total),
        path = booking_path(wizard.id()),
        name = escape_html(name),
        email = escape_html(email),
        expiry = escape_html(expiry),
    )
}

fn render_confirmation(wizard: &BookingWizard) -> String {
    let reference = wizard
        .receipt()
        .map(|r| {
            format!(
                "<p class=\"muted\">Reference: <strong>{}</strong></p>",
                escape_html(&r.reference)
            )
        })
        .unwrap_or_default();
    format!(
        "<div class=\"confirmation\"><h2>Booking Confirmed!</h2>\
         <p>Your appointment has been successfully booked. You will receive a confirmation email shortly.</p>\
         {}{}</div>",
        reference,
        action_form(wizard.id(), "reset", "Book Another Appointment", "primary", &[], false)
    )
}

// --- Handlers ---

fn status_of(err: &BookingError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn error_response(err: &BookingError) -> Response {
    let status = status_of(err);
    if status.is_server_error() {
        warn!(error = %err, "Booking page failed");
    }
    (status, Html(render_error(status, &err.to_string()))).into_response()
}

fn context(state: &BookingState) -> PageContext<'_> {
    PageContext {
        settings: &state.settings,
        catalog: &state.catalog,
        today: state.today(),
    }
}

/// Session id of a page route. Rejections render the HTML error page.
pub struct PageSession(pub Uuid);

impl FromRequestParts<Arc<BookingState>> for PageSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<BookingState>,
    ) -> Result<Self, Self::Rejection> {
        SessionPath::from_request_parts(parts, state)
            .await
            .map(|SessionPath(id)| PageSession(id))
            .map_err(|err| error_response(&err))
    }
}

pub struct PageServicePath(pub ServicePath);

impl FromRequestParts<Arc<BookingState>> for PageServicePath {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<BookingState>,
    ) -> Result<Self, Self::Rejection> {
        ServicePath::from_request_parts(parts, state)
            .await
            .map(PageServicePath)
            .map_err(|err| error_response(&err))
    }
}

/// Redirects back to the booking page, or re-renders it with the error.
async fn respond(
    state: &BookingState,
    id: Uuid,
    result: Result<BookingWizard, BookingError>,
    form: Option<&PaymentForm>,
) -> Response {
    let err = match result {
        Ok(_) => return Redirect::to(&booking_path(id)).into_response(),
        Err(err) => err,
    };
    match err {
        BookingError::SessionNotFound(_)
        | BookingError::MalformedSessionId(_)
        | BookingError::Disabled
        | BookingError::Config(_) => {
            error_response(&err)
        }
        _ => match state.load(id).await {
            Ok(wizard) => (
                status_of(&err),
                Html(render_booking_page(
                    &wizard,
                    &context(state),
                    Some(&err.to_string()),
                    form,
                )),
            )
                .into_response(),
            Err(load_err) => error_response(&load_err),
        },
    }
}

pub async fn landing_page() -> Html<String> {
    Html(render_landing())
}

pub async fn start_booking_page(State(state): State<Arc<BookingState>>) -> Response {
    match state.start_session().await {
        Ok(wizard) => Redirect::to(&booking_path(wizard.id())).into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn booking_page(
    State(state): State<Arc<BookingState>>,
    PageSession(id): PageSession,
) -> Response {
    match state.load(id).await {
        Ok(wizard) => Html(render_booking_page(&wizard, &context(&state), None, None)).into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn select_service_action(
    State(state): State<Arc<BookingState>>,
    PageSession(id): PageSession,
    form: Result<Form<SelectServiceRequest>, FormRejection>,
) -> Response {
    let service = form_payload(form).and_then(|payload| state.service(&payload.service_id));
    let result = match service {
        Ok(service) => {
            state
                .apply(id, "select_service", |w| w.select_service(service))
                .await
        }
        Err(err) => Err(err),
    };
    respond(&state, id, result, None).await
}

pub async fn remove_service_action(
    State(state): State<Arc<BookingState>>,
    PageServicePath(ServicePath {
        session: id,
        service_id,
    }): PageServicePath,
) -> Response {
    let result = state
        .apply(id, "remove_service", |w| w.remove_service(&service_id))
        .await;
    respond(&state, id, result, None).await
}

pub async fn continue_action(
    State(state): State<Arc<BookingState>>,
    PageSession(id): PageSession,
) -> Response {
    let result = state
        .apply(id, "continue", BookingWizard::continue_to_date)
        .await;
    respond(&state, id, result, None).await
}

pub async fn previous_month_action(
    State(state): State<Arc<BookingState>>,
    PageSession(id): PageSession,
) -> Response {
    let result = state
        .apply(id, "previous_month", BookingWizard::show_previous_month)
        .await;
    respond(&state, id, result, None).await
}

pub async fn next_month_action(
    State(state): State<Arc<BookingState>>,
    PageSession(id): PageSession,
) -> Response {
    let result = state
        .apply(id, "next_month", BookingWizard::show_next_month)
        .await;
    respond(&state, id, result, None).await
}

pub async fn select_date_action(
    State(state): State<Arc<BookingState>>,
    PageSession(id): PageSession,
    form: Result<Form<SelectDateRequest>, FormRejection>,
) -> Response {
    let today = state.today();
    let result = match form_payload(form).and_then(|payload| parse_date(&payload.date)) {
        Ok(date) => {
            state
                .apply(id, "select_date", |w| w.select_date(date, today))
                .await
        }
        Err(err) => Err(err),
    };
    respond(&state, id, result, None).await
}

pub async fn select_time_action(
    State(state): State<Arc<BookingState>>,
    PageSession(id): PageSession,
    form: Result<Form<SelectTimeRequest>, FormRejection>,
) -> Response {
    let result = match form_payload(form).and_then(|payload| parse_time(&payload.time)) {
        Ok(time) => {
            state
                .apply(id, "select_time", |w| w.select_time(time, &state.settings))
                .await
        }
        Err(err) => Err(err),
    };
    respond(&state, id, result, None).await
}

pub async fn payment_action(
    State(state): State<Arc<BookingState>>,
    PageSession(id): PageSession,
    form: Result<Form<PaymentForm>, FormRejection>,
) -> Response {
    let form = match form_payload(form) {
        Ok(form) => form,
        Err(err) => return respond(&state, id, Err(err), None).await,
    };
    let result = state
        .apply(id, "payment", |w| {
            w.complete_payment(&form, Utc::now()).map(|_| ())
        })
        .await;
    respond(&state, id, result, Some(&form)).await
}

pub async fn back_action(State(state): State<Arc<BookingState>>, PageSession(id): PageSession) -> Response {
    let result = state.apply(id, "back", BookingWizard::back).await;
    respond(&state, id, result, None).await
}

pub async fn next_action(State(state): State<Arc<BookingState>>, PageSession(id): PageSession) -> Response {
    let result = state.apply(id, "next", BookingWizard::next).await;
    respond(&state, id, result, None).await
}

pub async fn previous_action(
    State(state): State<Arc<BookingState>>,
    PageSession(id): PageSession,
) -> Response {
    let result = state.apply(id, "previous", BookingWizard::previous).await;
    respond(&state, id, result, None).await
}

pub async fn reset_action(State(state): State<Arc<BookingState>>, PageSession(id): PageSession) -> Response {
    let today = state.today();
    let result = state
        .apply(id, "reset", |w| {
            w.reset(today);
            Ok(())
        })
        .await;
    respond(&state, id, result, None).await
}
