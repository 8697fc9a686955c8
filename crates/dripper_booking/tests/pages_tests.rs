use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use dripper_booking::{page_routes, BookingSettings, BookingState};
use dripper_config::AppConfig;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let state = Arc::new(BookingState::new(Arc::new(AppConfig::default())).unwrap());
    page_routes(state)
}

struct Page {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

async fn request(app: &Router, method: Method, uri: &str, form: Option<&str>) -> Page {
    let builder = Request::builder().method(method).uri(uri);
    let request = match form {
        Some(form) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    Page {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

async fn start(app: &Router) -> String {
    let page = request(app, Method::GET, "/booking", None).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    page.location.unwrap()
}

#[tokio::test]
async fn landing_page_links_to_booking() {
    let page = request(&app(), Method::GET, "/", None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Welcome to DripperScheduler"));
    assert!(page.body.contains("Book your appointments easily and quickly"));
    assert!(page.body.contains("href=\"/booking\""));
}

#[tokio::test]
async fn booking_page_renders_service_step() {
    let app = app();
    let path = start(&app).await;
    assert!(path.starts_with("/booking/"));

    let page = request(&app, Method::GET, &path, None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<nav><a href=\"/\">DripperScheduler</a></nav>"));
    assert!(page.body.contains("Book an Appointment"));
    assert!(page.body.contains("Select one or more services to continue"));
    assert!(page.body.contains("Available Services"));
    assert!(page.body.contains("Haircut &amp; Style"));
    assert!(page.body.contains("No services selected yet"));
    assert!(!page.body.contains("/back\""));
}

#[tokio::test]
async fn form_posts_redirect_back_to_the_page() {
    let app = app();
    let path = start(&app).await;

    let page = request(&app, Method::POST, &format!("{path}/services"), Some("service_id=2")).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some(path.as_str()));

    let page = request(&app, Method::GET, &path, None).await;
    assert!(page.body.contains("Total Duration"));
    assert!(page.body.contains("120 min"));
    assert!(page.body.contains("Continue to Date Selection"));

    request(&app, Method::POST, &format!("{path}/continue"), None).await;
    let page = request(&app, Method::GET, &path, None).await;
    assert!(page.body.contains("Choose a date for your appointment"));
    assert!(page.body.contains("/back\""));
    assert!(page.body.contains(">Sun<"));

    let date = (BookingSettings::default().today() + Duration::days(2))
        .format("%Y-%m-%d")
        .to_string();
    let page = request(&app, Method::POST, &format!("{path}/date"), Some(&format!("date={date}"))).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);

    let page = request(&app, Method::GET, &path, None).await;
    assert!(page.body.contains("Select a Time"));
    assert!(page.body.contains("4:30 PM"));

    request(&app, Method::POST, &format!("{path}/time"), Some("time=11%3A00")).await;
    let page = request(&app, Method::GET, &path, None).await;
    assert!(page.body.contains("Appointment Summary"));
    assert!(page.body.contains("11:00 AM"));
    assert!(page.body.contains("Pay $120"));

    let page = request(
        &app,
        Method::POST,
        &format!("{path}/payment"),
        Some("name=Jane+Doe&email=jane%40example.com&card_number=4242+4242+4242+4242&expiry_date=12%2F28&cvv=123"),
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);

    let page = request(&app, Method::GET, &path, None).await;
    assert!(page.body.contains("Booking Confirmed!"));
    assert!(page.body.contains(
        "Your appointment has been successfully booked. You will receive a confirmation email shortly."
    ));
    assert!(page.body.contains("Book Another Appointment"));
    assert!(!page.body.contains("Pick Time"));

    request(&app, Method::POST, &format!("{path}/reset"), None).await;
    let page = request(&app, Method::GET, &path, None).await;
    assert!(page.body.contains("No services selected yet"));
}

#[tokio::test]
async fn rejected_post_rerenders_with_message() {
    let app = app();
    let path = start(&app).await;

    let page = request(&app, Method::POST, &format!("{path}/continue"), None).await;
    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("role=\"alert\""));
    assert!(page.body.contains("Select at least one service before continuing"));
    assert!(page.body.contains("Available Services"));
}

#[tokio::test]
async fn invalid_payment_keeps_contact_but_not_card() {
    let app = app();
    let path = start(&app).await;
    let date = (BookingSettings::default().today() + Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    request(&app, Method::POST, &format!("{path}/services"), Some("service_id=1")).await;
    request(&app, Method::POST, &format!("{path}/continue"), None).await;
    request(&app, Method::POST, &format!("{path}/date"), Some(&format!("date={date}"))).await;
    request(&app, Method::POST, &format!("{path}/time"), Some("time=09%3A00")).await;

    let page = request(
        &app,
        Method::POST,
        &format!("{path}/payment"),
        Some("name=%3Cb%3EJane%3C%2Fb%3E&email=jane%40example.com&card_number=9999888877776666&expiry_date=12%2F28&cvv=1"),
    )
    .await;
    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("cvv must be 3 or 4 digits"));
    assert!(page.body.contains("value=\"&lt;b&gt;Jane&lt;/b&gt;\""));
    assert!(page.body.contains("value=\"jane@example.com\""));
    assert!(!page.body.contains("9999888877776666"));
}

#[tokio::test]
async fn unknown_session_page_is_404() {
    let page = request(
        &app(),
        Method::GET,
        "/booking/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("Start a new booking"));
}

#[tokio::test]
async fn malformed_session_page_is_404() {
    let page = request(&app(), Method::GET, "/booking/not-a-uuid", None).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("<h1>404</h1>"));
    assert!(page.body.contains("Start a new booking"));

    let page = request(&app(), Method::POST, "/booking/not-a-uuid/services/1/remove", None).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_form_post_rerenders_with_message() {
    let app = app();
    let path = start(&app).await;

    let page = request(&app, Method::POST, &format!("{path}/services"), Some("")).await;
    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("role=\"alert\""));
    assert!(page.body.contains("missing field"));
    assert!(page.body.contains("Available Services"));

    let page = request(&app, Method::POST, &format!("{path}/date"), Some("")).await;
    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("missing field"));
}
