// --- File: crates/dripper_booking/src/extract.rs ---
//! Request extractors that report failures as [`BookingError`].
//!
//! The path and JSON extractors check the runtime flag first, so a disabled
//! module answers 503 whatever the request looks like.

use axum::{
    extract::{rejection::FormRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Form, Json,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::BookingError;
use crate::handlers::BookingState;

async fn path_params(
    parts: &mut Parts,
    state: &Arc<BookingState>,
) -> Result<HashMap<String, String>, BookingError> {
    state.ensure_enabled()?;
    let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|rejection| BookingError::InvalidRequest(rejection.body_text()))?;
    Ok(params)
}

fn session_id(params: &HashMap<String, String>) -> Result<Uuid, BookingError> {
    let raw = params
        .get("id")
        .ok_or_else(|| BookingError::InvalidRequest("missing session id".to_string()))?;
    Uuid::parse_str(raw).map_err(|_| BookingError::MalformedSessionId(raw.clone()))
}

/// The `{id}` segment of a session route. Ids that are not UUIDs cannot
/// name a session and answer 404.
#[derive(Debug, Clone, Copy)]
pub struct SessionPath(pub Uuid);

impl FromRequestParts<Arc<BookingState>> for SessionPath {
    type Rejection = BookingError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<BookingState>,
    ) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await?;
        session_id(&params).map(SessionPath)
    }
}

/// `{id}` and `{service_id}` of the remove-service routes.
#[derive(Debug, Clone)]
pub struct ServicePath {
    pub session: Uuid,
    pub service_id: String,
}

impl FromRequestParts<Arc<BookingState>> for ServicePath {
    type Rejection = BookingError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<BookingState>,
    ) -> Result<Self, Self::Rejection> {
        let mut params = path_params(parts, state).await?;
        let session = session_id(&params)?;
        let service_id = params
            .remove("service_id")
            .ok_or_else(|| BookingError::InvalidRequest("missing service id".to_string()))?;
        Ok(ServicePath {
            session,
            service_id,
        })
    }
}

/// JSON body whose rejections render as the shared error body.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T> FromRequest<Arc<BookingState>> for ApiJson<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = BookingError;

    async fn from_request(req: Request, state: &Arc<BookingState>) -> Result<Self, Self::Rejection> {
        state.ensure_enabled()?;
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| BookingError::InvalidRequest(rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}

/// Turns a form rejection into a [`BookingError`], so the pages can
/// re-render with the message instead of axum's plain-text body.
pub fn form_payload<T>(form: Result<Form<T>, FormRejection>) -> Result<T, BookingError> {
    form.map(|Form(value)| value)
        .map_err(|rejection| BookingError::InvalidRequest(rejection.body_text()))
}
