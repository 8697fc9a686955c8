// File: crates/dripper_booking/src/handlers.rs
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use dripper_common::is_booking_enabled;
use dripper_config::AppConfig;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::calendar::MonthView;
use crate::catalog::{Service, ServiceCatalog};
use crate::error::BookingError;
use crate::extract::{ApiJson, ServicePath, SessionPath};
use crate::logic::{
    catalog_view, parse_date, parse_time, wizard_view, CatalogResponse, SelectDateRequest,
    SelectServiceRequest, SelectTimeRequest, SlotsResponse, WizardView,
};
use crate::payment::PaymentForm;
use crate::settings::BookingSettings;
use crate::store::SessionStore;
use crate::wizard::BookingWizard;

// Shared state for the JSON API and the HTML pages.
#[derive(Debug)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub settings: BookingSettings,
    pub catalog: ServiceCatalog,
    pub store: SessionStore,
}

impl BookingState {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, BookingError> {
        dripper_config::validate(&config).map_err(|e| BookingError::Config(e.to_string()))?;
        let settings = BookingSettings::from_config(&config.booking)?;
        let catalog = ServiceCatalog::from_config(&config.booking);
        let store = SessionStore::new(settings.session_ttl);
        Ok(Self {
            config,
            settings,
            catalog,
            store,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.settings.today()
    }

    pub fn ensure_enabled(&self) -> Result<(), BookingError> {
        if is_booking_enabled(&self.config) {
            Ok(())
        } else {
            Err(BookingError::Disabled)
        }
    }

    pub fn service(&self, service_id: &str) -> Result<Service, BookingError> {
        self.catalog
            .find(service_id)
            .cloned()
            .ok_or_else(|| BookingError::UnknownService(service_id.to_string()))
    }

    pub fn view(&self, wizard: &BookingWizard) -> WizardView {
        wizard_view(wizard, &self.settings.currency_symbol)
    }

    /// Creates a fresh wizard session.
    pub async fn start_session(&self) -> Result<BookingWizard, BookingError> {
        self.ensure_enabled()?;
        let wizard = BookingWizard::new(self.today(), Utc::now());
        let id = self.store.create(wizard.clone()).await;
        info!(session_id = %id, "Booking session started");
        Ok(wizard)
    }

    pub async fn load(&self, id: Uuid) -> Result<BookingWizard, BookingError> {
        self.ensure_enabled()?;
        self.store.get(id).await
    }

    /// Runs one wizard operation against the stored session.
    pub async fn apply<F>(&self, id: Uuid, action: &str, f: F) -> Result<BookingWizard, BookingError>
    where
        F: FnOnce(&mut BookingWizard) -> Result<(), BookingError>,
    {
        self.ensure_enabled()?;
        let result = self.store.update(id, f).await;
        match &result {
            Ok((_, wizard)) => {
                debug!(session_id = %id, action, step = %wizard.step(), "Booking action applied")
            }
            Err(e) => debug!(session_id = %id, action, error = %e, "Booking action rejected"),
        }
        result.map(|(_, wizard)| wizard)
    }
}

type BookingResult<T> = Result<Json<T>, BookingError>;

// --- Catalog ---

#[axum::debug_handler]
pub async fn list_services_handler(
    State(state): State<Arc<BookingState>>,
) -> BookingResult<CatalogResponse> {
    state.ensure_enabled()?;
    Ok(Json(catalog_view(
        &state.catalog,
        &state.settings.currency_symbol,
        None,
    )))
}

// --- Sessions ---

#[axum::debug_handler]
pub async fn create_session_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<(StatusCode, Json<WizardView>), BookingError> {
    let wizard = state.start_session().await?;
    Ok((StatusCode::CREATED, Json(state.view(&wizard))))
}

#[axum::debug_handler]
pub async fn get_session_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
) -> BookingResult<WizardView> {
    let wizard = state.load(id).await?;
    Ok(Json(state.view(&wizard)))
}

#[axum::debug_handler]
pub async fn delete_session_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
) -> Result<StatusCode, BookingError> {
    state.ensure_enabled()?;
    state.store.remove(id).await?;
    info!(session_id = %id, "Booking session deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- Service step ---

#[axum::debug_handler]
pub async fn select_service_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
    ApiJson(payload): ApiJson<SelectServiceRequest>,
) -> BookingResult<WizardView> {
    let service = state.service(&payload.service_id)?;
    let wizard = state
        .apply(id, "select_service", |w| w.select_service(service))
        .await?;
    Ok(Json(state.view(&wizard)))
}

#[axum::debug_handler]
pub async fn remove_service_handler(
    State(state): State<Arc<BookingState>>,
    ServicePath {
        session: id,
        service_id,
    }: ServicePath,
) -> BookingResult<WizardView> {
    let wizard = state
        .apply(id, "remove_service", |w| w.remove_service(&service_id))
        .await?;
    Ok(Json(state.view(&wizard)))
}

#[axum::debug_handler]
pub async fn continue_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
) -> BookingResult<WizardView> {
    let wizard = state
        .apply(id, "continue", BookingWizard::continue_to_date)
        .await?;
    Ok(Json(state.view(&wizard)))
}

// --- Date step ---

#[axum::debug_handler]
pub async fn calendar_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
) -> BookingResult<MonthView> {
    let wizard = state.load(id).await?;
    Ok(Json(wizard.calendar(state.today())))
}

#[axum::debug_handler]
pub async fn previous_month_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
) -> BookingResult<MonthView> {
    let wizard = state
        .apply(id, "previous_month", BookingWizard::show_previous_month)
        .await?;
    Ok(Json(wizard.calendar(state.today())))
}

#[axum::debug_handler]
pub async fn next_month_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
) -> BookingResult<MonthView> {
    let wizard = state
        .apply(id, "next_month", BookingWizard::show_next_month)
        .await?;
    Ok(Json(wizard.calendar(state.today())))
}

#[axum::debug_handler]
pub async fn select_date_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
    ApiJson(payload): ApiJson<SelectDateRequest>,
) -> BookingResult<WizardView> {
    let date = parse_date(&payload.date)?;
    let today = state.today();
    let wizard = state
        .apply(id, "select_date", |w| w.select_date(date, today))
        .await?;
    Ok(Json(state.view(&wizard)))
}

// --- Time step ---

#[axum::debug_handler]
pub async fn slots_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
) -> BookingResult<SlotsResponse> {
    let wizard = state.load(id).await?;
    let date = wizard.selected_date().ok_or(BookingError::NoDateSelected)?;
    let slots = wizard.available_slots(&state.settings)?;
    Ok(Json(SlotsResponse { date, slots }))
}

#[axum::debug_handler]
pub async fn select_time_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
    ApiJson(payload): ApiJson<SelectTimeRequest>,
) -> BookingResult<WizardView> {
    let time = parse_time(&payload.time)?;
    let wizard = state
        .apply(id, "select_time", |w| w.select_time(time, &state.settings))
        .await?;
    Ok(Json(state.view(&wizard)))
}

// --- Payment step ---

#[axum::debug_handler]
pub async fn payment_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
    ApiJson(form): ApiJson<PaymentForm>,
) -> BookingResult<WizardView> {
    let wizard = state
        .apply(id, "payment", |w| {
            w.complete_payment(&form, Utc::now()).map(|_| ())
        })
        .await?;
    Ok(Json(state.view(&wizard)))
}

// --- Navigation ---

#[axum::debug_handler]
pub async fn back_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
) -> BookingResult<WizardView> {
    let wizard = state.apply(id, "back", BookingWizard::back).await?;
    Ok(Json(state.view(&wizard)))
}

#[axum::debug_handler]
pub async fn next_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
) -> BookingResult<WizardView> {
    let wizard = state.apply(id, "next", BookingWizard::next).await?;
    Ok(Json(state.view(&wizard)))
}

#[axum::debug_handler]
pub async fn previous_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
) -> BookingResult<WizardView> {
    let wizard = state.apply(id, "previous", BookingWizard::previous).await?;
    Ok(Json(state.view(&wizard)))
}

#[axum::debug_handler]
pub async fn reset_handler(
    State(state): State<Arc<BookingState>>,
    SessionPath(id): SessionPath,
) -> BookingResult<WizardView> {
    let today = state.today();
    let wizard = state
        .apply(id, "reset", |w| {
            w.reset(today);
            Ok(())
        })
        .await?;
    Ok(Json(state.view(&wizard)))
}
