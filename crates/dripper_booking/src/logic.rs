// --- File: crates/dripper_booking/src/logic.rs ---
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::catalog::{format_price, Service, ServiceCatalog};
use crate::error::BookingError;
use crate::payment::{format_long_date, PaymentReceipt};
use crate::slots::TimeSlot;
use crate::wizard::{BookingStep, BookingWizard};

// --- DTOs ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SelectServiceRequest {
    #[cfg_attr(feature = "openapi", schema(example = "1"))]
    pub service_id: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SelectDateRequest {
    #[cfg_attr(feature = "openapi", schema(example = "2024-03-15"))]
    pub date: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SelectTimeRequest {
    #[cfg_attr(feature = "openapi", schema(example = "10:30"))]
    pub time: String,
}

/// A catalog entry as shown to the customer.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ServiceView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_minutes: i64,
    pub price_cents: i64,
    #[cfg_attr(feature = "openapi", schema(example = "$45"))]
    pub price_label: String,
    pub is_selected: bool,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CatalogResponse {
    pub services: Vec<ServiceView>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StepIndicator {
    pub step: BookingStep,
    pub label: &'static str,
    pub is_current: bool,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

/// Everything a client needs to draw the wizard.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WizardView {
    pub session_id: Uuid,
    pub step: BookingStep,
    #[cfg_attr(feature = "openapi", schema(example = "Select one or more services to continue"))]
    pub subtitle: &'static str,
    pub steps: Vec<StepIndicator>,
    pub can_go_back: bool,
    pub selected_services: Vec<ServiceView>,
    pub service_names: String,
    pub total_duration_minutes: i64,
    pub total_price_cents: i64,
    pub total_price_label: String,
    pub selected_date: Option<NaiveDate>,
    #[cfg_attr(feature = "openapi", schema(example = "March 15, 2024"))]
    pub selected_date_label: Option<String>,
    pub selected_time: Option<TimeSlot>,
    pub is_complete: bool,
    pub receipt: Option<PaymentReceipt>,
}

// --- Logic ---

pub fn service_view(service: &Service, currency_symbol: &str, is_selected: bool) -> ServiceView {
    ServiceView {
        id: service.id.clone(),
        name: service.name.clone(),
        description: service.description.clone(),
        duration_minutes: service.duration_minutes,
        price_cents: service.price_cents,
        price_label: format_price(service.price_cents, currency_symbol),
        is_selected,
    }
}

/// The catalog, with the entries already chosen in `wizard` flagged.
pub fn catalog_view(
    catalog: &ServiceCatalog,
    currency_symbol: &str,
    wizard: Option<&BookingWizard>,
) -> CatalogResponse {
    CatalogResponse {
        services: catalog
            .services()
            .iter()
            .map(|service| {
                let selected = wizard.is_some_and(|w| w.is_service_selected(&service.id));
                service_view(service, currency_symbol, selected)
            })
            .collect(),
    }
}

pub fn step_indicators(current: BookingStep) -> Vec<StepIndicator> {
    BookingStep::ALL
        .iter()
        .map(|step| StepIndicator {
            step: *step,
            label: step.label(),
            is_current: *step == current,
        })
        .collect()
}

pub fn wizard_view(wizard: &BookingWizard, currency_symbol: &str) -> WizardView {
    WizardView {
        session_id: wizard.id(),
        step: wizard.step(),
        subtitle: wizard.subtitle(),
        steps: step_indicators(wizard.step()),
        can_go_back: wizard.can_go_back(),
        selected_services: wizard
            .selected_services()
            .iter()
            .map(|s| service_view(s, currency_symbol, true))
            .collect(),
        service_names: wizard.service_names(),
        total_duration_minutes: wizard.total_duration_minutes(),
        total_price_cents: wizard.total_price_cents(),
        total_price_label: format_price(wizard.total_price_cents(), currency_symbol),
        selected_date: wizard.selected_date(),
        selected_date_label: wizard.selected_date().map(format_long_date),
        selected_time: wizard.selected_time().cloned(),
        is_complete: wizard.is_complete(),
        receipt: wizard.receipt().cloned(),
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(value.to_string()))
}

/// Parses `HH:MM`, also accepting `HH:MM:SS` as serialized by [`TimeSlot`].
pub fn parse_time(value: &str) -> Result<NaiveTime, BookingError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| BookingError::InvalidTime(value.to_string()))
}
