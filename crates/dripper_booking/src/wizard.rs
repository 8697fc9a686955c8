// --- File: crates/dripper_booking/src/wizard.rs ---
//! The four-step booking flow: service, date, time, payment.
//!
//! Every operation checks the current step first and leaves the wizard
//! untouched when it returns an error.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::calendar::{first_of_month, month_grid, next_month, previous_month, MonthView};
use crate::catalog::Service;
use crate::error::BookingError;
use crate::payment::{process_payment, OrderSummary, PaymentForm, PaymentReceipt};
use crate::settings::BookingSettings;
use crate::slots::{find_slot, slots_for_date, TimeSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum BookingStep {
    Service,
    Date,
    Time,
    Payment,
}

impl BookingStep {
    pub const ALL: [BookingStep; 4] = [
        BookingStep::Service,
        BookingStep::Date,
        BookingStep::Time,
        BookingStep::Payment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStep::Service => "service",
            BookingStep::Date => "date",
            BookingStep::Time => "time",
            BookingStep::Payment => "payment",
        }
    }

    /// Label shown in the step indicator.
    pub fn label(&self) -> &'static str {
        match self {
            BookingStep::Service => "Select Service",
            BookingStep::Date => "Choose Date",
            BookingStep::Time => "Pick Time",
            BookingStep::Payment => "Payment",
        }
    }

    /// Subtitle shown under the page header.
    pub fn subtitle(&self) -> &'static str {
        match self {
            BookingStep::Service => "Select one or more services to continue",
            BookingStep::Date => "Choose a date for your appointment",
            BookingStep::Time => "Select an available time slot",
            BookingStep::Payment => "Review and complete your booking",
        }
    }

    pub fn previous(&self) -> Option<BookingStep> {
        match self {
            BookingStep::Service => None,
            BookingStep::Date => Some(BookingStep::Service),
            BookingStep::Time => Some(BookingStep::Date),
            BookingStep::Payment => Some(BookingStep::Time),
        }
    }

    pub fn next(&self) -> Option<BookingStep> {
        match self {
            BookingStep::Service => Some(BookingStep::Date),
            BookingStep::Date => Some(BookingStep::Time),
            BookingStep::Time => Some(BookingStep::Payment),
            BookingStep::Payment => None,
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const CONFIRMATION_SUBTITLE: &str = "Booking Confirmation";

#[derive(Debug, Clone)]
pub struct BookingWizard {
    id: Uuid,
    step: BookingStep,
    selected_services: Vec<Service>,
    selected_date: Option<NaiveDate>,
    selected_time: Option<TimeSlot>,
    current_month: NaiveDate,
    receipt: Option<PaymentReceipt>,
    created_at: DateTime<Utc>,
}

impl BookingWizard {
    pub fn new(today: NaiveDate, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), today, now)
    }

    pub fn with_id(id: Uuid, today: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            step: BookingStep::Service,
            selected_services: Vec::new(),
            selected_date: None,
            selected_time: None,
            current_month: first_of_month(today),
            receipt: None,
            created_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn selected_services(&self) -> &[Service] {
        &self.selected_services
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<&TimeSlot> {
        self.selected_time.as_ref()
    }

    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn receipt(&self) -> Option<&PaymentReceipt> {
        self.receipt.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_complete(&self) -> bool {
        self.receipt.is_some()
    }

    pub fn can_go_back(&self) -> bool {
        self.step != BookingStep::Service && !self.is_complete()
    }

    pub fn subtitle(&self) -> &'static str {
        if self.is_complete() {
            CONFIRMATION_SUBTITLE
        } else {
            self.step.subtitle()
        }
    }

    pub fn is_service_selected(&self, service_id: &str) -> bool {
        self.selected_services.iter().any(|s| s.id == service_id)
    }

    pub fn total_duration_minutes(&self) -> i64 {
        self.selected_services
            .iter()
            .map(|s| s.duration_minutes)
            .sum()
    }

    pub fn total_price_cents(&self) -> i64 {
        self.selected_services.iter().map(|s| s.price_cents).sum()
    }

    /// Selected service names in selection order, comma separated.
    pub fn service_names(&self) -> String {
        self.selected_services
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Everything needed to take payment, once service, date and time are chosen.
    pub fn order_summary(&self) -> Option<OrderSummary> {
        if self.selected_services.is_empty() {
            return None;
        }
        let date = self.selected_date?;
        let slot = self.selected_time.clone()?;
        Some(OrderSummary {
            service_names: self.service_names(),
            total_duration_minutes: self.total_duration_minutes(),
            total_price_cents: self.total_price_cents(),
            date,
            slot,
        })
    }

    /// The month grid shown on the date step.
    pub fn calendar(&self, today: NaiveDate) -> MonthView {
        month_grid(self.current_month, today, self.selected_date)
    }

    /// Available slots for the selected date.
    pub fn available_slots(&self, settings: &BookingSettings) -> Result<Vec<TimeSlot>, BookingError> {
        let date = self.selected_date.ok_or(BookingError::NoDateSelected)?;
        Ok(slots_for_date(date, settings))
    }

    // --- Service step ---

    /// Adds `service` to the selection. Selecting it again is a no-op.
    pub fn select_service(&mut self, service: Service) -> Result<(), BookingError> {
        self.ensure_step(BookingStep::Service)?;
        if !self.is_service_selected(&service.id) {
            self.selected_services.push(service);
        }
        Ok(())
    }

    pub fn remove_service(&mut self, service_id: &str) -> Result<(), BookingError> {
        self.ensure_step(BookingStep::Service)?;
        self.selected_services.retain(|s| s.id != service_id);
        Ok(())
    }

    pub fn continue_to_date(&mut self) -> Result<(), BookingError> {
        self.ensure_step(BookingStep::Service)?;
        if self.selected_services.is_empty() {
            return Err(BookingError::NoServicesSelected);
        }
        self.step = BookingStep::Date;
        Ok(())
    }

    // --- Date step ---

    pub fn show_previous_month(&mut self) -> Result<(), BookingError> {
        self.ensure_step(BookingStep::Date)?;
        self.current_month = previous_month(self.current_month);
        Ok(())
    }

    pub fn show_next_month(&mut self) -> Result<(), BookingError> {
        self.ensure_step(BookingStep::Date)?;
        self.current_month = next_month(self.current_month);
        Ok(())
    }

    /// Picks `date` and moves to the time step. Days before `today` are rejected.
    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), BookingError> {
        self.ensure_step(BookingStep::Date)?;
        if date < today {
            return Err(BookingError::PastDate(date));
        }
        self.selected_date = Some(date);
        self.current_month = first_of_month(date);
        self.step = BookingStep::Time;
        Ok(())
    }

    // --- Time step ---

    /// Picks one of the generated slots for the selected date and moves to payment.
    pub fn select_time(
        &mut self,
        time: NaiveTime,
        settings: &BookingSettings,
    ) -> Result<(), BookingError> {
        self.ensure_step(BookingStep::Time)?;
        let date = self.selected_date.ok_or(BookingError::NoDateSelected)?;
        let slot = find_slot(date, time, settings).ok_or(BookingError::UnavailableTime(time))?;
        self.selected_time = Some(slot);
        self.step = BookingStep::Payment;
        Ok(())
    }

    // --- Payment step ---

    pub fn complete_payment(
        &mut self,
        form: &PaymentForm,
        now: DateTime<Utc>,
    ) -> Result<&PaymentReceipt, BookingError> {
        self.ensure_step(BookingStep::Payment)?;
        let order = self.order_summary().ok_or(BookingError::IncompleteBooking)?;
        let receipt = process_payment(form, order, now)?;
        Ok(&*self.receipt.insert(receipt))
    }

    // --- Navigation ---

    /// Goes one step back and clears the selection made on the step being left.
    ///
    /// Leaving the date step clears the services, leaving the time step clears
    /// the date and leaving the payment step clears the time.
    pub fn back(&mut self) -> Result<(), BookingError> {
        self.ensure_not_complete()?;
        match self.step {
            BookingStep::Service => {}
            BookingStep::Date => self.selected_services.clear(),
            BookingStep::Time => self.selected_date = None,
            BookingStep::Payment => self.selected_time = None,
        }
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        Ok(())
    }

    /// Advances one step when the current step's requirement is met, otherwise
    /// stays put.
    pub fn next(&mut self) -> Result<(), BookingError> {
        self.ensure_not_complete()?;
        let ready = match self.step {
            BookingStep::Service => !self.selected_services.is_empty(),
            BookingStep::Date => self.selected_date.is_some(),
            BookingStep::Time => self.selected_time.is_some(),
            BookingStep::Payment => false,
        };
        if ready {
            if let Some(next) = self.step.next() {
                self.step = next;
            }
        }
        Ok(())
    }

    /// Goes one step back without clearing anything.
    pub fn previous(&mut self) -> Result<(), BookingError> {
        self.ensure_not_complete()?;
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        Ok(())
    }

    /// Clears everything and returns to the service step.
    pub fn reset(&mut self, today: NaiveDate) {
        self.step = BookingStep::Service;
        self.selected_services.clear();
        self.selected_date = None;
        self.selected_time = None;
        self.current_month = first_of_month(today);
        self.receipt = None;
    }

    fn ensure_not_complete(&self) -> Result<(), BookingError> {
        if self.is_complete() {
            Err(BookingError::AlreadyComplete)
        } else {
            Ok(())
        }
    }

    fn ensure_step(&self, expected: BookingStep) -> Result<(), BookingError> {
        self.ensure_not_complete()?;
        if self.step != expected {
            return Err(BookingError::WrongStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }
}
