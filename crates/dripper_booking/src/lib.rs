// --- File: crates/dripper_booking/src/lib.rs ---
pub mod calendar;
#[cfg(test)]
mod calendar_proptest;
pub mod catalog;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod logic;
pub mod pages;
pub mod payment;
pub mod routes;
pub mod settings;
pub mod slots;
pub mod store;
pub mod wizard;
#[cfg(test)]
mod wizard_test;

pub use catalog::{Service, ServiceCatalog};
pub use error::BookingError;
pub use handlers::BookingState;
pub use routes::{page_routes, routes};
pub use settings::BookingSettings;
pub use wizard::{BookingStep, BookingWizard};
