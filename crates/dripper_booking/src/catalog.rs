// --- File: crates/dripper_booking/src/catalog.rs ---
use dripper_config::{BookingConfig, ServiceConfig};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A bookable service. Prices are kept in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Service {
    #[cfg_attr(feature = "openapi", schema(example = "1"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Haircut & Style"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub duration_minutes: i64,
    #[cfg_attr(feature = "openapi", schema(example = 4500))]
    pub price_cents: i64,
    pub description: String,
}

impl Service {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        duration_minutes: i64,
        price_cents: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration_minutes,
            price_cents,
            description: description.into(),
        }
    }
}

impl From<&ServiceConfig> for Service {
    fn from(config: &ServiceConfig) -> Self {
        Service::new(
            config.id.clone(),
            config.name.clone(),
            config.duration_minutes,
            config.price_cents,
            config.description.clone(),
        )
    }
}

/// The fixed list of services offered by the shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    /// Uses the configured services, or the built-in list when none are configured.
    pub fn from_config(config: &BookingConfig) -> Self {
        if config.services.is_empty() {
            Self::default()
        } else {
            Self::new(config.services.iter().map(Service::from).collect())
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn find(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::new(vec![
            Service::new(
                "1",
                "Haircut & Style",
                30,
                4500,
                "Professional haircut and styling service",
            ),
            Service::new(
                "2",
                "Hair Color",
                120,
                12000,
                "Full hair coloring service with premium products",
            ),
            Service::new(
                "3",
                "Hair Treatment",
                60,
                8500,
                "Deep conditioning and treatment service",
            ),
        ])
    }
}

/// Formats a price for display: whole amounts drop the cents ("$45"),
/// everything else keeps two decimals ("$45.50").
pub fn format_price(cents: i64, currency_symbol: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    if cents % 100 == 0 {
        format!("{}{}{}", sign, currency_symbol, cents / 100)
    } else {
        format!("{}{}{}.{:02}", sign, currency_symbol, cents / 100, cents % 100)
    }
}
