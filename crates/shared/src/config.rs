//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Billing configuration.
    #[serde(default)]
    pub billing: BillingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Billing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Currency all rent and light bill amounts are expressed in.
    #[serde(default = "default_currency")]
    pub currency: Currency,
    /// Electricity rate per meter unit offered by the payment form.
    #[serde(default = "default_rate_per_unit")]
    pub default_rate_per_unit: Decimal,
    /// Number of trailing months shown on the revenue chart.
    #[serde(default = "default_revenue_chart_months")]
    pub revenue_chart_months: u32,
}

fn default_currency() -> Currency {
    Currency::Inr
}

fn default_rate_per_unit() -> Decimal {
    Decimal::from(13)
}

fn default_revenue_chart_months() -> u32 {
    6
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            default_rate_per_unit: default_rate_per_unit(),
            revenue_chart_months: default_revenue_chart_months(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "banjara=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BANJARA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
