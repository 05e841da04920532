//! Banjara ledger tool
//!
//! Builds a family's monthly ledger from a JSON records fixture and prints it.
//!
//! Usage: `banjara-ledger <records.json> <family-id> [as-of YYYY-MM-DD]`

use anyhow::{Context, bail};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use banjara_core::billing::{BillingService, InMemoryRecords};
use banjara_core::payment::PaymentDraft;
use banjara_core::reports::ReportService;
use banjara_shared::types::FamilyId;
use banjara_shared::{AppConfig, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let mut args = std::env::args().skip(1);
    let (Some(path), Some(family_id)) = (args.next(), args.next()) else {
        bail!("usage: banjara-ledger <records.json> <family-id> [as-of YYYY-MM-DD]");
    };
    let family_id: FamilyId = family_id.parse().context("Invalid family id")?;
    let as_of = match args.next() {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").context("Invalid as-of date")?,
        None => Utc::now().date_naive(),
    };

    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {path}"))?;
    let records = InMemoryRecords::from_json(&raw).with_context(|| format!("Invalid records in {path}"))?;
    info!(%path, families = records.families.len(), payments = records.payments.len(), "Loaded records");

    let revenue = ReportService::revenue_chart(&records.payments, config.billing.revenue_chart_months, as_of);
    let service = BillingService::new(records);
    let ledger = service.monthly_ledger(family_id, as_of).await?;

    if !ledger.unmatched.is_empty() {
        warn!(count = ledger.unmatched.len(), "Some payments fall outside the tenancy");
    }

    // Pre-filled form for the most recent month still owing.
    let tenancy = service.tenancy(family_id).await?;
    let next_payment = ledger
        .entries
        .iter()
        .find_map(|entry| PaymentDraft::for_entry(&tenancy, entry, as_of, config.billing.default_rate_per_unit));

    let summary = ledger.summary(config.billing.currency);
    info!(
        %family_id,
        %as_of,
        months = summary.months,
        total_due = %summary.total_due,
        total_paid = %summary.total_paid,
        outstanding = %summary.outstanding,
        overdue_months = summary.overdue_months,
        "Ledger built"
    );

    let report = serde_json::json!({
        "familyId": family_id,
        "asOf": as_of,
        "summary": summary,
        "entries": ledger.entries,
        "unmatched": ledger.unmatched,
        "nextPayment": next_payment,
        "revenue": revenue.points,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Initializes tracing. `RUST_LOG` overrides the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
