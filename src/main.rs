//! Monthly rollover action: create certificates for every active contract for
//! the previous calendar month and recalculate their line items.

use dotenvy::dotenv;
use salary_engine::{
    config,
    core::generate::{generate_for_period, previous_month, recalculate_all},
    errors::Result,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Non-fatal: env vars can be set externally
    dotenv().ok();

    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized");

    match config::templates::load_default_config() {
        Ok(template_config) => {
            let seeded = config::templates::seed_templates(&db, &template_config).await?;
            if seeded > 0 {
                info!(seeded, "Seeded contract templates from templates.toml");
            }
        }
        Err(error) => warn!(%error, "No template config loaded, continuing without seeding"),
    }

    let period = previous_month(chrono::Utc::now().date_naive());
    info!(start = %period.start, end = %period.end, "Generating certificates for the previous month");

    let report = generate_for_period(&db, period).await?;
    info!(
        created = report.created_count(),
        rejected = report.rejected_count(),
        "Certificate generation finished"
    );
    for outcome in &report.outcomes {
        if let Err(errors) = &outcome.result {
            warn!(contract = outcome.contract_number, %errors, "Contract skipped");
        }
    }

    let recalculation = recalculate_all(&db, &report.created_ids()).await?;
    info!(
        recalculated = recalculation.recalculated.len(),
        skipped = recalculation.skipped.len(),
        "Recalculation finished"
    );

    Ok(())
}
