use dotenvy::dotenv;
use installment_planner::{
    config::{self, Settings},
    core::summary::format_schedule_summary,
    errors::Result,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Resolve settings and load the plan
    let settings = Settings::from_env(std::env::args().nth(1));
    let plan = config::load_plan(&settings.plan_path)
        .inspect(|_| info!("Loaded plan from {}", settings.plan_path.display()))
        .inspect_err(|e| error!("Failed to load plan: {}", e))?;

    // 4. Generate, pin and reconcile
    let (params, outcome) = plan
        .build_schedule()
        .inspect_err(|e| error!("Invalid schedule parameters: {}", e))?;

    if outcome.has_blocking_findings() {
        warn!(
            findings = outcome.findings.len(),
            "Schedule needs attention before it can be saved"
        );
    }

    print!("{}", format_schedule_summary(&outcome, &params)?);

    Ok(())
}
