//! Fill a development database with demo members and a month of attendance
//!
//! Run with:
//! ```bash
//! cargo run -p gym-api --bin gym-seed            # current month
//! cargo run -p gym-api --bin gym-seed -- 2024 11
//! ```
//!
//! Uses the same environment as the server.

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use gym_common::{try_init_tracing, AppConfig, TracingConfig};
use gym_core::DateRange;
use gym_db::{create_pool, schema, seed, DatabaseConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Seeding failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<()> {
    if config.app.env.is_production() {
        bail!("Refusing to seed demo data into a production environment");
    }

    let schedule = &config.attendance.schedule;
    let today = schedule.local_date(&Utc::now());
    let month = month_from_args(std::env::args().skip(1), today)?;

    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .context("Failed to connect to database")?;
    schema::apply(&pool).await.context("Failed to apply schema")?;

    let plan = seed::plan_month(schedule, month, &mut rand::thread_rng());
    let report = seed::apply_plan(&pool, &plan).await?;

    info!(
        year = month.start().year(),
        month = month.start().month(),
        members = report.members,
        records = report.records,
        "Seeding complete"
    );
    Ok(())
}

/// `YEAR MONTH`, or the month containing `today` when no arguments are given
fn month_from_args(mut args: impl Iterator<Item = String>, today: NaiveDate) -> Result<DateRange> {
    match (args.next(), args.next(), args.next()) {
        (None, _, _) => Ok(DateRange::month_of(today)),
        (Some(year), Some(month), None) => {
            let year: i32 = year.parse().with_context(|| format!("Invalid year: {year}"))?;
            let month: u32 = month.parse().with_context(|| format!("Invalid month: {month}"))?;
            DateRange::month(year, month).with_context(|| format!("Month out of range: {month}"))
        }
        _ => bail!("Usage: gym-seed [YEAR MONTH]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| (*s).to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_month_from_args() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

        assert_eq!(
            month_from_args(args(&[]), today).unwrap(),
            DateRange::month(2024, 3).unwrap()
        );
        assert_eq!(
            month_from_args(args(&["2024", "11"]), today).unwrap(),
            DateRange::month(2024, 11).unwrap()
        );

        assert!(month_from_args(args(&["2024"]), today).is_err());
        assert!(month_from_args(args(&["2024", "13"]), today).is_err());
        assert!(month_from_args(args(&["last", "11"]), today).is_err());
        assert!(month_from_args(args(&["2024", "11", "extra"]), today).is_err());
    }
}
