//! Platform Projections CLI
//!
//! Loads the monthly inputs, derives the series for a month range and scenario
//! set, and writes the comparison and rate verification tables.

use anyhow::{bail, Context, Result};
use clap::Parser;
use platform_projections::{
    export::{export_all, ExportOptions},
    interpolation::STANDARD_ANCHOR_MONTHS,
    parameters::DEFAULT_INPUTS_PATH,
    scenario::{ScenarioPolicy, ScenarioRunner},
    EngineConfig,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "platform-projections", version, about = "Project monthly platform metrics from anchor-month inputs")]
struct Args {
    /// Monthly inputs CSV (InputType, Month, Value)
    #[arg(long, default_value = DEFAULT_INPUTS_PATH)]
    inputs: PathBuf,

    /// Directory for the generated tables
    #[arg(long, default_value = "validation_output")]
    output_dir: PathBuf,

    #[arg(long, default_value_t = 1)]
    start_month: u32,

    #[arg(long, default_value_t = 36)]
    end_month: u32,

    /// Scenarios for the monthly series
    #[arg(long, value_delimiter = ',', default_value = "Base,High_10,Low_10")]
    scenarios: Vec<String>,

    /// Months for the comparison and rate tables (default: anchor months)
    #[arg(long, value_delimiter = ',')]
    compare_months: Vec<u32>,

    /// Multiplier for the Custom scenario
    #[arg(long)]
    custom_multiplier: Option<f64>,

    /// Month used for the console scenario check
    #[arg(long, default_value_t = 12)]
    verify_month: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.start_month == 0 || args.start_month > args.end_month {
        bail!("invalid month range {}..={}", args.start_month, args.end_month);
    }

    println!("Platform Projections v{}", env!("CARGO_PKG_VERSION"));
    println!("==========================\n");

    let mut config = EngineConfig::standard();
    if let Some(multiplier) = args.custom_multiplier {
        config.scenarios = ScenarioPolicy::standard()
            .with_custom_multiplier(multiplier)
            .context("invalid --custom-multiplier")?;
    }

    let runner = ScenarioRunner::from_csv_path(&args.inputs, config)
        .with_context(|| format!("failed to load inputs from {}", args.inputs.display()))?;

    let table = runner.engine().interpolator().table();
    println!("Loaded {} input types from {}", table.len(), args.inputs.display());
    if table.duplicates() > 0 {
        println!("  ({} duplicate rows ignored, first value kept)", table.duplicates());
    }

    let compare_months = if args.compare_months.is_empty() {
        STANDARD_ANCHOR_MONTHS.to_vec()
    } else {
        args.compare_months.clone()
    };

    let options = ExportOptions {
        start_month: args.start_month,
        end_month: args.end_month,
        scenarios: args.scenarios.clone(),
        compare_months,
        compare_scenarios: ScenarioPolicy::comparison_set(),
    };

    let summary = export_all(&runner, &options, &args.output_dir)
        .with_context(|| format!("failed to export to {}", args.output_dir.display()))?;

    println!("\nScenario check, month {} (only accounts should differ):", args.verify_month);
    println!("{:>10} {:>14} {:>14} {:>12} {:>12}", "Scenario", "TotalAccounts", "ACHinPerActive", "ACHinRate", "ActiveShare");
    println!("{}", "-".repeat(66));
    for check in runner.scenario_verification(args.verify_month, &args.scenarios) {
        println!(
            "{:>10} {:>14.0} {:>14.2} {:>12.4} {:>11.1}%",
            check.scenario,
            check.total_accounts,
            check.ach_in_per_active,
            check.ach_in_rate,
            check.active_share * 100.0,
        );
    }

    println!("\nResults written to {}:", args.output_dir.display());
    for file in &summary.files {
        println!("  {}", file);
    }
    println!("  {} series rows, {} comparison rows", summary.series_rows, summary.comparison_rows);

    Ok(())
}
