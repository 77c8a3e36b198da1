use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use cc_app::{
    AppResult, RunOptions, RunOverrides, RunProgressEvent, build_request,
    execute_run_with_progress, export_csv, list_runs, load_scenario, validate_scenario,
};
use cc_model::{ParameterOverrides, SimulationRow};
use cc_results::RunType;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "climate-calculus")]
#[command(about = "Climate Calculus - simplified CO2, temperature and sea-level projections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a projection and export it as CSV
    Run(RunArgs),
    /// Validate a scenario file
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// List cached runs in a run store
    Runs {
        /// Run store directory
        store_dir: PathBuf,
        /// Only list runs of this scenario
        #[arg(long)]
        scenario: Option<String>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Scenario file providing years, ensemble and parameters
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// First and last year, inclusive [default: 2020 2100]
    #[arg(long, num_args = 2, value_names = ["START", "END"], allow_negative_numbers = true)]
    years: Option<Vec<i32>>,
    /// Ensemble size; 0 runs a single projection [default: 0]
    #[arg(long, value_name = "N")]
    uncertainty: Option<usize>,
    /// Seed for ensemble draws
    #[arg(long)]
    seed: Option<u64>,
    /// Initial CO2 concentration in ppm [default: 420]
    #[arg(long)]
    c0: Option<f64>,
    /// Seasonal CO2 amplitude in ppm [default: 3]
    #[arg(long)]
    seasonal_amp: Option<f64>,
    /// Fractional CO2 growth per year
    #[arg(long)]
    r: Option<f64>,
    /// Equilibrium climate sensitivity in °C per doubling
    #[arg(long)]
    lambda_ecs: Option<f64>,
    /// Output CSV file
    #[arg(short, long, default_value = "climate_output.csv")]
    output: PathBuf,
    /// Number of rows to preview
    #[arg(long, default_value_t = 5)]
    preview: usize,
    /// Run store directory for caching results
    #[arg(long)]
    store: Option<PathBuf>,
    /// Skip cache and force re-run
    #[arg(long)]
    no_cache: bool,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => cmd_run(args),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Runs {
            store_dir,
            scenario,
        } => cmd_runs(&store_dir, scenario.as_deref()),
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = load_scenario(scenario_path)?;
    validate_scenario(&scenario)?;
    println!("✓ Scenario '{}' is valid", scenario.name);
    Ok(())
}

fn cmd_run(args: RunArgs) -> AppResult<()> {
    let scenario = args.scenario.as_deref().map(load_scenario).transpose()?;

    let overrides = RunOverrides {
        years: args.years.as_deref().and_then(|y| match y {
            [start, end] => Some((*start, *end)),
            _ => None,
        }),
        runs: args.uncertainty,
        seed: args.seed,
        parameters: ParameterOverrides {
            c0: args.c0,
            r: args.r,
            seasonal_amp: args.seasonal_amp,
            lambda_ecs: args.lambda_ecs,
            ..ParameterOverrides::default()
        },
    };
    let options = RunOptions {
        use_cache: !args.no_cache,
        store_dir: args.store.clone(),
    };
    let request = build_request(scenario.as_ref(), &overrides, options)?;

    println!(
        "Running scenario '{}' for {}-{}",
        request.scenario_name, request.year_start, request.year_end
    );

    let mut last_stage = None;
    let mut last_emit = Instant::now();
    let mut response = execute_run_with_progress(
        &request,
        Some(&mut |event: RunProgressEvent| {
            let emit_now =
                last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Projection completed: {}", response.run_id);
    }
    if let RunType::Ensemble { runs, seed, .. } = &response.manifest.run_type {
        println!("  Ensemble: {} runs, seed {}", runs, seed);
    }

    print_preview(response.table.head(args.preview));
    if let Some(last) = response.summary.as_ref().and_then(|s| s.last()) {
        println!(
            "\nYear {} across {} runs: Temp {:.3} ± {:.3} °C, SLR {:.2} ± {:.2} cm",
            last.year,
            last.members,
            last.temp.mean,
            last.temp.std_dev,
            last.slr.mean,
            last.slr.std_dev
        );
    }

    if let Some(elapsed) = export_csv(&response.table, &args.output)? {
        response.stats.export_time_s = elapsed;
    }
    println!(
        "✓ Wrote {} rows to {}",
        response.table.len(),
        args.output.display()
    );

    response.stats.print_summary();
    Ok(())
}

fn cmd_runs(store_dir: &Path, scenario: Option<&str>) -> AppResult<()> {
    let runs = list_runs(store_dir, scenario)?;

    if runs.is_empty() {
        println!("No cached runs in {}", store_dir.display());
        return Ok(());
    }

    println!("Cached runs:");
    for manifest in runs {
        let kind = match &manifest.run_type {
            RunType::Single => "single".to_string(),
            RunType::Ensemble { runs, seed, .. } => format!("ensemble ({} runs, seed {})", runs, seed),
        };
        println!(
            "  {}  {}  {}  {}-{}  {}",
            manifest.run_id,
            manifest.timestamp,
            manifest.scenario_name,
            manifest.year_start,
            manifest.year_end,
            kind
        );
    }
    Ok(())
}

fn print_preview(rows: &[SimulationRow]) {
    if rows.is_empty() {
        return;
    }
    let with_run = rows.iter().any(|r| r.run.is_some());
    if with_run {
        println!("{:>6} {:>10} {:>8} {:>9} {:>5}", "Year", "CO2", "Temp", "SLR", "Run");
    } else {
        println!("{:>6} {:>10} {:>8} {:>9}", "Year", "CO2", "Temp", "SLR");
    }
    for row in rows {
        print!(
            "{:>6} {:>10.3} {:>8.4} {:>9.3}",
            row.year, row.co2, row.temp, row.slr
        );
        match row.run {
            Some(run) => println!(" {:>5}", run.index()),
            None if with_run => println!(" {:>5}", "-"),
            None => println!(),
        }
    }
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    let detail = event.detail.as_deref().map(|d| format!(" ({})", d));
    print!(
        "\r[{:>6.2}s] {}{}",
        event.elapsed_s,
        event.stage,
        detail.unwrap_or_default()
    );
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(argv: &[&str]) -> RunArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(args) => args,
            _ => panic!("expected run subcommand"),
        }
    }

    #[test]
    fn negative_years_are_accepted() {
        let args = run_args(&["climate-calculus", "run", "--years", "-100", "50"]);
        assert_eq!(args.years, Some(vec![-100, 50]));
    }

    #[test]
    fn run_defaults() {
        let args = run_args(&["climate-calculus", "run"]);
        assert_eq!(args.years, None);
        assert_eq!(args.uncertainty, None);
        assert_eq!(args.output, PathBuf::from("climate_output.csv"));
        assert_eq!(args.preview, 5);
        assert!(!args.no_cache);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
