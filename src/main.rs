//! goldcalc CLI.
//!
//! Usage:
//!   cargo run -- [OPTIONS]
//!
//! Examples:
//!   cargo run                                # Sample: 4 owned, 50 other three-costs gone
//!   cargo run -- --owned 2 --claimed 3       # Custom board state
//!   cargo run -- --sweep all                 # Gold curves for the stock sweeps
//!   cargo run -- --simulate 5000 --seed 42   # Monte Carlo cross-check

use anyhow::{bail, Context};
use goldcalc::build_info;
use goldcalc::estimator::{estimate, EstimatorConfig};
use goldcalc::simulator::{run_simulation, SimConfig, SimReport};
use goldcalc::sweep::{run_sweep, SweepParameter, SweepReport};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Default)]
struct CliOptions {
    config_path: Option<PathBuf>,
    /// (flag, value) pairs applied on top of the base config, in order
    overrides: Vec<(String, String)>,
    sweeps: Vec<SweepParameter>,
    simulate: Option<u32>,
    seed: Option<u64>,
    json: bool,
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return Ok(());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", build_info::version_string());
        return Ok(());
    }

    let options = parse_args(&args)?;
    init_tracing(options.verbose);

    if let Err(e) = run(&options) {
        error!(error = %e, "goldcalc failed");
        return Err(e);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "goldcalc=debug"
    } else {
        "goldcalc=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(options: &CliOptions) -> anyhow::Result<()> {
    let mut base = match &options.config_path {
        Some(path) => load_config(path)?,
        None => EstimatorConfig::default(),
    };
    for (flag, value) in &options.overrides {
        apply_override(&mut base, flag, value)?;
    }

    // Bare invocation answers the stock question
    let target = if options.config_path.is_none() && options.overrides.is_empty() {
        sample_config()
    } else {
        base.clone()
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                   GOLD TO MAX RANK                            ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();

    let outcome = estimate(&target)?;
    println!("{}", outcome);
    println!();

    let mut sweeps: Vec<SweepReport> = Vec::new();
    for parameter in &options.sweeps {
        info!(parameter = parameter.cli_name(), "running sweep");
        let report = run_sweep(&base, *parameter, &parameter.default_values())?;
        println!("{}", report.to_text());
        sweeps.push(report);
    }

    let mut simulation: Option<SimReport> = None;
    if let Some(num_runs) = options.simulate {
        let sim = SimConfig {
            seed: options.seed,
            verbosity: if options.verbose { 2 } else { 1 },
            ..SimConfig::with_runs(num_runs)
        };
        println!("Running {} simulated sessions...", num_runs);
        println!();
        let report = run_simulation(&target, &sim)?;
        println!("{}", report.to_text());
        simulation = Some(report);
    }

    if options.json {
        let json = serde_json::json!({
            "config": target,
            "outcome": outcome,
            "sweeps": sweeps,
            "simulation": simulation,
        });
        let filename = format!(
            "goldcalc_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        let body = serde_json::to_string_pretty(&json).context("serializing report")?;
        std::fs::write(&filename, body).with_context(|| format!("writing {}", filename))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

/// Four copies in hand, nobody else on the unit, fifty other three-costs gone.
fn sample_config() -> EstimatorConfig {
    EstimatorConfig {
        owned_copies: 4,
        claimed_target_copies: 0,
        claimed_other_same_cost: 50,
        ..Default::default()
    }
}

fn load_config(path: &Path) -> anyhow::Result<EstimatorConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn apply_override(config: &mut EstimatorConfig, flag: &str, value: &str) -> anyhow::Result<()> {
    let count = || -> anyhow::Result<u32> {
        value
            .parse()
            .with_context(|| format!("{} expects a whole number, got {:?}", flag, value))
    };

    match flag {
        "--owned" => config.owned_copies = count()?,
        "--claimed" => config.claimed_target_copies = count()?,
        "--claimed-other" => config.claimed_other_same_cost = count()?,
        "--reroll-cost" => config.reroll_cost = count()?,
        "--unit-cost" => config.unit_cost = count()?,
        "--units" => config.distinct_units_in_tier = count()?,
        "--copies" => config.copies_per_unit_type = count()?,
        "--slots" => config.slots_per_attempt = count()?,
        "--max-rank" => config.copies_for_max_rank = count()?,
        "--tier-prob" => {
            config.cost_tier_probability = value
                .parse()
                .with_context(|| format!("--tier-prob expects a number, got {:?}", value))?
        }
        _ => bail!("unknown option {}", flag),
    }
    Ok(())
}

const FIELD_FLAGS: [&str; 10] = [
    "--owned",
    "--claimed",
    "--claimed-other",
    "--reroll-cost",
    "--unit-cost",
    "--tier-prob",
    "--units",
    "--copies",
    "--slots",
    "--max-rank",
];

fn parse_args(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions::default();

    let mut i = 1;
    while i < args.len() {
        let arg = args[i].as_str();
        let next = args.get(i + 1);

        match arg {
            _ if FIELD_FLAGS.contains(&arg) => {
                let value = next.with_context(|| format!("{} needs a value", arg))?;
                options.overrides.push((arg.to_string(), value.clone()));
                i += 1;
            }
            "-c" | "--config" => {
                let value = next.context("--config needs a file path")?;
                options.config_path = Some(PathBuf::from(value));
                i += 1;
            }
            "--sweep" => {
                let value = next.context("--sweep needs a parameter")?;
                if value == "all" {
                    options.sweeps.extend(SweepParameter::ALL);
                } else {
                    let parameter = SweepParameter::from_cli_name(value)
                        .with_context(|| format!("unknown sweep parameter {:?}", value))?;
                    options.sweeps.push(parameter);
                }
                i += 1;
            }
            "--simulate" => {
                let runs = next.and_then(|v| v.parse::<u32>().ok());
                options.simulate = Some(runs.unwrap_or(SimConfig::default().num_runs));
                if runs.is_some() {
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                let value = next.context("--seed needs a value")?;
                options.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("--seed expects a number, got {:?}", value))?,
                );
                i += 1;
            }
            "--json" => options.json = true,
            "-v" | "--verbose" => options.verbose = true,
            _ => bail!("unknown option {} (see --help)", arg),
        }
        i += 1;
    }

    Ok(options)
}

fn print_help() {
    println!("goldcalc - expected gold to take a unit to max rank");
    println!();
    println!("USAGE:");
    println!("    goldcalc [OPTIONS]");
    println!();
    println!("BOARD STATE:");
    println!("    --owned <N>          Copies you already own (default: 0)");
    println!("    --claimed <N>        Copies held by other players (default: 0)");
    println!("    --claimed-other <N>  Other same-cost units held by others (default: 0)");
    println!();
    println!("POOL AND SHOP:");
    println!("    --tier-prob <P>      Chance a slot rolls the tier (default: 0.40)");
    println!("    --units <N>          Distinct units in the tier (default: 13)");
    println!("    --copies <N>         Copies of each unit in the pool (default: 18)");
    println!("    --slots <N>          Slots per reroll (default: 5)");
    println!("    --max-rank <N>       Copies needed for max rank (default: 9)");
    println!("    --reroll-cost <N>    Gold per reroll (default: 2)");
    println!("    --unit-cost <N>      Gold per copy (default: 3)");
    println!();
    println!("OUTPUT:");
    println!("    -c, --config <FILE>  Load a JSON config; flags override it");
    println!("    --sweep <P>          Sweep owned | claimed | claimed-other | all");
    println!("    --simulate [N]       Monte Carlo cross-check (default: 10000 runs)");
    println!("    -s, --seed <S>       Seed for reproducible simulation");
    println!("    --json               Save a JSON report");
    println!("    -v, --verbose        Log every acquisition step");
    println!("    -V, --version        Show version");
    println!("    -h, --help           Show this help");
    println!();
    println!("With no board-state options, prints the sample: 4 owned, 50 other units gone.");
    println!("Set RUST_LOG to tune logging, e.g. RUST_LOG=goldcalc=debug.");
}
