use gravsim::{ScenarioConfig, Scenario};
use gravsim::{run_to_sinks, ConsoleSink, CsvSink, PlotHook, StepSink};
use gravsim::bench_step_curve;
use gravsim::output::hook::DEFAULT_RESULTS_FILE;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Fixed-step Newtonian N-body simulator")]
struct Args {
    /// Scenario YAML; a bare name is also looked up under `scenarios/`.
    /// Without it the built-in Sun + eight planets roster is used
    #[arg(short, long)]
    file: Option<String>,

    /// Override the step size (seconds)
    #[arg(long)]
    dt: Option<f64>,

    /// Override the number of steps
    #[arg(long)]
    steps: Option<usize>,

    /// Results file, also passed to the --plot command as its last argument
    #[arg(short, long, default_value = DEFAULT_RESULTS_FILE)]
    output: PathBuf,

    /// Do not print the per-step position trace
    #[arg(short, long)]
    quiet: bool,

    /// Command run on the results file afterwards, e.g. "python3 plot_distances.py"
    #[arg(long)]
    plot: Option<String>,

    /// Print the step-time scaling curve and exit
    #[arg(long)]
    bench: bool,
}

fn resolve_scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let mut cfg = match &args.file {
        Some(file_name) => {
            let path = resolve_scenario_path(file_name);
            ScenarioConfig::from_path(&path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?
        }
        None => ScenarioConfig::solar_system(),
    };

    if let Some(dt) = args.dt {
        cfg.parameters.dt = dt;
    }
    if let Some(steps) = args.steps {
        cfg.parameters.steps = steps;
    }
    cfg.validate().context("invalid run parameters")?;

    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_step_curve();
        return Ok(());
    }

    let scenario_cfg = load_scenario(&args)?;
    info!(
        "loaded {} bodies, dt = {} s, {} steps",
        scenario_cfg.bodies.len(),
        scenario_cfg.parameters.dt,
        scenario_cfg.parameters.steps
    );

    let mut engine = Scenario::build_scenario(&scenario_cfg).into_engine();

    let mut csv = CsvSink::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut console = ConsoleSink::stdout();

    let summary = {
        let mut sinks: Vec<&mut dyn StepSink> = Vec::new();
        if !args.quiet {
            sinks.push(&mut console);
        }
        sinks.push(&mut csv);
        run_to_sinks(&mut engine, &mut sinks)?
    };
    info!(
        "wrote {} rows to {} (last day {:?})",
        summary.records,
        args.output.display(),
        summary.last_elapsed_days
    );

    if let Some(hook) = args.plot.as_deref().and_then(PlotHook::parse) {
        hook.run(&args.output);
    }

    Ok(())
}
