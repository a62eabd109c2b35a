use anyhow::Context;
use clap::Parser;
use lineupopt::cli::{Cli, OutputFormat};
use lineupopt::infrastructure::{render_json, render_text};
use lineupopt::{Dataset, FileConfig, LineupOptimizer, SolverFactory, SolverService};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path).context("failed to load configuration")?,
        None => FileConfig::default(),
    };
    let settings = file_config
        .resolve(cli.overrides())
        .context("invalid configuration")?;

    let dataset = Dataset::load(&settings.data_csv).context("failed to load player data")?;

    if cli.list_years {
        for year in dataset.years() {
            println!("{}", year);
        }
        return Ok(());
    }

    let solver = SolverFactory::create(settings.solver.backend)
        .context("failed to create solver backend")?;
    info!("Using {} solver", solver.name());

    let optimizer = LineupOptimizer::new(solver).with_config(settings.solver.clone());
    let lineup = optimizer
        .optimize(dataset.records(), &settings.request)
        .with_context(|| {
            format!(
                "no lineup for {} in {} under ${}m",
                settings.request.stat, settings.request.year, settings.request.payroll
            )
        })?;

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&lineup)),
        OutputFormat::Json => println!(
            "{}",
            render_json(&lineup).context("failed to serialize lineup")?
        ),
    }

    Ok(())
}

/// Logs go to stderr so stdout only carries the lineup.
fn init_tracing(level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("lineupopt={},warn", level))
            .with_context(|| format!("invalid log level '{}'", level))?,
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
