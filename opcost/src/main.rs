use anyhow::{Context, Result};
use clap::Parser;
use opcost::{Cli, Command, ComparisonReport, Config, Pipeline, Reporter, TerminalReporter};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

// Single-threaded: only file I/O suspends, never a timed trial.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load_from(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");

    let mut pipeline = Pipeline::new(config);

    match cli.command {
        Command::Run { keep, system_info } => {
            if !keep {
                eprintln!("Preparing output directory...");
                pipeline
                    .reset_output()
                    .await
                    .context("Failed to prepare output directory")?;
            }

            eprintln!("Running benchmarks...");
            let report = pipeline.run_all().await.context("Failed to run benchmarks")?;
            print_report(&report)?;

            if system_info {
                write_system_info(&pipeline).await;
            }
        }
        Command::Series { workload } => {
            eprintln!("Running {workload} series...");
            let outcome = pipeline
                .run_series(workload)
                .await
                .with_context(|| format!("Failed to run {workload} series"))?;
            if outcome.skipped() > 0 {
                warn!(
                    skipped = outcome.skipped(),
                    "Some trials were not persisted"
                );
            }
        }
        Command::Compare => {
            eprintln!("Analyzing results...");
            let report = pipeline
                .compare()
                .await
                .context("Failed to compare series")?;
            print_report(&report)?;
        }
        Command::SystemInfo => {
            let path = pipeline.config().output.system_info_path();
            let info = pipeline
                .write_system_info()
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print!("{info}");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "opcost=debug,opcost_harness=debug,opcost_core=debug"
    } else {
        "opcost=info,opcost_harness=info,opcost_core=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &ComparisonReport) -> Result<()> {
    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    TerminalReporter::new().report(report, &mut writer)?;
    Ok(())
}

/// System information is auxiliary; failing to write it never fails the run.
async fn write_system_info(pipeline: &Pipeline) {
    let path = pipeline.config().output.system_info_path();
    match pipeline.write_system_info().await {
        Ok(_) => info!(path = %path.display(), "System information saved"),
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to write system information"),
    }
}
