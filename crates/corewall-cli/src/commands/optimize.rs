use crate::cli::OptimizeArgs;
use crate::config::{self, AppConfig};
use crate::error::{CliError, Result};
use crate::io;
use crate::report;
use crate::utils::progress::CliProgressHandler;
use corewall::engine::progress::ProgressReporter;
use corewall::workflows::optimize::{self, OptimizationResult, Termination};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

pub async fn run(args: OptimizeArgs) -> Result<()> {
    info!("Resolving optimizer configuration...");
    let AppConfig {
        input_path,
        output_path,
        optimizer,
    } = config::build_config(&args)?;

    let profile = io::read_profile(&input_path)?;

    let cancel = Arc::new(AtomicBool::new(false));
    let signal_flag = cancel.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; finishing the current generation.");
            signal_flag.store(true, Ordering::Relaxed);
        }
    });

    println!(
        "Optimizing {} stories (population {}, up to {} generations)...",
        profile.len(),
        optimizer.search.population_size,
        optimizer.search.max_generations
    );
    info!("Invoking the core optimization workflow...");

    let workflow_cancel = cancel.clone();
    let result: OptimizationResult = tokio::task::spawn_blocking(move || {
        let progress_handler = CliProgressHandler::new();
        let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
        optimize::run_with_cancel(&profile, &optimizer, &reporter, &workflow_cancel)
    })
    .await
    .map_err(|e| CliError::Other(anyhow::anyhow!("Optimization task failed: {}", e)))??;
    signal_task.abort();

    if result.termination == Termination::Cancelled {
        println!("Optimization cancelled; reporting the best design found so far.");
    }
    if !result.capacity.passes() {
        warn!(
            governing_dcr = result.capacity.governing_dcr(),
            "Best design does not satisfy every capacity check."
        );
    }

    println!();
    print!("{}", report::optimization_summary(&result));

    if let Some(path) = output_path {
        io::write_schedule(&path, &result.schedule, &result.capacity)?;
        println!("✓ Section schedule written to: {}", path.display());
    }

    Ok(())
}
