//! `userload run` command.

use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::context::ServiceContext;
use crate::load::{run_load, LoadPlan, RunSummary};

/// Execute the `run` command.
///
/// # Errors
///
/// Returns an error string if the settings are invalid, the replay cassette
/// cannot be loaded, a request cycle fails, or the cassette cannot be written.
pub fn run(args: &RunArgs) -> Result<RunSummary, String> {
    let settings = args.resolve()?;
    info!(endpoint = %settings.endpoint, "resolved target");

    let ctx = match (&args.record, &args.replay) {
        (Some(path), _) => ServiceContext::recording(settings.endpoint, path),
        (None, Some(path)) => ServiceContext::replaying_names(settings.endpoint, path)?,
        (None, None) => ServiceContext::live(settings.endpoint),
    };

    run_with_context(ctx, settings.plan)
}

/// Execute a load run on the given context.
///
/// The run is driven on a current-thread runtime so requests never overlap.
/// A recording context writes its cassette even when the run fails.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start, a request cycle
/// fails, or the cassette cannot be written.
pub fn run_with_context(ctx: ServiceContext, mut plan: LoadPlan) -> Result<RunSummary, String> {
    let capped = ctx.cap_iterations(plan.iterations);
    if capped < plan.iterations {
        warn!(requested = plan.iterations, available = capped, "not enough recorded names");
        plan.iterations = capped;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    let result = runtime.block_on(run_load(&ctx, &plan));

    let finished = ctx.finish();
    if let Ok(Some(path)) = &finished {
        eprintln!("Recording saved to: {}", path.display());
    }

    let summary = result.map_err(|e| e.to_string())?;
    finished?;
    Ok(summary)
}
