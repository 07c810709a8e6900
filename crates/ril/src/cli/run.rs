//! Single sync and watch-mode execution.

use ril_core::{Config, Mirror, SyncSummary, TracingObserver};
use std::time::Duration;

use super::args::SyncArgs;
use crate::shutdown;

/// Run one sync, or keep syncing on an interval when `--daemonize` is set.
pub async fn execute(args: SyncArgs, config: Config) -> anyhow::Result<()> {
    let interval = args.interval.unwrap_or(config.daemon.interval_secs);
    let filter = args.filter();
    let mirror = Mirror::new(config, filter, &args.subreddit, &args.target_folder)?;

    tracing::info!(
        "Mirroring r/{} into {} (limit {}, sort {}, orientation {})",
        args.subreddit,
        mirror.folder().display(),
        filter.limit(),
        filter
            .sort()
            .map_or_else(|| "default".to_string(), |s| s.to_string()),
        filter
            .orientation()
            .map_or_else(|| "any".to_string(), |o| o.to_string()),
    );

    if !args.daemonize {
        let summary = mirror.run(&TracingObserver).await?;
        report(&summary);
        return Ok(());
    }

    let mut shutdown = shutdown::install_signal_handler();
    loop {
        match mirror.run(&TracingObserver).await {
            Ok(summary) => report(&summary),
            Err(e) => tracing::error!("Sync failed: {:#}", anyhow::Error::from(e)),
        }

        if shutdown.is_requested() {
            tracing::info!("Shutdown requested, exiting...");
            break;
        }
        tracing::info!("Waiting {} seconds...", interval);
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval)) => {}
            _ = shutdown.requested() => {
                tracing::info!("Shutdown during wait, exiting...");
                break;
            }
        }
    }

    Ok(())
}

fn report(summary: &SyncSummary) {
    tracing::info!(
        "Sync complete: {} images from {} page(s), {} downloaded, {} already present, {} removed",
        summary.collected,
        summary.pages_fetched,
        summary.downloaded,
        summary.skipped,
        summary.removed
    );
    if summary.download_failures > 0 || summary.remove_failures > 0 {
        tracing::warn!(
            "{} download(s) and {} removal(s) failed",
            summary.download_failures,
            summary.remove_failures
        );
    }
}
