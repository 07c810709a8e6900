//! Shutdown signal handling for watch mode.
//!
//! The first SIGINT (Ctrl+C) or SIGTERM marks shutdown as requested; the
//! running sync finishes and the loop exits. A second signal force-exits.

use tokio::sync::watch;

/// Observes whether a shutdown signal has arrived.
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown is requested.
    pub async fn requested(&mut self) {
        if self.rx.wait_for(|requested| *requested).await.is_err() {
            // Handler task is gone; no signal can arrive any more.
            std::future::pending::<()>().await;
        }
    }
}

/// Install signal listeners and return the matching [`Shutdown`] handle.
pub fn install_signal_handler() -> Shutdown {
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        let mut received = 0u32;
        loop {
            wait_for_signal().await;
            received += 1;
            if received == 1 {
                tracing::info!("Received shutdown signal, finishing current sync...");
                tracing::info!("Press Ctrl+C again to force exit");
                let _ = tx.send(true);
            } else {
                tracing::warn!("Force exit requested");
                std::process::exit(130);
            }
        }
    });

    Shutdown { rx }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(e) => {
            tracing::warn!("Cannot listen for SIGTERM: {}", e);
            ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    ctrl_c().await;
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
