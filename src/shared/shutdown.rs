//! Graceful shutdown handling
//!
//! A cloneable signal the HTTP server waits on, OS signal listeners that
//! trigger it, and a coordinator that bounds how long draining may take.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// Shutdown signal that can be cloned and shared across tasks
#[derive(Clone)]
pub struct ShutdownSignal {
    sender: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            sender,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Idempotent; only the first call notifies waiters.
    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            info!("Shutdown signal triggered");
            let _ = self.sender.send(());
        }
    }

    /// Resolves once shutdown has been triggered, including before this call.
    pub async fn wait(&self) {
        let mut rx = self.sender.subscribe();
        if self.is_triggered() {
            return;
        }
        let _ = rx.recv().await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Listen for OS shutdown signals (SIGTERM, SIGINT)
pub async fn listen_for_shutdown_signals(shutdown: ShutdownSignal) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = sigint.recv() => info!("Received SIGINT"),
                }
                shutdown.trigger();
                return;
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Failed to install unix signal handlers, falling back to Ctrl+C");
            }
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Received Ctrl+C");
            shutdown.trigger();
        }
        Err(e) => error!(error = %e, "Failed to listen for Ctrl+C"),
    }
}

/// Graceful shutdown coordinator
pub struct ShutdownCoordinator {
    signal: ShutdownSignal,
    timeout: Duration,
}

impl ShutdownCoordinator {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            signal: ShutdownSignal::new(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    pub fn start_signal_listener(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.signal.clone()));
    }

    /// Run `drain` to completion or until the shutdown timeout elapses.
    /// Returns `false` on timeout.
    pub async fn drain<F>(&self, drain: F) -> bool
    where
        F: Future<Output = ()>,
    {
        info!(timeout_secs = self.timeout.as_secs(), "Starting graceful shutdown");

        match tokio::time::timeout(self.timeout, drain).await {
            Ok(()) => {
                info!("Graceful shutdown completed");
                true
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Graceful shutdown timed out"
                );
                false
            }
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(30)
    }
}
