//! # Ephemeral Store Instance
//!
//! One disposable store per test run: bind an OS-assigned port, serve on a
//! dedicated runtime thread, hand the caller the address to inject into
//! client configuration, and tear everything down on drop. This is the
//! explicit setup/teardown replacement for container lifecycle hooks.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::JoinHandle;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::info;

use crate::engine::Store;
use crate::server::serve;

/// Result type for store lifecycle operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from launching the ephemeral store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to bind the listener or build the runtime.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A running store instance that stops when dropped.
pub struct EphemeralStore {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl EphemeralStore {
    /// Binds 127.0.0.1 on an OS-assigned port and starts serving.
    pub fn launch() -> StoreResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        let listener = runtime.block_on(TcpListener::bind("127.0.0.1:0"))?;
        let addr = listener.local_addr()?;
        let store = Arc::new(Store::new());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = std::thread::Builder::new()
            .name("tkv-store".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    tokio::select! {
                        _ = serve(listener, store) => {}
                        _ = shutdown_rx => {}
                    }
                });
                // Dropping the runtime here aborts in-flight connection tasks.
            })?;

        info!(%addr, "ephemeral store started");
        Ok(EphemeralStore {
            addr,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    /// The address clients should be configured with, e.g. "127.0.0.1:49302".
    pub fn addr(&self) -> String {
        self.addr.to_string()
    }
}

impl Drop for EphemeralStore {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        info!(addr = %self.addr, "ephemeral store stopped");
    }
}

impl std::fmt::Debug for EphemeralStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemeralStore")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}
