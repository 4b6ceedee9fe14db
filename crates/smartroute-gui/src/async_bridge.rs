//! Async runtime bridge for running gateway calls behind egui.

use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::state::OpToken;
use smartroute_core::{ApiError, Credential, GenerationResult, SavedRouteSummary};

/// Completed outcome of a background gateway call, delivered back to the
/// main thread through the bridge channel.
#[derive(Debug)]
pub enum TaskOutcome {
    /// Login (or register-then-login) finished.
    AuthCompleted {
        result: Result<Credential, ApiError>,
    },
    /// A prospect or route generation request finished.
    GenerationCompleted {
        token: OpToken,
        result: Result<GenerationResult, ApiError>,
    },
    /// A History visit's saved-routes fetch finished.
    HistoryLoaded {
        token: OpToken,
        result: Result<Vec<SavedRouteSummary>, ApiError>,
    },
    /// A save-route request finished.
    RouteSaved { result: Result<(), ApiError> },
}

/// Bridge between the tokio runtime and the egui main thread.
///
/// Tasks are spawned on the owned runtime and report exactly one
/// [`TaskOutcome`]; the app polls the channel once per frame.
pub struct AsyncBridge {
    /// Tokio runtime for async operations (wrapped in Option for clean shutdown)
    runtime: Option<Runtime>,
    outcome_tx: mpsc::UnboundedSender<TaskOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<TaskOutcome>,
}

impl AsyncBridge {
    pub fn new() -> Self {
        let runtime = Runtime::new().expect("Failed to create tokio runtime");
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self {
            runtime: Some(runtime),
            outcome_tx,
            outcome_rx,
        }
    }

    /// Get the runtime handle for spawning tasks
    pub fn runtime(&self) -> &Runtime {
        self.runtime.as_ref().expect("Runtime has been shut down")
    }

    /// Sender handed to spawned tasks for reporting their outcome.
    pub fn sender(&self) -> mpsc::UnboundedSender<TaskOutcome> {
        self.outcome_tx.clone()
    }

    /// Drain pending outcomes, calling the handler for each.
    pub fn poll_outcomes<F>(&mut self, mut handler: F)
    where
        F: FnMut(TaskOutcome),
    {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            handler(outcome);
        }
    }
}

impl Default for AsyncBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AsyncBridge {
    fn drop(&mut self) {
        // Shutdown the runtime without blocking
        // This prevents the "Cannot drop a runtime in a context where blocking is not allowed" panic
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
