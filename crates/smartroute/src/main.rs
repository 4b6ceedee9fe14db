//! Main entry point for SmartRoute
//!
//! Initializes file logging, then hands control to the eframe event loop.
//! The GUI owns its own tokio runtime, so main stays synchronous.

use anyhow::Result;

use smartroute_core::logging::LoggingDestination;

fn main() -> Result<()> {
    if let Err(e) = smartroute_core::init_logging(LoggingDestination::FileOnly) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = smartroute_gui::run() {
        eprintln!("GUI error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
