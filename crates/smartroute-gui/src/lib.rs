//! SmartRoute GUI module using eframe/egui
//!
//! This module provides the graphical user interface for SmartRoute using eframe 0.33.

pub mod app;
pub mod async_bridge;
pub mod dialogs;
pub mod state;
pub mod tasks;
pub mod ui_state;
pub mod widgets;

/// Main entry point for the GUI
pub fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([860.0, 620.0])
            .with_resizable(true)
            .with_title("SmartRoute"),
        ..Default::default()
    };

    eframe::run_native(
        "SmartRoute",
        native_options,
        Box::new(|cc| {
            Ok(Box::new(app::SmartRouteApp::new(cc)))
        }),
    )
    .map_err(|e| format!("{:?}", e))
    .map_err(|e| Box::new(std::io::Error::new(std::io::ErrorKind::Other, e)) as Box<dyn std::error::Error + Send + Sync>)?;

    Ok(())
}
