//! File and message dialog utilities

use std::path::PathBuf;

/// Pick a spreadsheet to import addresses from.
pub fn pick_spreadsheet() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Importar Planilha")
        .add_filter("Planilhas", &["xlsx", "xls"])
        .pick_file()
}

/// Blocking informational dialog.
pub fn info(title: &str, message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .show();
}

/// Blocking error dialog.
pub fn error(title: &str, message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .show();
}
