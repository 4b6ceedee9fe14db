//! UI-specific state (ephemeral form buffers and panel toggles).

use std::collections::VecDeque;

use smartroute_core::LeadCount;

/// State that lives only for the current window session and never persists.
pub struct UiState {
    pub login: LoginForm,
    pub prospect: ProspectForm,
    pub route: RouteForm,
    pub result_panel: ResultPanel,
    pub history_panel: HistoryPanel,

    /// Technical log visibility
    pub technical_log_expanded: bool,

    /// Technical log entries (max 200)
    pub technical_log: VecDeque<LogEntry>,
}

impl UiState {
    pub fn new(reference_city: String) -> Self {
        Self {
            login: LoginForm::default(),
            prospect: ProspectForm::default(),
            route: RouteForm::new(reference_city),
            result_panel: ResultPanel::default(),
            history_panel: HistoryPanel::default(),
            technical_log_expanded: false,
            technical_log: VecDeque::with_capacity(200),
        }
    }

    /// Add a log entry, maintaining max 200 entries
    pub fn add_log_entry(&mut self, entry: LogEntry) {
        if self.technical_log.len() >= 200 {
            self.technical_log.pop_front();
        }
        self.technical_log.push_back(entry);
    }

    /// Fresh result-panel state for a newly displayed result.
    pub fn reset_result_panel(&mut self) {
        self.result_panel = ResultPanel::default();
    }
}

/// Login screen buffers. The same form covers login and registration.
#[derive(Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub register_mode: bool,
    pub pending: bool,
    pub error: Option<String>,
}

/// Prospecting form buffers.
pub struct ProspectForm {
    pub business_type: String,
    pub location: String,
    pub count: LeadCount,
    pub error: Option<String>,
}

impl Default for ProspectForm {
    fn default() -> Self {
        Self {
            business_type: String::new(),
            location: String::new(),
            count: LeadCount::default(),
            error: None,
        }
    }
}

/// Route planner buffers: dynamic address rows plus the reference city.
pub struct RouteForm {
    pub rows: Vec<String>,
    pub reference_city: String,
    pub error: Option<String>,
}

impl RouteForm {
    pub fn new(reference_city: String) -> Self {
        Self {
            rows: vec![String::new(), String::new()],
            reference_city,
            error: None,
        }
    }

    /// Replace the rows with imported addresses, keeping the two-row minimum.
    pub fn replace_rows(&mut self, mut addresses: Vec<String>) {
        if addresses.len() == 1 {
            addresses.push(String::new());
        }
        self.rows = addresses;
    }
}

/// Local state of the result display: the save acknowledgment flag.
#[derive(Default)]
pub struct ResultPanel {
    pub saving: bool,
    pub saved: bool,
}

/// Local state of the saved-routes browser: list vs. detail toggle.
#[derive(Default)]
pub struct HistoryPanel {
    pub selected: Option<usize>,
}

/// Technical log entry
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log level for coloring
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_imported_row_is_padded_to_the_two_row_minimum() {
        let mut form = RouteForm::new(String::new());
        form.replace_rows(vec!["Rua Única, 10".to_string()]);
        assert_eq!(form.rows.len(), 2);
        assert_eq!(form.rows[0], "Rua Única, 10");
        assert!(form.rows[1].is_empty());
    }

    #[test]
    fn imported_rows_replace_existing_rows() {
        let mut form = RouteForm::new("Bauru".to_string());
        form.rows = vec!["velho".to_string(), "conteúdo".to_string()];
        form.replace_rows(vec!["A".to_string(), "B".to_string(), "C".to_string()]);
        assert_eq!(form.rows, vec!["A", "B", "C"]);
        assert_eq!(form.reference_city, "Bauru");
    }
}
