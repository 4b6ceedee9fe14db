//! Controller state for the SmartRoute GUI.
//!
//! [`AppState`] owns the view mode, the lifecycle of the last asynchronous
//! operation, and the session credential. It is deliberately free of egui
//! types so the transition rules can be exercised headlessly.

use smartroute_core::{
    ApiError, Credential, CredentialStore, FileConfig, GenerationResult, SavedRouteSummary,
};
use tracing::{debug, warn};

/// Identity of one asynchronous operation.
///
/// Every submit and every History visit mints a fresh token; a completion
/// carrying anything but the token of the operation currently in flight is
/// discarded, so a late response can never populate an unrelated screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpToken(u64);

/// Which top-level screen is displayed. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Home,
    Prospect,
    Route,
    History,
}

/// Lifecycle of the generation request on the active screen.
///
/// Loading/Success/Error are only meaningful while the view is Prospect or
/// Route; navigation resets to Idle.
#[derive(Clone, Debug)]
pub enum RequestState {
    Idle,
    Loading { token: OpToken },
    Success { result: GenerationResult },
    Error { message: String },
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }
}

/// Lifecycle of the saved-routes fetch. Refetched on every History visit;
/// there is no cache invalidation beyond that.
#[derive(Clone, Debug)]
pub enum HistoryState {
    Idle,
    Loading { token: OpToken },
    Loaded { routes: Vec<SavedRouteSummary> },
    Error { message: String },
}

/// Domain state owned by the application controller.
pub struct AppState {
    pub config: FileConfig,
    pub view_mode: ViewMode,
    pub request: RequestState,
    pub history: HistoryState,
    credential: Option<Credential>,
    session: Box<dyn CredentialStore>,
    next_op: u64,
}

impl AppState {
    /// Build the initial state, reading the session store exactly once to
    /// decide between the authenticated and unauthenticated entry screens.
    pub fn new(config: FileConfig, session: Box<dyn CredentialStore>) -> Self {
        let credential = match session.load() {
            Ok(credential) => credential,
            Err(err) => {
                warn!(%err, "failed to read stored session; starting signed out");
                None
            }
        };

        Self {
            config,
            view_mode: ViewMode::Home,
            request: RequestState::Idle,
            history: HistoryState::Idle,
            credential,
            session,
            next_op: 0,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    fn mint_token(&mut self) -> OpToken {
        self.next_op += 1;
        OpToken(self.next_op)
    }

    /// Record a successful login, persisting the credential for the next run.
    pub fn complete_sign_in(&mut self, credential: Credential) {
        if let Err(err) = self.session.store(&credential) {
            warn!(%err, "failed to persist session credential");
        }
        self.credential = Some(credential);
        self.view_mode = ViewMode::Home;
        self.request = RequestState::Idle;
        self.history = HistoryState::Idle;
    }

    /// Clear the stored credential and return to the unauthenticated entry
    /// state, fully resetting the view.
    pub fn logout(&mut self) {
        if let Err(err) = self.session.clear() {
            warn!(%err, "failed to clear stored session credential");
        }
        self.credential = None;
        self.go_back();
    }

    /// Navigate from Home into one of the feature screens. The prior
    /// result/error is cleared. A History visit starts a fresh fetch and
    /// returns its token.
    pub fn select_view(&mut self, mode: ViewMode) -> Option<OpToken> {
        self.view_mode = mode;
        self.request = RequestState::Idle;
        if mode == ViewMode::History {
            let token = self.mint_token();
            self.history = HistoryState::Loading { token };
            Some(token)
        } else {
            self.history = HistoryState::Idle;
            None
        }
    }

    /// Back navigation: full reset to Home/Idle, not just a hidden result.
    pub fn go_back(&mut self) {
        self.view_mode = ViewMode::Home;
        self.request = RequestState::Idle;
        self.history = HistoryState::Idle;
    }

    /// Move the active screen into Loading for a new generation request.
    ///
    /// Returns `None` when a request is already in flight or the view has no
    /// generation semantics, in which case nothing must be spawned.
    pub fn begin_generation(&mut self) -> Option<OpToken> {
        if !matches!(self.view_mode, ViewMode::Prospect | ViewMode::Route) {
            return None;
        }
        if self.request.is_loading() {
            return None;
        }
        let token = self.mint_token();
        self.request = RequestState::Loading { token };
        Some(token)
    }

    /// Apply a generation outcome. Stale tokens are dropped; the return value
    /// tells the caller whether the outcome was used, so dependent UI state is
    /// only touched for the request actually in flight.
    pub fn apply_generation(
        &mut self,
        token: OpToken,
        outcome: Result<GenerationResult, ApiError>,
    ) -> bool {
        match self.request {
            RequestState::Loading { token: current } if current == token => {}
            _ => {
                debug!(?token, "dropping stale generation outcome");
                return false;
            }
        }

        self.request = match outcome {
            Ok(result) => RequestState::Success { result },
            Err(err) => RequestState::Error {
                message: err.display_message(),
            },
        };
        true
    }

    /// Apply a saved-routes fetch outcome. Stale tokens are dropped; returns
    /// whether the outcome was used.
    pub fn apply_history(
        &mut self,
        token: OpToken,
        outcome: Result<Vec<SavedRouteSummary>, ApiError>,
    ) -> bool {
        match self.history {
            HistoryState::Loading { token: current } if current == token => {}
            _ => {
                debug!(?token, "dropping stale history outcome");
                return false;
            }
        }

        self.history = match outcome {
            Ok(routes) => HistoryState::Loaded { routes },
            Err(err) => HistoryState::Error {
                message: err.display_message(),
            },
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartroute_core::{LeadCount, MemoryStore, SearchParams};

    fn signed_in_state() -> AppState {
        AppState::new(
            FileConfig::default(),
            Box::new(MemoryStore::with_credential("tok-1")),
        )
    }

    fn ok_result(text: &str) -> GenerationResult {
        GenerationResult {
            text: text.to_string(),
            locations: Vec::new(),
        }
    }

    #[test]
    fn stored_credential_selects_authenticated_entry_state() {
        let state = signed_in_state();
        assert!(state.is_authenticated());
        assert_eq!(state.view_mode, ViewMode::Home);
        assert!(matches!(state.request, RequestState::Idle));
    }

    #[test]
    fn missing_credential_starts_signed_out() {
        let state = AppState::new(FileConfig::default(), Box::new(MemoryStore::default()));
        assert!(!state.is_authenticated());
    }

    #[test]
    fn prospect_submit_with_successful_gateway_reaches_success() {
        let mut state = signed_in_state();
        // The validated params are what the form would emit upward.
        let params = SearchParams::new("Padarias", "Bauru, SP", LeadCount::Five).unwrap();
        assert_eq!(params.count.value(), 5);

        state.select_view(ViewMode::Prospect);
        let token = state.begin_generation().expect("token");
        state.apply_generation(token, Ok(ok_result("**ok**")));

        match &state.request {
            RequestState::Success { result } => assert_eq!(result.text, "**ok**"),
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[test]
    fn gateway_failure_sets_error_and_leaves_result_absent() {
        let mut state = signed_in_state();
        state.select_view(ViewMode::Route);
        let token = state.begin_generation().expect("token");
        state.apply_generation(token, Err(ApiError::Generation("model unavailable".into())));

        match &state.request {
            RequestState::Error { message } => assert!(!message.is_empty()),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn back_resets_to_home_idle_from_every_view() {
        for mode in [ViewMode::Prospect, ViewMode::Route, ViewMode::History] {
            let mut state = signed_in_state();
            state.select_view(mode);
            if let Some(token) = state.begin_generation() {
                state.apply_generation(token, Ok(ok_result("late")));
            }
            state.go_back();
            assert_eq!(state.view_mode, ViewMode::Home);
            assert!(matches!(state.request, RequestState::Idle));
            assert!(matches!(state.history, HistoryState::Idle));
        }
    }

    #[test]
    fn second_submit_while_loading_is_rejected() {
        let mut state = signed_in_state();
        state.select_view(ViewMode::Prospect);
        assert!(state.begin_generation().is_some());
        assert!(state.begin_generation().is_none());
    }

    #[test]
    fn late_outcome_after_navigation_is_discarded() {
        let mut state = signed_in_state();
        state.select_view(ViewMode::Prospect);
        let stale = state.begin_generation().expect("token");

        // User navigates away while the request is still in flight.
        state.go_back();
        state.select_view(ViewMode::Route);
        let fresh = state.begin_generation().expect("token");

        state.apply_generation(stale, Ok(ok_result("stale payload")));
        assert!(
            state.request.is_loading(),
            "stale outcome must not replace the in-flight request"
        );

        state.apply_generation(fresh, Ok(ok_result("fresh payload")));
        match &state.request {
            RequestState::Success { result } => assert_eq!(result.text, "fresh payload"),
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[test]
    fn navigation_into_other_views_does_not_spawn_generation() {
        let mut state = signed_in_state();
        assert!(state.select_view(ViewMode::Prospect).is_none());
        assert!(state.select_view(ViewMode::History).is_some());
        // Home has no generation semantics at all.
        state.go_back();
        assert!(state.begin_generation().is_none());
    }

    #[test]
    fn history_outcome_applies_only_to_current_visit() {
        let mut state = signed_in_state();
        let first = state.select_view(ViewMode::History).expect("token");
        state.go_back();
        let second = state.select_view(ViewMode::History).expect("token");

        state.apply_history(first, Ok(Vec::new()));
        assert!(matches!(state.history, HistoryState::Loading { .. }));

        state.apply_history(second, Ok(Vec::new()));
        assert!(matches!(state.history, HistoryState::Loaded { .. }));
    }

    #[test]
    fn apply_reports_whether_the_outcome_was_used() {
        let mut state = signed_in_state();

        // A late completion for an abandoned request must report unused, so
        // the caller leaves dependent UI state (save acknowledgment, history
        // detail selection) alone.
        state.select_view(ViewMode::Prospect);
        let stale = state.begin_generation().expect("token");
        state.go_back();
        assert!(!state.apply_generation(stale, Ok(ok_result("late"))));

        state.select_view(ViewMode::Prospect);
        let fresh = state.begin_generation().expect("token");
        assert!(state.apply_generation(fresh, Ok(ok_result("current"))));

        let old_visit = state.select_view(ViewMode::History).expect("token");
        state.go_back();
        let new_visit = state.select_view(ViewMode::History).expect("token");
        assert!(!state.apply_history(old_visit, Ok(Vec::new())));
        assert!(state.apply_history(new_visit, Ok(Vec::new())));
    }

    #[test]
    fn repeated_history_visits_yield_the_same_ordered_list() {
        let routes = vec![SavedRouteSummary {
            id: 3,
            title: "Rota - 10/06/2025 09:15".to_string(),
            route_data: "1. Rua A\n2. Rua B".to_string(),
            created_at: "2025-06-10T12:15:00Z".parse().unwrap(),
        }];

        let mut state = signed_in_state();
        let mut seen = Vec::new();
        for _ in 0..2 {
            let token = state.select_view(ViewMode::History).expect("token");
            state.apply_history(token, Ok(routes.clone()));
            match &state.history {
                HistoryState::Loaded { routes } => seen.push(routes.clone()),
                other => panic!("expected Loaded, got {other:?}"),
            }
            state.go_back();
        }
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn logout_clears_the_stored_credential() {
        let mut state = signed_in_state();
        state.logout();
        assert!(!state.is_authenticated());
        // A reload reads the same store and must land signed out.
        assert!(state.session.load().unwrap().is_none());
    }

    #[test]
    fn sign_in_persists_credential_for_the_next_run() {
        let mut state = AppState::new(FileConfig::default(), Box::new(MemoryStore::default()));
        state.complete_sign_in(Credential::new("tok-2"));
        assert!(state.is_authenticated());
        assert_eq!(
            state.session.load().unwrap(),
            Some(Credential::new("tok-2"))
        );
    }
}
