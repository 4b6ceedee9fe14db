//! Background gateway calls.
//!
//! Each function spawns exactly one task on the bridge runtime and reports a
//! single [`TaskOutcome`]. The controller decides on the main thread whether
//! the outcome still applies (see [`crate::state::OpToken`]).

use crate::async_bridge::{AsyncBridge, TaskOutcome};
use crate::state::OpToken;
use smartroute_core::{ApiClient, Credential, RouteParams, SearchParams};

/// The two generation requests share one spawn path.
#[derive(Debug, Clone)]
pub enum GenerationRequest {
    Prospect(SearchParams),
    Route(RouteParams),
}

/// Sign in with existing credentials.
pub fn spawn_login(bridge: &AsyncBridge, client: ApiClient, username: String, password: String) {
    let tx = bridge.sender();
    bridge.runtime().spawn(async move {
        let result = client.login(&username, &password).await;
        let _ = tx.send(TaskOutcome::AuthCompleted { result });
    });
}

/// Create an account, then sign in with the same credentials.
///
/// Two sequential round trips with no atomicity: when login fails after a
/// successful registration the account exists and the user retries login.
pub fn spawn_register_and_login(
    bridge: &AsyncBridge,
    client: ApiClient,
    username: String,
    password: String,
) {
    let tx = bridge.sender();
    bridge.runtime().spawn(async move {
        let result = match client.register(&username, &password).await {
            Ok(()) => client.login(&username, &password).await,
            Err(err) => Err(err),
        };
        let _ = tx.send(TaskOutcome::AuthCompleted { result });
    });
}

/// Run one generation request against the AI endpoints.
pub fn spawn_generation(
    bridge: &AsyncBridge,
    client: ApiClient,
    credential: Credential,
    request: GenerationRequest,
    token: OpToken,
) {
    let tx = bridge.sender();
    bridge.runtime().spawn(async move {
        let result = match request {
            GenerationRequest::Prospect(params) => {
                client.find_prospects(&credential, &params).await
            }
            GenerationRequest::Route(params) => client.optimize_route(&credential, &params).await,
        };
        let _ = tx.send(TaskOutcome::GenerationCompleted { token, result });
    });
}

/// Fetch the saved-routes list for a History visit.
pub fn spawn_history(
    bridge: &AsyncBridge,
    client: ApiClient,
    credential: Credential,
    token: OpToken,
) {
    let tx = bridge.sender();
    bridge.runtime().spawn(async move {
        let result = client.list_saved_routes(&credential).await;
        let _ = tx.send(TaskOutcome::HistoryLoaded { token, result });
    });
}

/// Persist the currently displayed result.
pub fn spawn_save_route(
    bridge: &AsyncBridge,
    client: ApiClient,
    credential: Credential,
    title: String,
    route_data: String,
) {
    let tx = bridge.sender();
    bridge.runtime().spawn(async move {
        let result = client.save_route(&credential, &title, &route_data).await;
        let _ = tx.send(TaskOutcome::RouteSaved { result });
    });
}
