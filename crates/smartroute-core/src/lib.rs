//! Core library crate for the SmartRoute desktop client: configuration,
//! session storage, backend gateways, domain parameters and spreadsheet
//! import.

pub mod api;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod params;
pub mod secret_store;
pub mod session;

pub use api::{ApiClient, GenerationResult, LocationReference, SavedRouteSummary};
pub use config::{
    ConfigError, ConfigLoadResult, ConfigSource, DEFAULT_API_BASE_URL, FileConfig,
    ThemePreference, UiPreferences, config_directory, config_path, load_config, load_config_from,
    save_config, save_config_to,
};
pub use error::{ApiError, ValidationErrors};
pub use import::{ImportError, addresses_from_spreadsheet};
pub use logging::{LoggingDestination, LoggingError, current_log_path, init_logging};
pub use params::{LeadCount, ParamsError, RouteParams, SearchParams};
pub use session::{Credential, CredentialStore, KeyringStore, MemoryStore};
