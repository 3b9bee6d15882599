mod local;

pub use local::LocalStore;

/// Key holding the persisted sidebar state
pub const SIDEBAR_KEY: &str = "capa.sidebar-collapsed";

/// Key holding the API configuration override
pub const API_CONFIG_KEY: &str = "capa.api-config";
