use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Careflow";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend base URL when `CAREFLOW_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Resolve the backend base URL (env override, then default).
/// Trailing slashes are trimmed so path joining stays uniform.
pub fn api_base_url() -> String {
    std::env::var("CAREFLOW_API_URL")
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Get the application data directory
/// ~/Careflow/ on all platforms (user-visible; holds only the session token)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Path of the durable bearer-token file.
pub fn token_file() -> PathBuf {
    app_data_dir().join("session.token")
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "careflow_client=info,warn".to_string()
}
