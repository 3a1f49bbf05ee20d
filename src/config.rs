/// Application-level constants
pub const APP_NAME: &str = "Frontdesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Staging user API used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://pakhims.com/stg_user-api";

/// HTTP timeout for collaborator calls, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Resolve the backend base URL.
/// `FRONTDESK_API_URL` overrides the built-in staging endpoint.
pub fn base_url() -> String {
    std::env::var("FRONTDESK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_has_no_trailing_slash() {
        assert!(!DEFAULT_BASE_URL.ends_with('/'));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
