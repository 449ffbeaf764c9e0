use lbw::config;
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;
use std::time::Duration;

// Tests in this file share process environment variables.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("https://lb.example.net/provision/"),
        "https://lb.example.net/provision"
    );
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("https://lb.example.net/provision///"),
        "https://lb.example.net/provision"
    );
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(
        config::sanitize_base_url("  http://10.0.0.5:3001/  "),
        "http://10.0.0.5:3001"
    );
}

#[test]
fn test_sanitize_base_url_empty_falls_back_to_local_backend() {
    assert_eq!(config::sanitize_base_url(""), "http://localhost:3001");
    assert_eq!(config::sanitize_base_url("   "), "http://localhost:3001");
}

#[test]
fn test_get_api_base_url_from_env() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    env::set_var("API_BASE_URL", "https://lb.example.net/");

    assert_eq!(config::get_api_base_url(), "https://lb.example.net");
    assert!(config::api_base_url_configured());

    env::remove_var("API_BASE_URL");
}

#[test]
fn test_get_api_base_url_uses_default() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    env::remove_var("API_BASE_URL");

    assert_eq!(config::get_api_base_url(), "http://localhost:3001");
    assert!(!config::api_base_url_configured());
}

#[test]
fn test_blank_api_base_url_counts_as_unconfigured() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    env::set_var("API_BASE_URL", "  ");

    assert!(!config::api_base_url_configured());
    assert_eq!(config::get_api_base_url(), "http://localhost:3001");

    env::remove_var("API_BASE_URL");
}

#[test]
fn test_request_timeout() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());

    env::remove_var("REQUEST_TIMEOUT_SECS");
    assert_eq!(config::get_request_timeout(), Duration::from_secs(30));

    env::set_var("REQUEST_TIMEOUT_SECS", "5");
    assert_eq!(config::get_request_timeout(), Duration::from_secs(5));

    // Zero and garbage fall back to the default.
    env::set_var("REQUEST_TIMEOUT_SECS", "0");
    assert_eq!(config::get_request_timeout(), Duration::from_secs(30));
    env::set_var("REQUEST_TIMEOUT_SECS", "soon");
    assert_eq!(config::get_request_timeout(), Duration::from_secs(30));

    env::remove_var("REQUEST_TIMEOUT_SECS");
}

#[test]
fn test_project_id() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());

    env::remove_var("PROJECT_ID");
    assert_eq!(config::get_project_id(), 0);

    env::set_var("PROJECT_ID", " 1234 ");
    assert_eq!(config::get_project_id(), 1234);

    env::set_var("PROJECT_ID", "default");
    assert_eq!(config::get_project_id(), config::DEFAULT_PROJECT_ID);

    env::remove_var("PROJECT_ID");
}
