use crate::config::Config;
use crate::domain::market::{Market, SessionActivityMode};
use std::env;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::time::Duration;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const KEYS: [&str; 8] = [
    "CLOCK_INTERVAL_MS",
    "REFRESH_INTERVAL_MS",
    "AUTO_REFRESH",
    "ALERT_THRESHOLD",
    "EXPORT_DIR",
    "SIMULATION_SEED",
    "SESSION_ACTIVITY_MODE",
    "MARKET",
];

fn clear_env() {
    for key in KEYS {
        // SAFETY: env mutation is serialised by ENV_LOCK
        unsafe { env::remove_var(key) };
    }
}

fn set(key: &str, value: &str) {
    // SAFETY: env mutation is serialised by ENV_LOCK
    unsafe { env::set_var(key, value) };
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.clock_interval, Duration::from_millis(1000));
    assert_eq!(config.refresh_interval, Duration::from_millis(5000));
    assert!(config.auto_refresh);
    assert!((config.alert_threshold - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.export_dir, std::path::PathBuf::from("."));
    assert_eq!(config.simulation_seed, None);
    assert_eq!(config.session_mode, SessionActivityMode::Static);
    assert_eq!(config.market, Market::Stocks);
}

#[test]
fn test_config_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set("REFRESH_INTERVAL_MS", "250");
    set("AUTO_REFRESH", "false");
    set("ALERT_THRESHOLD", "0.5");
    set("SIMULATION_SEED", "42");
    set("SESSION_ACTIVITY_MODE", "clock");
    set("MARKET", "crypto");

    let config = Config::from_env().unwrap();

    assert_eq!(config.refresh_interval, Duration::from_millis(250));
    assert!(!config.auto_refresh);
    assert!((config.alert_threshold - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.simulation_seed, Some(42));
    assert_eq!(config.session_mode, SessionActivityMode::Clock);
    assert_eq!(config.market, Market::Crypto);

    clear_env();
}

#[test]
fn test_config_rejects_out_of_range_threshold() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set("ALERT_THRESHOLD", "1.5");

    let err = Config::from_env().unwrap_err();
    assert!(format!("{:#}", err).contains("ALERT_THRESHOLD"));

    clear_env();
}

#[test]
fn test_config_rejects_bad_values() {
    let _guard = get_env_lock().lock().unwrap();

    clear_env();
    set("REFRESH_INTERVAL_MS", "soon");
    assert!(Config::from_env().is_err());

    clear_env();
    set("CLOCK_INTERVAL_MS", "0");
    assert!(Config::from_env().is_err());

    clear_env();
    set("SESSION_ACTIVITY_MODE", "lunar");
    assert!(Config::from_env().is_err());

    clear_env();
    set("SIMULATION_SEED", "-3");
    assert!(Config::from_env().is_err());

    clear_env();
}

#[test]
fn test_config_rejects_bad_auto_refresh() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set("AUTO_REFRESH", "sometimes");

    let err = Config::from_env().unwrap_err();
    assert!(format!("{:#}", err).contains("AUTO_REFRESH"));

    clear_env();
}
