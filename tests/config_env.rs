use cardlist::config::{ConfigError, Environment, Settings};
use serial_test::serial;
use std::env;

fn clear() {
    for var in ["API_TOKEN", "APP_ENV", "NODE_ENV", "PORT", "PUBLIC_URL", "ENABLE_HSTS", "SEED_SAMPLE_DATA"] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn from_env_requires_token() {
    clear();
    assert_eq!(Settings::from_env().unwrap_err(), ConfigError::MissingApiToken);
}

#[test]
#[serial]
fn from_env_reads_process_environment() {
    clear();
    env::set_var("API_TOKEN", "from-env");
    env::set_var("NODE_ENV", "production");
    env::set_var("PORT", "8123");
    let s = Settings::from_env().unwrap();
    assert_eq!(s.api_token, "from-env");
    assert_eq!(s.environment, Environment::Production);
    assert_eq!(s.public_url, "http://localhost:8123");
    clear();
}
