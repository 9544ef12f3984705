use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API_TOKEN must be set to a non-empty value")]
    MissingApiToken,
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub api_token: String,
    pub host: String,
    pub port: u16,
    /// Base used when building `Location` headers for created resources.
    pub public_url: String,
    pub enable_hsts: bool,
    /// Empty means any origin is allowed.
    pub cors_origins: Vec<String>,
    pub seed_sample_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            api_token: String::new(),
            host: "0.0.0.0".into(),
            port: 8000,
            public_url: "http://localhost:8000".into(),
            enable_hsts: false,
            cors_origins: Vec::new(),
            seed_sample_data: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let api_token = lookup("API_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingApiToken)?;

        let environment = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let port = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { name: "PORT", value: v })?,
            None => defaults.port,
        };

        let public_url = lookup("PUBLIC_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let cors_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            environment,
            api_token,
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            public_url,
            enable_hsts: flag(lookup("ENABLE_HSTS"), "ENABLE_HSTS", defaults.enable_hsts)?,
            cors_origins,
            seed_sample_data: flag(lookup("SEED_SAMPLE_DATA"), "SEED_SAMPLE_DATA", defaults.seed_sample_data)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn flag(raw: Option<String>, name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = raw else { return Ok(default) };
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { name, value: v }),
    }
}
