use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services.
/// It is pulled into the application state via FromRef, embodying the "immutable AppConfig"
/// part of the Unified State Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // Runtime environment marker. Controls the log format and cookie hardening.
    pub env: Env,
    // TCP port the HTTP server binds to.
    pub port: u16,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs, plain cookies) and production settings (JSON logs, secure cookies).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            port: 3000,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the **fail-fast** principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime environment
    /// (especially Production) is missing or malformed. This prevents the application from
    /// starting with an incomplete configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // Port Resolution
        // Production deployments must state their port explicitly; local development
        // falls back to the conventional 3000.
        let port = match env {
            Env::Production => env::var("PORT")
                .expect("FATAL: PORT must be set in production.")
                .parse::<u16>()
                .expect("FATAL: PORT must be a valid TCP port number."),
            Env::Local => env::var("PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(3000),
        };

        Self { env, port }
    }
}
