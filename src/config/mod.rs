use rocket::figment::{Figment, providers::{Env, Format, Toml}};
use rocket::Config as RocketConfig;
use std::env;

pub struct Config;

impl Config {
    fn figment() -> Figment {
        // Get the current profile
        let profile = env::var("ROCKET_PROFILE").unwrap_or_else(|_| "development".to_string());

        Figment::from(RocketConfig::default())
            .merge(Toml::file("Rocket.toml").nested())
            .select(&profile)
            .merge(Env::prefixed("ROCKET_").ignore(&["PROFILE"]))
    }

    pub fn data_dir() -> String {
        Self::figment()
            .extract_inner("data_dir")
            .unwrap_or_else(|_| "data".to_string())
    }

    pub fn admin_username() -> String {
        Self::figment()
            .extract_inner("admin_username")
            .unwrap_or_else(|_| "admin".to_string())
    }

    pub fn admin_password() -> String {
        Self::figment()
            .extract_inner("admin_password")
            .unwrap_or_else(|_| "admin123".to_string())
    }

    pub fn jwt_secret() -> String {
        Self::figment()
            .extract_inner("jwt_secret")
            .unwrap_or_else(|_| "default-secret".to_string())
    }

    pub fn jwt_expiry() -> i64 {
        Self::figment()
            .extract_inner("jwt_expiry")
            .unwrap_or(3600)
    }

    pub fn gemini_api_key() -> Option<String> {
        Self::figment()
            .extract_inner::<String>("gemini_api_key")
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn gemini_model() -> String {
        Self::figment()
            .extract_inner("gemini_model")
            .unwrap_or_else(|_| "gemini-2.5-flash".to_string())
    }

    pub fn is_gemini_enabled() -> bool {
        Self::gemini_api_key().is_some()
    }

    pub fn tip_timeout_ms() -> u64 {
        Self::figment()
            .extract_inner("tip_timeout_ms")
            .unwrap_or(5000)
    }

    pub fn session_idle_minutes() -> u64 {
        Self::figment()
            .extract_inner("session_idle_minutes")
            .unwrap_or(30)
    }

    pub fn max_browse_sessions() -> usize {
        Self::figment()
            .extract_inner("max_browse_sessions")
            .unwrap_or(10_000)
    }

    pub fn default_latitude() -> f64 {
        Self::figment()
            .extract_inner("default_latitude")
            .unwrap_or(17.3850)
    }

    pub fn default_longitude() -> f64 {
        Self::figment()
            .extract_inner("default_longitude")
            .unwrap_or(78.4867)
    }

    pub fn default_city() -> String {
        Self::figment()
            .extract_inner("default_city")
            .unwrap_or_else(|_| "Hyderabad".to_string())
    }
}
