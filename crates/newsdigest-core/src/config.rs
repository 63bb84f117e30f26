use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_PORT: &str = "10000";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid, or a variable
/// required in this environment is missing.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid, or a variable
/// required in this environment is missing.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a working
/// development config listening on port 10000. Every other environment also
/// requires `NEWSDIGEST_TEI_URL`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::{Ipv4Addr, SocketAddr};
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("NEWSDIGEST_ENV", "development"));

    let port = parse_u16("PORT", DEFAULT_PORT)?;
    let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let log_level = or_default("NEWSDIGEST_LOG_LEVEL", "info");
    let static_dir = PathBuf::from(or_default("NEWSDIGEST_STATIC_DIR", "static"));

    let public_base_url = trim_url(&or_default(
        "NEWSDIGEST_PUBLIC_BASE_URL",
        &format!("http://127.0.0.1:{port}"),
    ));
    let search_base_url = trim_url(&or_default(
        "NEWSDIGEST_SEARCH_BASE_URL",
        "https://www.bbc.com",
    ));
    let translate_url = trim_url(&or_default(
        "NEWSDIGEST_TRANSLATE_URL",
        "https://api.mymemory.translated.net",
    ));
    let tts_url = trim_url(&or_default(
        "NEWSDIGEST_TTS_URL",
        "https://translate.google.com",
    ));
    let audio_lang = or_default("NEWSDIGEST_AUDIO_LANG", "hi");
    let tei_url = lookup("NEWSDIGEST_TEI_URL")
        .ok()
        .map(|url| trim_url(&url))
        .filter(|url| !url.is_empty());
    // Frequency ranking is a local-development fallback only.
    if tei_url.is_none() && env != Environment::Development {
        return Err(ConfigError::MissingEnvVar("NEWSDIGEST_TEI_URL".to_string()));
    }

    let request_timeout_secs = parse_u64("NEWSDIGEST_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("NEWSDIGEST_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        static_dir,
        public_base_url,
        search_base_url,
        translate_url,
        tts_url,
        audio_lang,
        tei_url,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn trim_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:10000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.static_dir, std::path::PathBuf::from("static"));
        assert_eq!(cfg.public_base_url, "http://127.0.0.1:10000");
        assert_eq!(cfg.search_base_url, "https://www.bbc.com");
        assert_eq!(cfg.translate_url, "https://api.mymemory.translated.net");
        assert_eq!(cfg.tts_url, "https://translate.google.com");
        assert_eq!(cfg.audio_lang, "hi");
        assert!(cfg.tei_url.is_none());
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn port_override_moves_bind_addr_and_public_url() {
        let mut map = HashMap::new();
        map.insert("PORT", "8080");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.public_base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut map = HashMap::new();
        map.insert("PORT", "not-a-port");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PORT"),
            "expected InvalidEnvVar(PORT), got: {result:?}"
        );
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let mut map = HashMap::new();
        map.insert("NEWSDIGEST_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSDIGEST_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(NEWSDIGEST_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn urls_lose_trailing_slashes() {
        let mut map = HashMap::new();
        map.insert("NEWSDIGEST_PUBLIC_BASE_URL", "https://digest.example.com/");
        map.insert("NEWSDIGEST_TEI_URL", "http://tei:8080/");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.public_base_url, "https://digest.example.com");
        assert_eq!(cfg.tei_url.as_deref(), Some("http://tei:8080"));
    }

    #[test]
    fn production_requires_tei_url() {
        let mut map = HashMap::new();
        map.insert("NEWSDIGEST_ENV", "production");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "NEWSDIGEST_TEI_URL"),
            "expected MissingEnvVar(NEWSDIGEST_TEI_URL), got: {result:?}"
        );

        map.insert("NEWSDIGEST_TEI_URL", "   ");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "NEWSDIGEST_TEI_URL"),
            "blank TEI URL must not satisfy production, got: {result:?}"
        );
    }

    #[test]
    fn production_with_tei_url_loads() {
        let mut map = HashMap::new();
        map.insert("NEWSDIGEST_ENV", "production");
        map.insert("NEWSDIGEST_TEI_URL", "http://tei:8080");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.tei_url.as_deref(), Some("http://tei:8080"));
    }

    #[test]
    fn test_env_requires_tei_url() {
        let mut map = HashMap::new();
        map.insert("NEWSDIGEST_ENV", "test");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "NEWSDIGEST_TEI_URL"),
            "expected MissingEnvVar(NEWSDIGEST_TEI_URL), got: {result:?}"
        );
    }

    #[test]
    fn development_falls_back_without_tei_url() {
        let mut map = HashMap::new();
        map.insert("NEWSDIGEST_ENV", "development");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert!(cfg.tei_url.is_none());
    }

    #[test]
    fn blank_tei_url_counts_as_unset() {
        let mut map = HashMap::new();
        map.insert("NEWSDIGEST_TEI_URL", "  ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.tei_url.is_none());
    }
}
