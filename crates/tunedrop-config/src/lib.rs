mod config;

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tunedrop_core::{TuneError, TuneResult};

pub use config::{
    ApiConfig, ApiCredentials, DEFAULT_API_HOST, DEFAULT_BIND, DEFAULT_PORT, ServerConfig,
    TuneConfig, mask_secret,
};

pub const API_KEY_VAR: &str = "API_KEY";
pub const API_HOST_VAR: &str = "API_HOST";
pub const PORT_VAR: &str = "PORT";
pub const ENVIRONMENT_VAR: &str = "APP_ENV";
pub const LEGACY_ENVIRONMENT_VAR: &str = "NODE_ENV";
pub const ENV_FILE: &str = ".env";

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Option<ApiCredentials>,
    pub api_key_set: bool,
    pub api_host_set: bool,
    pub api_host: String,
    pub bind: String,
    pub port: u16,
    pub environment: Option<String>,
}

impl Settings {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment.as_deref() == Some("development")
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tunedrop").join("config.toml"))
}

/// Loads the config file. An explicit path must exist; the default one may not.
pub fn load_config(path: Option<&Path>) -> TuneResult<TuneConfig> {
    let path = match path {
        Some(path) => {
            if !path.exists() {
                return Err(TuneError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(TuneConfig::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .map_err(|err| TuneError::Config(format!("failed to read config: {err}")))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> TuneResult<TuneConfig> {
    toml::from_str(content)
        .map_err(|err| TuneError::Config(format!("failed to parse config: {err}")))
}

/// Reads `KEY=value` pairs from a dotenv file. A missing file yields no pairs.
pub fn read_env_file(path: &Path) -> TuneResult<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    dotenvy::from_path_iter(path)
        .map_err(|err| TuneError::Config(format!("failed to read {}: {err}", path.display())))?
        .map(|item| {
            item.map_err(|err| {
                TuneError::Config(format!("failed to parse {}: {err}", path.display()))
            })
        })
        .collect()
}

/// Resolves settings from the process environment, then `.env` in the
/// working directory, then the config file.
pub fn resolve_settings(config: &TuneConfig) -> TuneResult<Settings> {
    let file_vars = read_env_file(Path::new(ENV_FILE))?;
    resolve_settings_layered(config, |name| env::var(name).ok(), &file_vars)
}

/// Variables set in the process win over the same names in `file_vars`.
pub fn resolve_settings_layered<F>(
    config: &TuneConfig,
    process: F,
    file_vars: &HashMap<String, String>,
) -> TuneResult<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    resolve_settings_with(config, |name| {
        process(name).or_else(|| file_vars.get(name).cloned())
    })
}

/// Same as [`resolve_settings`] but reads variables through `lookup`.
pub fn resolve_settings_with<F>(config: &TuneConfig, lookup: F) -> TuneResult<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let key = resolve_api_key(config, &lookup);
    let host = resolve_api_host(config, &lookup);
    let port = resolve_port(config, &lookup)?;
    let environment = env_value(&lookup, ENVIRONMENT_VAR)
        .or_else(|| env_value(&lookup, LEGACY_ENVIRONMENT_VAR))
        .or_else(|| config.server.environment.clone());

    Ok(Settings {
        api_key_set: key.is_some(),
        api_host_set: !host.trim().is_empty(),
        credentials: key.map(|key| ApiCredentials::new(key, host.clone())),
        api_host: host,
        bind: config
            .server
            .bind
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND.to_string()),
        port,
        environment,
    })
}

fn resolve_api_key<F>(config: &TuneConfig, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env_value(lookup, API_KEY_VAR).or_else(|| {
        config
            .api
            .key
            .clone()
            .filter(|value| !value.trim().is_empty())
    })
}

fn resolve_api_host<F>(config: &TuneConfig, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    env_value(lookup, API_HOST_VAR)
        .or_else(|| {
            config
                .api
                .host
                .clone()
                .filter(|value| !value.trim().is_empty())
        })
        .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
}

fn resolve_port<F>(config: &TuneConfig, lookup: &F) -> TuneResult<u16>
where
    F: Fn(&str) -> Option<String>,
{
    match env_value(lookup, PORT_VAR) {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|err| TuneError::Config(format!("invalid {PORT_VAR} '{value}': {err}"))),
        None => Ok(config.server.port.unwrap_or(DEFAULT_PORT)),
    }
}

fn env_value<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_file_or_environment() {
        let settings = resolve_settings_with(&TuneConfig::default(), lookup_from(&[])).unwrap();
        assert!(settings.credentials.is_none());
        assert!(!settings.api_key_set);
        assert!(settings.api_host_set);
        assert_eq!(settings.api_host, DEFAULT_API_HOST);
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.listen_addr(), "0.0.0.0:3000");
        assert_eq!(settings.environment, None);
        assert!(!settings.is_development());
    }

    #[test]
    fn environment_overrides_file() {
        let config = parse_config(
            r#"
            [api]
            key = "file-key"
            host = "file.example.com"

            [server]
            port = 8080
            environment = "production"
            "#,
        )
        .unwrap();
        let settings = resolve_settings_with(
            &config,
            lookup_from(&[
                ("API_KEY", "env-key"),
                ("PORT", "9000"),
                ("APP_ENV", "development"),
            ]),
        )
        .unwrap();

        let credentials = settings.credentials.as_ref().unwrap();
        assert_eq!(credentials.key, "env-key");
        assert_eq!(credentials.host, "file.example.com");
        assert_eq!(settings.port, 9000);
        assert!(settings.is_development());
    }

    #[test]
    fn host_is_resolved_without_a_key() {
        let settings = resolve_settings_with(
            &TuneConfig::default(),
            lookup_from(&[("API_HOST", "mirror.example.com")]),
        )
        .unwrap();
        assert!(settings.credentials.is_none());
        assert_eq!(settings.api_host, "mirror.example.com");
    }

    #[test]
    fn node_env_is_read_when_app_env_is_absent() {
        let settings = resolve_settings_with(
            &TuneConfig::default(),
            lookup_from(&[("NODE_ENV", "development")]),
        )
        .unwrap();
        assert!(settings.is_development());

        let settings = resolve_settings_with(
            &TuneConfig::default(),
            lookup_from(&[("NODE_ENV", "development"), ("APP_ENV", "production")]),
        )
        .unwrap();
        assert_eq!(settings.environment.as_deref(), Some("production"));
    }

    #[test]
    fn env_file_supplies_missing_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# deployment secrets\nAPI_KEY=from-dotenv\nAPI_HOST=\"dotenv.example.com\"\nPORT=4000\n",
        )
        .unwrap();
        let file_vars = read_env_file(&path).unwrap();

        let settings =
            resolve_settings_layered(&TuneConfig::default(), lookup_from(&[]), &file_vars)
                .unwrap();
        let credentials = settings.credentials.unwrap();
        assert_eq!(credentials.key, "from-dotenv");
        assert_eq!(credentials.host, "dotenv.example.com");
        assert_eq!(settings.port, 4000);
    }

    #[test]
    fn process_environment_beats_env_file() {
        let file_vars = HashMap::from([
            ("API_KEY".to_string(), "from-dotenv".to_string()),
            ("PORT".to_string(), "4000".to_string()),
        ]);
        let settings = resolve_settings_layered(
            &TuneConfig::default(),
            lookup_from(&[("API_KEY", "from-process")]),
            &file_vars,
        )
        .unwrap();
        assert_eq!(settings.credentials.unwrap().key, "from-process");
        assert_eq!(settings.port, 4000);
    }

    #[test]
    fn missing_env_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file_vars = read_env_file(&dir.path().join(".env")).unwrap();
        assert!(file_vars.is_empty());
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let settings = resolve_settings_with(
            &TuneConfig::default(),
            lookup_from(&[("API_KEY", "   "), ("API_HOST", ""), ("PORT", " ")]),
        )
        .unwrap();
        assert!(settings.credentials.is_none());
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[test]
    fn host_defaults_when_only_key_is_set() {
        let settings =
            resolve_settings_with(&TuneConfig::default(), lookup_from(&[("API_KEY", "k")]))
                .unwrap();
        let credentials = settings.credentials.unwrap();
        assert_eq!(credentials.host, DEFAULT_API_HOST);
        assert!(credentials.is_complete());
    }

    #[test]
    fn rejects_unparsable_port() {
        let result =
            resolve_settings_with(&TuneConfig::default(), lookup_from(&[("PORT", "http")]));
        match result {
            Err(TuneError::Config(msg)) => assert!(msg.contains("PORT")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_config_file() {
        let result = parse_config("[server]\nport = \"not a number\"");
        assert!(matches!(result, Err(TuneError::Config(_))));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = load_config(Some(Path::new("/definitely/not/here/tunedrop.toml")));
        match result {
            Err(TuneError::Config(msg)) => assert!(msg.contains("not found")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn credentials_debug_masks_key() {
        let credentials = ApiCredentials::new("secret-key-123", "host.example.com");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("secret-key-123"));
        assert!(rendered.contains("secr****"));
        assert_eq!(mask_secret("abc"), "****");
    }

    #[test]
    fn incomplete_credentials() {
        assert!(!ApiCredentials::new("", "host").is_complete());
        assert!(!ApiCredentials::new("key", " ").is_complete());
        assert!(ApiCredentials::new("key", "host").is_complete());
    }
}
