//! Loader for the service configuration with YAML + environment overlays.
//!
//! Precedence, lowest to highest: built-in defaults, the bare `PORT`
//! variable (listening port only), YAML files in the order they were added,
//! then `HLTB_`-prefixed environment variables using `__` as the nesting
//! separator (`HLTB_SERVER__PORT=8080`, `HLTB_SCRAPER__BACKEND=static`).
//! String values may reference other variables as `${VAR}`.
use config::{Config, ConfigError, Environment, File};
use hltb_common::observability::{LogConfig, LogFormat};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const PORT_ENV: &str = "PORT";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BASE_URL: &str = "https://howlongtobeat.com";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HltbConfig {
    pub server: ServerConfig,
    pub scraper: ScraperConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// How pages are fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Headless browser over WebDriver.
    #[default]
    Browser,
    /// Plain HTTP GET of the server-rendered HTML.
    Static,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub backend: Backend,
    pub webdriver_url: String,
    pub headless: bool,
    /// Overrides the built-in desktop user agent.
    pub user_agent: Option<String>,
    pub accept_language: String,
    /// Extra request headers (static backend only).
    pub headers: BTreeMap<String, String>,
    /// Budget for a page's ready selector to appear.
    pub wait_timeout_ms: u64,
    /// Budget for one whole lookup, search through extraction.
    pub request_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            backend: Backend::Browser,
            webdriver_url: DEFAULT_WEBDRIVER_URL.into(),
            headless: true,
            user_agent: None,
            accept_language: "en-US,en".into(),
            headers: BTreeMap::new(),
            wait_timeout_ms: 15_000,
            request_timeout_secs: 60,
        }
    }
}

impl ScraperConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub dir: Option<PathBuf>,
    pub stderr: bool,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            dir: None,
            stderr: true,
            filter: "info".into(),
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self, app_name: &'static str) -> LogConfig {
        LogConfig {
            app_name,
            log_dir: self.dir.clone(),
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.filter.clone(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

fn port_from_env() -> Result<Option<u16>, ConfigError> {
    match std::env::var(PORT_ENV) {
        Ok(raw) => raw
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| ConfigError::Message(format!("invalid {PORT_ENV} value: {raw:?}"))),
        Err(_) => Ok(None),
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct HltbConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for HltbConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HltbConfigLoader {
    /// Start from defaults; `HLTB_` env overrides are applied last at [`load`](Self::load).
    ///
    /// ```
    /// use hltb_config::HltbConfigLoader;
    ///
    /// let config = HltbConfigLoader::new()
    ///     .with_yaml_str("server:\n  port: 8088")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.server.port, 8088);
    /// assert_eq!(config.scraper.base_url, "https://howlongtobeat.com");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent, so deployments can rely purely on
    /// environment variables.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use hltb_config::{Backend, HltbConfigLoader};
    ///
    /// let cfg = HltbConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// scraper:
    ///   backend: static
    ///   wait_timeout_ms: 500
    ///   headers:
    ///     x-trace: "abc"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.scraper.backend, Backend::Static);
    /// assert_eq!(cfg.scraper.wait_timeout().as_millis(), 500);
    /// assert_eq!(cfg.scraper.headers.get("x-trace").map(String::as_str), Some("abc"));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use hltb_config::HltbConfigLoader;
    ///
    /// unsafe { std::env::set_var("HLTB_DOC_UA", "doc-agent/1.0"); }
    ///
    /// let config = HltbConfigLoader::new()
    ///     .with_yaml_str("scraper:\n  user_agent: \"${HLTB_DOC_UA}\"")
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.scraper.user_agent.as_deref(), Some("doc-agent/1.0"));
    ///
    /// unsafe { std::env::remove_var("HLTB_DOC_UA"); }
    /// ```
    pub fn load(self) -> Result<HltbConfig, ConfigError> {
        let mut builder = self.builder.add_source(
            Environment::with_prefix("HLTB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        if let Some(port) = port_from_env()? {
            builder = builder.set_default("server.port", i64::from(port))?;
        }
        let cfg = builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
