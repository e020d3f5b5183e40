//! Configuration primitives and loader for paypalc.
//!
//! Layers are applied lowest precedence first:
//! built-in defaults → git root → working directory → override flag.
//! Every resolved value remembers the layer it came from so validation
//! errors can point at the offending file.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use paypalc_core::DEFAULT_DOC_BASE_URL;
use paypalc_format::{DEFAULT_CATALOG_URL, DEFAULT_PACKAGE, MAX_COLUMN, TAB_WIDTH};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const CONFIG_FILE_NAME: &str = ".paypalc.toml";

/// Browser user agent; the documentation site rejects unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36 Edg/118.0.2088.69";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Width of the `// ` marker plus one column of text.
const MIN_COMMENT_COLUMNS: usize = 4;

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub source: SourceSettings,
    pub generator: GeneratorSettings,
    pub sources: ConfigSources,
}

/// Where the catalog page is fetched from and how its links resolve.
#[derive(Clone, Debug)]
pub struct SourceSettings {
    pub url: String,
    pub doc_base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

/// Layout of the generated Go file.
#[derive(Clone, Debug)]
pub struct GeneratorSettings {
    pub package: String,
    pub max_column: usize,
    pub tab_width: usize,
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
}

impl ConfigSource {
    fn builtin() -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        ConfigSource {
            kind,
            path: Some(path),
        }
    }

    pub fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let mut merged = PartialConfig::default();
        let mut source_layers = vec![ConfigSource::builtin()];

        let git_config_path = find_git_root(&working_dir).map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            source_layers.push(source);
        }

        let (source, generator) = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            source,
            generator,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|err| ConfigError::Io {
        path: path.into(),
        source: err,
    })?;
    let raw: RawConfig = toml::from_str(&contents).map_err(|err| ConfigError::Parse {
        path: path.into(),
        source: err,
    })?;
    Ok(raw.into_partial(source))
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }

    fn or_default(slot: Option<Located<T>>, value: T) -> Located<T> {
        slot.unwrap_or_else(|| Located::new(value, ConfigSource::builtin()))
    }
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    url: Option<Located<String>>,
    doc_base_url: Option<Located<String>>,
    user_agent: Option<Located<String>>,
    timeout_secs: Option<Located<u64>>,
    package: Option<Located<String>>,
    max_column: Option<Located<usize>>,
    tab_width: Option<Located<usize>>,
}

impl PartialConfig {
    fn merge(&mut self, other: PartialConfig) {
        fn take<T>(slot: &mut Option<Located<T>>, other: Option<Located<T>>) {
            if other.is_some() {
                *slot = other;
            }
        }

        take(&mut self.url, other.url);
        take(&mut self.doc_base_url, other.doc_base_url);
        take(&mut self.user_agent, other.user_agent);
        take(&mut self.timeout_secs, other.timeout_secs);
        take(&mut self.package, other.package);
        take(&mut self.max_column, other.max_column);
        take(&mut self.tab_width, other.tab_width);
    }

    fn finalize(self) -> Result<(SourceSettings, GeneratorSettings), ConfigValidationErrors> {
        let mut errors = Vec::new();

        let url = Located::or_default(self.url, DEFAULT_CATALOG_URL.to_string());
        check_http_url(&url, "source.url", &mut errors);

        let doc_base_url = Located::or_default(self.doc_base_url, DEFAULT_DOC_BASE_URL.to_string());
        check_http_url(&doc_base_url, "source.doc_base_url", &mut errors);

        let user_agent = Located::or_default(self.user_agent, DEFAULT_USER_AGENT.to_string());
        if user_agent.value.trim().is_empty() {
            errors.push(ConfigValidationError::new(
                Some(user_agent.source.clone()),
                "source.user_agent cannot be empty".into(),
            ));
        }

        let timeout_secs = Located::or_default(self.timeout_secs, DEFAULT_TIMEOUT_SECS);
        if timeout_secs.value == 0 {
            errors.push(ConfigValidationError::new(
                Some(timeout_secs.source.clone()),
                "source.timeout_secs must be greater than 0".into(),
            ));
        }

        let package = Located::or_default(self.package, DEFAULT_PACKAGE.to_string());
        if package.value.is_empty() || package.value.contains(char::is_whitespace) {
            errors.push(ConfigValidationError::new(
                Some(package.source.clone()),
                format!(
                    "generator.package must be a single non-empty word (received '{}')",
                    package.value
                ),
            ));
        }

        let max_column = Located::or_default(self.max_column, MAX_COLUMN);
        let tab_width = Located::or_default(self.tab_width, TAB_WIDTH);
        if max_column.value < tab_width.value + MIN_COMMENT_COLUMNS {
            errors.push(ConfigValidationError::new(
                Some(max_column.source.clone()),
                format!(
                    "generator.max_column must be at least {} for tab_width {}",
                    tab_width.value + MIN_COMMENT_COLUMNS,
                    tab_width.value
                ),
            ));
        }

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok((
            SourceSettings {
                url: url.value,
                doc_base_url: doc_base_url.value.trim_end_matches('/').to_string(),
                user_agent: user_agent.value,
                timeout: Duration::from_secs(timeout_secs.value),
            },
            GeneratorSettings {
                package: package.value,
                max_column: max_column.value,
                tab_width: tab_width.value,
            },
        ))
    }
}

fn check_http_url(
    located: &Located<String>,
    context: &str,
    errors: &mut Vec<ConfigValidationError>,
) {
    let message = match Url::parse(&located.value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => return,
        Ok(url) => format!("unsupported scheme '{}'", url.scheme()),
        Err(err) => format!("invalid URL '{}': {err}", located.value),
    };
    errors.push(ConfigValidationError::new(Some(located.source.clone()), message).with_context(context));
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
    pub context: Option<String>,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError {
            source,
            message,
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    source: Option<RawSource>,
    #[serde(default)]
    generator: Option<RawGenerator>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSource {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    doc_base_url: Option<String>,
    #[serde(default)]
    user_agent: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGenerator {
    #[serde(default)]
    package: Option<String>,
    #[serde(default)]
    max_column: Option<usize>,
    #[serde(default)]
    tab_width: Option<usize>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        let locate = |value: Option<_>| value.map(|v| Located::new(v, source.clone()));
        let mut partial = PartialConfig::default();

        if let Some(raw) = self.source {
            partial.url = locate(raw.url);
            partial.doc_base_url = locate(raw.doc_base_url);
            partial.user_agent = locate(raw.user_agent);
            partial.timeout_secs = raw
                .timeout_secs
                .map(|value| Located::new(value, source.clone()));
        }

        if let Some(raw) = self.generator {
            partial.package = locate(raw.package);
            partial.max_column = raw
                .max_column
                .map(|value| Located::new(value, source.clone()));
            partial.tab_width = raw
                .tab_width
                .map(|value| Located::new(value, source.clone()));
        }

        partial
    }
}
