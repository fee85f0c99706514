//! Configuration for clangtool.
//!
//! Configuration is read from TOML. Every section is optional and unknown
//! keys are rejected so typos surface instead of being ignored:
//!
//! ```toml
//! [compile]
//! args = ["-std=c++17", "-Iinclude"]
//!
//! [frontend]
//! libclang_path = "/usr/lib/llvm-17/lib"
//!
//! [query]
//! max_candidates = 200
//!
//! [memory]
//! budget = "1GB"
//!
//! [logging]
//! level = "clangtool.index=debug,info"
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use parking_lot::ReentrantMutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod logging;

pub use logging::{init_tracing, LoggingConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClangtoolConfig {
    pub compile: CompileConfig,
    pub frontend: FrontendConfig,
    pub query: QueryConfig,
    pub memory: MemoryConfig,
    pub logging: LoggingConfig,
}

/// The compiler invocation applied to every parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileConfig {
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontendConfig {
    /// Where to load libclang from. Exported as `LIBCLANG_PATH` before loading.
    pub libclang_path: Option<PathBuf>,
    /// Needed for include directives to show up in ASTs and outlines.
    pub detailed_preprocessing_record: bool,
    pub precompiled_preamble: bool,
    pub brief_comments: bool,
    /// Completion: offer macros.
    pub include_macros: bool,
    /// Completion: offer code patterns (`for`, `switch`, ...).
    pub include_code_patterns: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            libclang_path: None,
            detailed_preprocessing_record: true,
            precompiled_preamble: true,
            brief_comments: true,
            include_macros: false,
            include_code_patterns: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Keep top-level declarations from included headers in ASTs.
    pub include_headers: bool,
    pub max_candidates: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryConfig {
    /// Budget the index report classifies memory pressure against.
    pub budget: Option<ByteSize>,
}

/// A byte size which supports both raw byte counts and human-friendly suffixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteSize(pub u64);

impl Serialize for ByteSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for ByteSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bytes(u64),
            Human(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Bytes(value) => Ok(ByteSize(value)),
            Repr::Human(value) => clangtool_memory::parse_byte_size(&value)
                .map(ByteSize)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

/// Strips user-provided values from a TOML error message.
///
/// Quoted strings become `"<redacted>"`, and the key in `unknown field`
/// errors is hidden.
fn sanitize_toml_error_message(message: &str) -> String {
    static QUOTED: OnceLock<Option<regex::Regex>> = OnceLock::new();
    static UNKNOWN_FIELD: OnceLock<Option<regex::Regex>> = OnceLock::new();

    let mut out = message.to_string();
    if let Some(re) = QUOTED
        .get_or_init(|| regex::Regex::new(r#""(?:\\.|[^"\\])*""#).ok())
        .as_ref()
    {
        out = re.replace_all(&out, r#""<redacted>""#).into_owned();
    }
    if let Some(re) = UNKNOWN_FIELD
        .get_or_init(|| regex::Regex::new(r"unknown field `[^`]*`").ok())
        .as_ref()
    {
        out = re
            .replace_all(&out, "unknown field `<redacted>`")
            .into_owned();
    }
    out
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` includes a snippet of the input; keep only the message.
        ConfigError::Toml(sanitize_toml_error_message(err.message()))
    }
}

impl ClangtoolConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Configured budget in bytes, if any.
    pub fn memory_budget(&self) -> Option<u64> {
        self.memory.budget.map(|size| size.0)
    }
}

pub const CLANGTOOL_CONFIG_ENV_VAR: &str = "CLANGTOOL_CONFIG_PATH";

static CONFIG_ENV_LOCK: OnceLock<ReentrantMutex<()>> = OnceLock::new();

fn config_env_lock() -> &'static ReentrantMutex<()> {
    CONFIG_ENV_LOCK.get_or_init(|| ReentrantMutex::new(()))
}

/// Run `f` while holding the config environment lock.
///
/// Tests that set [`CLANGTOOL_CONFIG_ENV_VAR`] wrap the mutation and the
/// discovery in this so concurrent tests do not observe each other's values.
pub fn with_config_env_lock<R>(f: impl FnOnce() -> R) -> R {
    let _guard = config_env_lock().lock();
    f()
}

/// Finds the configuration file for `root`.
///
/// Search order:
/// 1) `CLANGTOOL_CONFIG_PATH` (absolute or relative to `root`)
/// 2) `clangtool.toml` in `root`
/// 3) `.clangtool.toml` in `root`
pub fn discover_config_path(root: &Path) -> Option<PathBuf> {
    let _guard = config_env_lock().lock();
    if let Some(value) = std::env::var_os(CLANGTOOL_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            root.join(candidate)
        };
        return Some(path);
    }

    ["clangtool.toml", ".clangtool.toml"]
        .into_iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Loads the configuration for `root`, or the defaults when none is found.
pub fn load_for_dir(root: &Path) -> Result<(ClangtoolConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(root) else {
        return Ok((ClangtoolConfig::default(), None));
    };
    let config = ClangtoolConfig::load_from_path(&path)?;
    tracing::debug!(target: "clangtool.config", path = %path.display(), "loaded config");
    Ok((config, Some(path)))
}
