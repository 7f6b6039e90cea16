//! Configuration for diagsift.
//!
//! Values are resolved once at startup, in increasing priority: built-in
//! defaults, the TOML config file, environment variables, then command-line
//! flags. The resulting [`Config`] is immutable and handed to each component
//! by reference.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use toml_edit::DocumentMut;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "DIAGSIFT_CONFIG";
/// Root of the instrumentation toolchain (compiler plugin build tree).
pub const TOOLCHAIN_ROOT_ENV: &str = "DIAGSIFT_TOOLCHAIN_ROOT";
/// Root of the source tree to build.
pub const TARGET_ROOT_ENV: &str = "DIAGSIFT_TARGET_ROOT";
/// Directory reports are written to.
pub const LOG_DIR_ENV: &str = "DIAGSIFT_LOG_DIR";

/// Older variable names still honored when the new ones are unset.
const LEGACY_TOOLCHAIN_ROOT_ENV: &str = "FITX_ROOT";
const LEGACY_TARGET_ROOT_ENV: &str = "LINUX_ROOT";

/// Errors loading, saving or migrating the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the user config directory")]
    NoConfigDir,

    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to edit config file: {0}")]
    Edit(#[from] toml_edit::TomlError),
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub build: BuildConfig,
    pub reduce: ReduceConfig,
    pub report: ReportConfig,
}

/// Filesystem locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Instrumentation toolchain checkout (contains the plugin build)
    pub toolchain_root: PathBuf,
    /// Source tree built by `analyze linux`
    pub target_root: PathBuf,
    /// Where timestamped reports are written
    pub log_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            toolchain_root: PathBuf::from("/FiTx"),
            target_root: PathBuf::from("/linux"),
            log_dir: PathBuf::from("/tmp/log"),
        }
    }
}

/// How the instrumented build is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Compiler used for CC/HOSTCC and single-file builds
    pub compiler: String,
    /// Detector plugin, relative to the toolchain root unless absolute
    pub plugin: PathBuf,
    /// Parallel build jobs (0 = available CPUs)
    pub jobs: usize,
    /// Flags passed to every instrumented compilation
    pub base_flags: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            compiler: "clang".to_string(),
            plugin: PathBuf::from("build/detector/all_detector/libAllDetectorMod.so"),
            jobs: 0,
            base_flags: vec![
                "-g".to_string(),
                "-fno-inline-functions".to_string(),
                "-fno-builtin-bcmp".to_string(),
            ],
        }
    }
}

/// Log reduction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceConfig {
    /// Substring marking a diagnostic block boundary
    pub delimiter: String,
    /// Lines kept in the diagnostic report (any token matches)
    pub report_tokens: Vec<String>,
    /// Lines kept in the timing report (any token matches)
    pub measure_tokens: Vec<String>,
    /// File name suffix of per-object logs written next to compiled sources
    pub aux_log_suffix: String,
    /// Name of the file the primary build stderr is captured to
    pub primary_log_name: String,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            delimiter: "---".to_string(),
            report_tokens: vec!["ERROR".to_string(), "LOG".to_string()],
            measure_tokens: vec!["Elapsed".to_string()],
            aux_log_suffix: ".diag.log".to_string(),
            primary_log_name: "tmplog".to_string(),
        }
    }
}

/// Report naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// strftime format of the report file stem
    pub timestamp_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timestamp_format: "%Y_%m_%d_%H:%M".to_string(),
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        let config = Self::from_file(&path)?;
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Path of the config file: `$DIAGSIFT_CONFIG` or the user config dir.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("diagsift").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Parse `path`, falling back to defaults when it does not exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Apply environment overrides looked up through `var`.
    pub fn with_env<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.is_empty());

        if let Some(root) = non_empty(TOOLCHAIN_ROOT_ENV).or_else(|| non_empty(LEGACY_TOOLCHAIN_ROOT_ENV)) {
            self.paths.toolchain_root = PathBuf::from(root);
        }
        if let Some(root) = non_empty(TARGET_ROOT_ENV).or_else(|| non_empty(LEGACY_TARGET_ROOT_ENV)) {
            self.paths.target_root = PathBuf::from(root);
        }
        if let Some(dir) = non_empty(LOG_DIR_ENV) {
            self.paths.log_dir = PathBuf::from(dir);
        }
        self
    }

    /// Write the config to [`Config::config_path`].
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path()?;
        let io_err = |source| ConfigError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?).map_err(io_err)
    }

    /// Absolute path of the detector plugin.
    pub fn plugin_path(&self) -> PathBuf {
        self.paths.toolchain_root.join(&self.build.plugin)
    }

    /// Number of parallel jobs, resolving 0 to the available CPUs.
    pub fn jobs(&self) -> usize {
        match self.build.jobs {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n => n,
        }
    }

    /// Compiler flags that load the detector plugin, plus the timing switch
    /// when `measure` is set.
    pub fn instrumentation_flags(&self, measure: bool) -> Vec<String> {
        let mut flags = vec![
            "-Xclang".to_string(),
            "-load".to_string(),
            "-Xclang".to_string(),
            self.plugin_path().display().to_string(),
        ];
        if measure {
            flags.extend(["-mllvm".to_string(), "-measure".to_string()]);
        }
        flags
    }
}

/// Outcome of [`migrate_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateResult {
    /// Updated file content
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that were missing entirely
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add every field missing from `content` with its default value.
///
/// Existing values, comments and ordering are left untouched.
pub fn migrate_config(content: &str) -> Result<MigrateResult, ConfigError> {
    let mut doc: DocumentMut = content.parse()?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?.parse()?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, item) in defaults.iter() {
        let Some(default_table) = item.as_table() else {
            continue;
        };

        if !doc.contains_key(section) {
            doc.insert(section, item.clone());
            sections_added.push(section.to_string());
            added_fields.extend(
                default_table
                    .iter()
                    .map(|(key, _)| format!("{}.{}", section, key)),
            );
            continue;
        }

        let Some(table) = doc[section].as_table_mut() else {
            continue;
        };
        for (key, value) in default_table.iter() {
            if !table.contains_key(key) {
                table.insert(key, value.clone());
                added_fields.push(format!("{}.{}", section, key));
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
