// crates/contract-console-config/src/config.rs
// ============================================================================
// Module: Contract Console Configuration
// Description: Configuration loading and validation for contract consoles.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: contract-console-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Each `[[consoles]]` entry describes one fixed contract: its display title,
//! address, and the interface document that drives its console. Interface
//! documents are read through [`read_document`], which never reads more than
//! the configured limit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use contract_console_core::ConsoleName;
use contract_console_core::SurfaceOptions;
use contract_console_core::runtime::MAX_DOCUMENT_BYTES;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "contract-console.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "CONTRACT_CONSOLE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of configured consoles.
pub(crate) const MAX_CONSOLES: usize = 64;
/// Maximum length of a console name.
pub(crate) const MAX_CONSOLE_NAME_LENGTH: usize = 64;
/// Maximum length of a console title.
pub(crate) const MAX_TITLE_LENGTH: usize = 256;
/// Maximum length of a rendered interface name.
pub(crate) const MAX_INTERFACE_NAME_LENGTH: usize = 128;
/// Number of hex digits in a contract address.
pub(crate) const ADDRESS_HEX_DIGITS: usize = 40;
/// Default maximum interface document size in bytes.
pub(crate) const DEFAULT_DOCUMENT_MAX_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Contract console configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractConsoleConfig {
    /// Interface document limits.
    #[serde(default)]
    pub documents: DocumentsConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Configured consoles, one per fixed contract.
    #[serde(default)]
    pub consoles: Vec<ConsoleConfig>,
    /// Directory relative paths resolve against (not serialized).
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl ContractConsoleConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.base_dir = resolved.parent().map(Path::to_path_buf);
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.documents.validate()?;
        self.audit.validate()?;
        if self.consoles.len() > MAX_CONSOLES {
            return Err(ConfigError::Invalid(format!("too many consoles (max {MAX_CONSOLES})")));
        }
        let mut names = BTreeSet::new();
        for console in &self.consoles {
            console.validate()?;
            if !names.insert(console.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate console name: {}",
                    console.name
                )));
            }
        }
        Ok(())
    }

    /// Returns the console with the given name.
    #[must_use]
    pub fn console(&self, name: &str) -> Option<&ConsoleConfig> {
        self.consoles.iter().find(|console| console.name == name)
    }

    /// Resolves a config-relative path against the config file directory.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path.trim());
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Reads the interface document of a console within the document limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document cannot be read or is oversized.
    pub fn read_console_document(&self, console: &ConsoleConfig) -> Result<Vec<u8>, ConfigError> {
        read_document(&self.resolve(&console.abi_path), self.documents.max_bytes)
    }

    /// Returns the resolved audit log path, when one is configured.
    #[must_use]
    pub fn audit_path(&self) -> Option<PathBuf> {
        self.audit.path.as_deref().map(|path| self.resolve(path))
    }
}

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Interface document limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentsConfig {
    /// Maximum interface document size in bytes.
    #[serde(default = "default_document_max_bytes")]
    pub max_bytes: usize,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_document_max_bytes(),
        }
    }
}

impl DocumentsConfig {
    /// Validates document limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid(
                "documents.max_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_bytes > MAX_DOCUMENT_BYTES {
            return Err(ConfigError::Invalid(format!(
                "documents.max_bytes exceeds {MAX_DOCUMENT_BYTES}"
            )));
        }
        Ok(())
    }
}

/// Default interface document limit.
const fn default_document_max_bytes() -> usize {
    DEFAULT_DOCUMENT_MAX_BYTES
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Enable JSON-line audit events.
    #[serde(default)]
    pub enabled: bool,
    /// Optional audit log path; events go to stderr when absent.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Consoles
// ============================================================================

/// One configured console.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Console name (lowercase letters, digits, `-`, `_`).
    pub name: String,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Fixed contract address (`0x` followed by 40 hex digits).
    pub contract_address: String,
    /// Interface document path, relative to the config file.
    pub abi_path: String,
    /// Optional name of the rendered client interface.
    #[serde(default)]
    pub interface_name: Option<String>,
}

impl ConsoleConfig {
    /// Validates one console entry.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_console_name(&self.name)?;
        if let Some(title) = &self.title
            && title.len() > MAX_TITLE_LENGTH
        {
            return Err(ConfigError::Invalid(format!("consoles.{}.title too long", self.name)));
        }
        if !is_contract_address(&self.contract_address) {
            return Err(ConfigError::Invalid(format!(
                "consoles.{}.contract_address must be 0x followed by {ADDRESS_HEX_DIGITS} hex \
                 digits",
                self.name
            )));
        }
        validate_path_string(&format!("consoles.{}.abi_path", self.name), &self.abi_path)?;
        if let Some(interface_name) = &self.interface_name
            && !is_interface_name(interface_name)
        {
            return Err(ConfigError::Invalid(format!(
                "consoles.{}.interface_name must be an identifier",
                self.name
            )));
        }
        Ok(())
    }

    /// Returns the typed console name.
    #[must_use]
    pub fn console_name(&self) -> ConsoleName {
        ConsoleName::new(self.name.clone())
    }

    /// Returns the display title, falling back to the name.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Returns client surface options for this console.
    #[must_use]
    pub fn surface_options(&self) -> SurfaceOptions {
        self.interface_name.as_ref().map_or_else(SurfaceOptions::default, |interface_name| {
            SurfaceOptions {
                interface_name: interface_name.clone(),
            }
        })
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Documents IO
// ============================================================================

/// Reads an interface document, failing when it exceeds `max_bytes`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read and
/// [`ConfigError::Invalid`] when it exceeds the limit.
pub fn read_document(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ConfigError> {
    validate_path(path)?;
    let file =
        File::open(path).map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut bytes = Vec::new();
    file.take(limit)
        .read_to_end(&mut bytes)
        .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    if bytes.len() > max_bytes {
        return Err(ConfigError::Invalid(format!(
            "interface document {} exceeds {max_bytes} bytes",
            path.display()
        )));
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a console name.
fn validate_console_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Invalid("consoles.name must be non-empty".to_string()));
    }
    if name.len() > MAX_CONSOLE_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("console name too long: {name}")));
    }
    let valid = name
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_');
    if !valid {
        return Err(ConfigError::Invalid(format!(
            "console name must use lowercase letters, digits, '-' or '_': {name}"
        )));
    }
    Ok(())
}

/// Returns true for `0x`-prefixed 20-byte hex addresses (any case).
fn is_contract_address(value: &str) -> bool {
    value.strip_prefix("0x").is_some_and(|digits| {
        digits.len() == ADDRESS_HEX_DIGITS && digits.chars().all(|ch| ch.is_ascii_hexdigit())
    })
}

/// Returns true for identifiers usable as an interface name.
fn is_interface_name(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    value.len() <= MAX_INTERFACE_NAME_LENGTH
        && (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
