// crates/contract-console-cli/src/i18n.rs
// ============================================================================
// Module: Console Message Catalog
// Description: English and Catalan text for every line the CLI prints.
// Purpose: Keep console output keyed, so locales stay in lockstep.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Each line the `contract-console` binary writes is looked up by key in a
//! per-locale table and filled in with named values. Call sites go through
//! [`t!`](crate::t); nothing formats user-visible text inline.
//!
//! ## Invariants
//! - The locale is fixed at startup; later selections are ignored.
//! - A key absent from the active table resolves through English, then to the
//!   key text itself.
//! - Values are substituted in the order the call site lists them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Languages the console can print in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English; also the lookup fallback.
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the two-letter tag accepted by `--lang`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Reads a language tag such as `ca`, `CA` or `ca_ES`.
    ///
    /// Only the primary subtag is considered; unknown languages yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let primary = value.trim().split(['-', '_']).next()?;
        SUPPORTED_LOCALES
            .iter()
            .copied()
            .find(|locale| primary.eq_ignore_ascii_case(locale.as_str()))
    }
}

/// Every locale with a catalog, English first.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// One `{name}` value passed to [`translate`].
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name without braces.
    pub key: &'static str,
    /// Rendered replacement text.
    pub value: String,
}

impl MessageArg {
    /// Pairs a placeholder name with its text.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Locale chosen at startup.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Fixes the output locale; calls after the first have no effect.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the output locale, English until one is set.
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English text, keyed by message id.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "contract-console {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.json_failed", "Failed to serialize {kind} output: {error}"),
    ("output.kind.consoles", "console list"),
    ("output.kind.methods", "method list"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid ({count} consoles)."),
    ("consoles.list.empty", "No consoles configured."),
    ("consoles.list.line", "{name}  {address}  {title}"),
    ("consoles.unknown", "Unknown console: {name}"),
    ("document.read_failed", "Failed to read interface document for {source}: {error}"),
    ("document.load_failed", "Failed to load interface document for {source}: {error}"),
    ("audit.open_failed", "Failed to open audit log at {path}: {error}"),
    ("methods.empty", "No invocable methods."),
    ("methods.line", "[{index}] {action} {signature}"),
    ("methods.field", "    {position}: {placeholder}"),
    ("invoke.failed", "Invocation failed: {error}"),
    ("invoke.index_mismatch", "Method at index {index} is {actual}, not {method}"),
    ("invoke.argument_rejected", "Argument rejected: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Catalan text; must carry every English key and placeholder.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "contract-console {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("output.json_failed", "No s'ha pogut serialitzar la sortida de {kind}: {error}"),
    ("output.kind.consoles", "la llista de consoles"),
    ("output.kind.methods", "la llista de mètodes"),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("config.validate.ok", "Configuració vàlida ({count} consoles)."),
    ("consoles.list.empty", "No hi ha cap consola configurada."),
    ("consoles.list.line", "{name}  {address}  {title}"),
    ("consoles.unknown", "Consola desconeguda: {name}"),
    (
        "document.read_failed",
        "No s'ha pogut llegir el document d'interfície de {source}: {error}",
    ),
    (
        "document.load_failed",
        "No s'ha pogut carregar el document d'interfície de {source}: {error}",
    ),
    ("audit.open_failed", "No s'ha pogut obrir el registre d'auditoria a {path}: {error}"),
    ("methods.empty", "No hi ha cap mètode invocable."),
    ("methods.line", "[{index}] {action} {signature}"),
    ("methods.field", "    {position}: {placeholder}"),
    ("invoke.failed", "La invocació ha fallat: {error}"),
    ("invoke.index_mismatch", "El mètode a l'índex {index} és {actual}, no {method}"),
    ("invoke.argument_rejected", "Argument rebutjat: {error}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Indexes one locale's table, building the map on first use.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Resolves `key` in the active locale and fills its placeholders.
///
/// Placeholders with no matching argument stay verbatim; arguments with no
/// placeholder are dropped.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(current_locale())
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    args.into_iter().fold(template.to_string(), |message, arg| {
        message.replace(&format!("{{{}}}", arg.key), &arg.value)
    })
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Looks up a message id and fills `{name}` slots from `name = value` pairs.
///
/// Each value is rendered with `to_string`, so anything `Display` works:
///
/// ```ignore
/// t!("invoke.failed", error = err)
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
