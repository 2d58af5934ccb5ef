// crates/contract-console-cli/src/main.rs
// ============================================================================
// Module: Contract Console CLI Entry Point
// Description: Command dispatcher for contract console configuration and
//              interface-document workflows.
// Purpose: Provide a safe, localized CLI over the contract console engine.
// Dependencies: clap, contract-console-config, contract-console-core, serde,
//               thiserror, tokio.
// ============================================================================

//! ## Overview
//! The contract console CLI validates console configuration, lists the
//! configured consoles, renders the generated client surface and method forms
//! for an interface document, and dispatches single invocations through the
//! console session. All user-facing strings are routed through the i18n
//! catalog. Interface documents and arguments are untrusted input.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use contract_console_cli::i18n::Locale;
use contract_console_cli::i18n::set_locale;
use contract_console_cli::t;
use contract_console_config::ContractConsoleConfig;
use contract_console_config::read_document;
use contract_console_core::AuditSink;
use contract_console_core::ConnectionGate;
use contract_console_core::ConsoleName;
use contract_console_core::ContractConsole;
use contract_console_core::FileAuditSink;
use contract_console_core::MethodDescriptor;
use contract_console_core::MethodIndex;
use contract_console_core::MethodName;
use contract_console_core::NoopAuditSink;
use contract_console_core::StderrAuditSink;
use contract_console_core::runtime::MAX_DOCUMENT_BYTES;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits and Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "CONTRACT_CONSOLE_LANG";
/// Console name used for documents loaded with `--abi`.
const ADHOC_CONSOLE_NAME: &str = "adhoc";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "contract-console", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `CONTRACT_CONSOLE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Configured console utilities.
    Consoles {
        /// Selected consoles subcommand.
        #[command(subcommand)]
        command: ConsolesCommand,
    },
    /// Print the generated client surface for an interface document.
    Surface(SurfaceCommand),
    /// Print the per-method form layout for an interface document.
    Methods(MethodsCommand),
    /// Dispatch one method through a console session.
    Invoke(InvokeCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a contract console configuration file.
    Validate(ConfigValidateCommand),
}

/// Consoles subcommands.
#[derive(Subcommand, Debug)]
enum ConsolesCommand {
    /// List configured consoles.
    List(ConsolesListCommand),
}

/// Output formats for structured CLI commands.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Pretty-printed JSON output.
    Json,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to contract-console.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `consoles list`.
#[derive(Args, Debug)]
struct ConsolesListCommand {
    /// Optional config file path (defaults to contract-console.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output format for the console listing.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Interface-document source shared by document commands.
#[derive(Args, Debug)]
struct SourceArgs {
    /// Configured console name.
    #[arg(long, value_name = "NAME", conflicts_with = "abi", required_unless_present = "abi")]
    console: Option<String>,
    /// Path to an interface document outside any configured console.
    #[arg(long, value_name = "PATH")]
    abi: Option<PathBuf>,
    /// Optional config file path used with `--console`.
    #[arg(long, value_name = "PATH", conflicts_with = "abi")]
    config: Option<PathBuf>,
}

/// Arguments for `surface`.
#[derive(Args, Debug)]
struct SurfaceCommand {
    /// Interface-document source.
    #[command(flatten)]
    source: SourceArgs,
}

/// Arguments for `methods`.
#[derive(Args, Debug)]
struct MethodsCommand {
    /// Interface-document source.
    #[command(flatten)]
    source: SourceArgs,
    /// Output format for the method listing.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `invoke`.
#[derive(Args, Debug)]
struct InvokeCommand {
    /// Interface-document source.
    #[command(flatten)]
    source: SourceArgs,
    /// Method name to dispatch.
    #[arg(long, value_name = "NAME")]
    method: String,
    /// Raw argument values in parameter order (empty values are omitted).
    #[arg(long = "arg", value_name = "VALUE", allow_hyphen_values = true)]
    args: Vec<String>,
    /// Dispatch a specific descriptor instance instead of the last one named `--method`.
    #[arg(long, value_name = "INDEX")]
    index: Option<usize>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Consoles {
            command,
        } => command_consoles(command),
        Commands::Surface(command) => command_surface(&command),
        Commands::Methods(command) => command_methods(&command),
        Commands::Invoke(command) => command_invoke(command).await,
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    write_stdout_line(&t!("config.validate.ok", count = config.consoles.len()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Consoles Commands
// ============================================================================

/// Summary row for one configured console.
#[derive(Debug, Serialize)]
struct ConsoleSummary<'a> {
    /// Console name.
    name: &'a str,
    /// Display title.
    title: &'a str,
    /// Fixed contract address.
    contract_address: &'a str,
    /// Interface document path as configured.
    abi_path: &'a str,
}

/// Dispatches consoles subcommands.
fn command_consoles(command: ConsolesCommand) -> CliResult<ExitCode> {
    match command {
        ConsolesCommand::List(command) => command_consoles_list(&command),
    }
}

/// Executes the console listing command.
fn command_consoles_list(command: &ConsolesListCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let summaries: Vec<ConsoleSummary<'_>> = config
        .consoles
        .iter()
        .map(|entry| ConsoleSummary {
            name: &entry.name,
            title: entry.display_title(),
            contract_address: &entry.contract_address,
            abi_path: &entry.abi_path,
        })
        .collect();
    match command.format {
        OutputFormat::Json => write_json(&summaries, &t!("output.kind.consoles"))?,
        OutputFormat::Text => {
            if summaries.is_empty() {
                write_stdout(&t!("consoles.list.empty"))?;
            }
            for summary in &summaries {
                write_stdout(&t!(
                    "consoles.list.line",
                    name = summary.name,
                    address = summary.contract_address,
                    title = summary.title
                ))?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Document Commands
// ============================================================================

/// Executes the `surface` command.
fn command_surface(command: &SurfaceCommand) -> CliResult<ExitCode> {
    let console = open_console(&command.source)?;
    write_stdout_bytes(console.generate_client_surface().as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `methods` command.
fn command_methods(command: &MethodsCommand) -> CliResult<ExitCode> {
    let console = open_console(&command.source)?;
    let forms = console.forms();
    if command.format == OutputFormat::Json {
        write_json(&forms, &t!("output.kind.methods"))?;
        return Ok(ExitCode::SUCCESS);
    }
    if forms.is_empty() {
        write_stdout(&t!("methods.empty"))?;
    }
    for form in &forms {
        let signature = console
            .descriptors()
            .get(form.index)
            .map(MethodDescriptor::signature)
            .unwrap_or_else(|| form.name.to_string());
        write_stdout(&t!(
            "methods.line",
            index = form.index.get(),
            action = form.action,
            signature = signature
        ))?;
        for field in &form.fields {
            write_stdout(&t!(
                "methods.field",
                position = field.position,
                placeholder = field.placeholder
            ))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Invoke Command
// ============================================================================

/// Executes the `invoke` command.
///
/// The CLI attaches no wallet channel, so the console gate stays empty and
/// dispatch concludes with the engine's not-connected outcome. The attempt is
/// still audited through the configured sink. With `--index`, the descriptor
/// at that index must carry the `--method` name, since arguments are stored
/// per name.
async fn command_invoke(command: InvokeCommand) -> CliResult<ExitCode> {
    let mut console = open_console(&command.source)?;
    let method = MethodName::new(command.method);
    if let Some(index) = command.index
        && let Some(descriptor) = console.descriptors().get(MethodIndex::new(index))
        && descriptor.name != method
    {
        return Err(CliError::new(t!(
            "invoke.index_mismatch",
            index = index,
            actual = descriptor.name,
            method = method
        )));
    }
    for (position, value) in command.args.iter().enumerate() {
        console
            .set_argument(&method, position, value.as_str())
            .map_err(|err| CliError::new(t!("invoke.argument_rejected", error = err)))?;
    }
    let outcome = match command.index {
        Some(index) => console.invoke_instance(MethodIndex::new(index)).await,
        None => console.invoke(&method).await,
    }
    .map_err(|err| CliError::new(t!("invoke.failed", error = err)))?;
    write_stdout(&outcome.display_message())?;
    Ok(if outcome.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

// ============================================================================
// SECTION: Console Loading
// ============================================================================

/// Loads and validates the console configuration.
fn load_config(path: Option<&Path>) -> CliResult<ContractConsoleConfig> {
    ContractConsoleConfig::load(path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Builds a console session with its descriptors loaded from `source`.
fn open_console(source: &SourceArgs) -> CliResult<ContractConsole> {
    let gate = Arc::new(ConnectionGate::new());
    let (label, bytes, mut console) = if let Some(path) = &source.abi {
        let label = path.display().to_string();
        let bytes = read_document(path, MAX_DOCUMENT_BYTES).map_err(|err| {
            CliError::new(t!("document.read_failed", source = label, error = err))
        })?;
        (label, bytes, ContractConsole::new(adhoc_console_name(path), gate))
    } else {
        let name = source.console.as_deref().unwrap_or_default();
        let config = load_config(source.config.as_deref())?;
        let entry = config
            .console(name)
            .ok_or_else(|| CliError::new(t!("consoles.unknown", name = name)))?;
        let bytes = config.read_console_document(entry).map_err(|err| {
            CliError::new(t!("document.read_failed", source = name, error = err))
        })?;
        let console = ContractConsole::new(entry.console_name(), gate)
            .with_audit(audit_sink(&config)?)
            .with_surface_options(entry.surface_options());
        (name.to_string(), bytes, console)
    };
    console
        .load_descriptor_slice(&bytes)
        .map_err(|err| CliError::new(t!("document.load_failed", source = label, error = err)))?;
    Ok(console)
}

/// Names an ad-hoc console after its document's file stem.
fn adhoc_console_name(path: &Path) -> ConsoleName {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| ConsoleName::new(ADHOC_CONSOLE_NAME), ConsoleName::new)
}

/// Selects the audit sink described by the `[audit]` config section.
fn audit_sink(config: &ContractConsoleConfig) -> CliResult<Arc<dyn AuditSink>> {
    if !config.audit.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match config.audit_path() {
        Some(path) => {
            let sink = FileAuditSink::new(&path).map_err(|err| {
                CliError::new(t!("audit.open_failed", path = path.display(), error = err))
            })?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Converts CLI language selections into catalog locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

/// Resolves the output locale from the flag, then the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stdout, mapping failures to a localized error.
fn write_stdout(message: &str) -> CliResult<()> {
    write_stdout_line(message).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes pretty-printed JSON to stdout.
fn write_json<T: Serialize>(value: &T, kind: &str) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("output.json_failed", kind = kind, error = err)))?;
    write_stdout(&rendered)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
