// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{ArgGroup, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use xml_translate::app_config::{Config, LogLevel, RunOptions, Settings};
use xml_translate::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for xml-translate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// xml-translate - Translate Android XML resources with Google Cloud Translation
///
/// Reads the file line by line, translates the text of every `<string>` and
/// `<item>` tag and writes the result, keeping the rest of the file as is.
#[derive(Parser, Debug)]
#[command(name = "xml-translate")]
#[command(version)]
#[command(about = "Translate Android XML string resources line by line")]
#[command(long_about = "Parse an XML file, such as strings.xml for an Android app, and translate each item in the file using the Google Cloud Translation API.

Items are translated one at a time, so you can follow the output and catch any failure. The structure of the original file is copied to the output file.

EXAMPLES:
    xml-translate -f strings.xml -l de                  # Writes strings.xml-de
    xml-translate -f strings.xml -l fr -o values-fr/strings.xml
    xml-translate -t \"Hello please translate this\" -l es
    xml-translate -f arrays.xml -l ja -p my-project     # Explicit project id
    xml-translate completions bash > xml-translate.bash

AUTHENTICATION:
    Requests are billed to the project given with --project or the
    GOOGLE_CLOUD_PROJECT environment variable. The access token is taken from
    --access-token / GOOGLE_CLOUD_ACCESS_TOKEN, or from
    `gcloud auth print-access-token` when neither is set.

LANGUAGES:
    https://cloud.google.com/translate/docs/languages")]
#[command(subcommand_negates_reqs = true, args_conflicts_with_subcommands = true)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "text"])))]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// The XML file to translate
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// The text to translate
    #[arg(short, long)]
    text: Option<String>,

    /// Language code to translate to (e.g., 'de', 'fr', 'zh-CN')
    #[arg(short, long, required = true)]
    language: Option<String>,

    /// Output file (defaults to '<FILE>-<LANGUAGE>')
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Google Cloud project id
    #[arg(short, long, env = "GOOGLE_CLOUD_PROJECT")]
    project: Option<String>,

    /// OAuth2 access token for the Translation API
    #[arg(long, env = "GOOGLE_CLOUD_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// JSON settings file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {}{}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // The logger accepts everything; the effective level is the global max level
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "xml-translate", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run_translate(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    let log_level: Option<LogLevel> = options.log_level.map(Into::into);

    // If log level is set via command line, apply it immediately
    if let Some(level) = log_level {
        log::set_max_level(level.into());
    }

    let settings = match &options.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let run_options = RunOptions {
        file: options.file,
        text: options.text,
        language: options.language.unwrap_or_default(),
        output: options.output,
        project: options.project,
        access_token: options.access_token,
        log_level,
    };

    // Everything that can be checked offline is checked here, before any I/O
    let config = Config::resolve(run_options, settings)?;
    log::set_max_level(config.log_level.into());

    let controller = Controller::with_config(config);
    controller.run().await?;

    Ok(())
}
