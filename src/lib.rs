/*!
 * # xml-translate
 *
 * A Rust library for translating Android XML string resources with
 * Google Cloud Translation.
 *
 * ## Features
 *
 * - Translate the text of `<string>` and `<item>` tags line by line
 * - Leave every other byte of the file untouched
 * - Never translate `@` references to other resources
 * - Translate a single free-standing text
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration resolution and validation
 * - `resource_line`: Classification and rewriting of single lines
 * - `transcoder`: Line-by-line translation of whole documents
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: Language code utilities
 * - `providers`: Translation service clients:
 *   - `providers::google`: Google Cloud Translation v3 client
 *   - `providers::mock`: In-process translator for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod resource_line;
pub mod transcoder;

// Re-export main types for easier usage
pub use app_config::{Config, InputSource, RunOptions, ServiceConfig, Settings};
pub use app_controller::{Controller, RunOutcome};
pub use errors::{ConfigError, ProviderError, TranslationError};
pub use providers::Translator;
pub use transcoder::{LineTranscoder, TranscodeStats};
