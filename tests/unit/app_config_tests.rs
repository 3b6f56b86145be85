/*!
 * Tests for configuration resolution
 */

use anyhow::Result;
use std::path::PathBuf;
use xml_translate::app_config::{Config, InputSource, LogLevel, RunOptions, ServiceConfig, Settings};
use xml_translate::errors::ConfigError;
use crate::common;

fn text_options(text: &str) -> RunOptions {
    RunOptions {
        text: Some(text.to_string()),
        language: "de".to_string(),
        project: Some("my-project".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_serviceConfig_default_shouldTargetGoogleV3FromEnglish() {
    let service = ServiceConfig::default();
    assert_eq!(service.endpoint, "https://translation.googleapis.com");
    assert_eq!(service.location, "global");
    assert_eq!(service.source_language, "en-US");
    assert_eq!(service.mime_type, "text/plain");
}

#[test]
fn test_resolve_withFile_shouldDefaultOutputToInputDashLanguage() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_strings(temp_dir.path())?;

    let options = RunOptions {
        file: Some(input.clone()),
        language: "fr".to_string(),
        project: Some("my-project".to_string()),
        ..Default::default()
    };
    let config = Config::resolve(options, Settings::default())?;

    assert_eq!(config.input, InputSource::File(input.clone()));
    assert_eq!(config.output_path, Some(temp_dir.path().join("strings.xml-fr")));
    assert_eq!(config.project_id, "my-project");
    Ok(())
}

#[test]
fn test_resolve_withExplicitOutput_shouldKeepIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_strings(temp_dir.path())?;
    let output = temp_dir.path().join("values-fr").join("strings.xml");

    let options = RunOptions {
        file: Some(input),
        language: "fr".to_string(),
        output: Some(output.clone()),
        project: Some("my-project".to_string()),
        ..Default::default()
    };
    let config = Config::resolve(options, Settings::default())?;

    assert_eq!(config.output_path, Some(output));
    Ok(())
}

#[test]
fn test_resolve_withMissingFile_shouldFailBeforeProjectCheck() {
    let options = RunOptions {
        file: Some(PathBuf::from("definitely/not/here/strings.xml")),
        language: "fr".to_string(),
        project: None,
        ..Default::default()
    };

    let result = Config::resolve(options, Settings::default());
    assert!(matches!(result, Err(ConfigError::MissingInputFile(_))));
}

#[test]
fn test_resolve_withEmptyText_shouldFail() {
    let result = Config::resolve(text_options(""), Settings::default());
    assert!(matches!(result, Err(ConfigError::EmptyText)));
}

#[test]
fn test_resolve_withoutProject_shouldFail() {
    let mut options = text_options("Hello");
    options.project = None;

    let result = Config::resolve(options, Settings::default());
    assert!(matches!(result, Err(ConfigError::MissingProjectId)));
}

#[test]
fn test_resolve_withBlankProject_shouldFail() {
    let mut options = text_options("Hello");
    options.project = Some("   ".to_string());

    let result = Config::resolve(options, Settings::default());
    assert!(matches!(result, Err(ConfigError::MissingProjectId)));
}

#[test]
fn test_resolve_withProjectOnlyInSettings_shouldUseSettings() -> Result<()> {
    let mut options = text_options("Hello");
    options.project = None;
    let settings = Settings {
        project_id: Some("from-settings".to_string()),
        ..Default::default()
    };

    let config = Config::resolve(options, settings)?;
    assert_eq!(config.project_id, "from-settings");
    assert_eq!(config.output_path, None);
    Ok(())
}

#[test]
fn test_resolve_withBadLanguage_shouldFail() {
    let mut options = text_options("Hello");
    options.language = "  ".to_string();
    assert!(matches!(
        Config::resolve(options, Settings::default()),
        Err(ConfigError::MissingLanguage)
    ));

    let mut options = text_options("Hello");
    options.language = "../de".to_string();
    assert!(matches!(
        Config::resolve(options, Settings::default()),
        Err(ConfigError::InvalidLanguage(_))
    ));
}

#[test]
fn test_resolve_withBadEndpoint_shouldFail() {
    let settings = Settings {
        service: ServiceConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        },
        ..Default::default()
    };

    let result = Config::resolve(text_options("Hello"), settings);
    assert!(matches!(result, Err(ConfigError::InvalidEndpoint(_))));
}

#[test]
fn test_resolve_logLevel_shouldPreferCommandLine() -> Result<()> {
    let settings = Settings {
        log_level: Some(LogLevel::Warn),
        ..Default::default()
    };

    let config = Config::resolve(text_options("Hello"), settings.clone())?;
    assert_eq!(config.log_level, LogLevel::Warn);

    let mut options = text_options("Hello");
    options.log_level = Some(LogLevel::Debug);
    let config = Config::resolve(options, settings)?;
    assert_eq!(config.log_level, LogLevel::Debug);

    let config = Config::resolve(text_options("Hello"), Settings::default())?;
    assert_eq!(config.log_level, LogLevel::Info);
    Ok(())
}

#[test]
fn test_settingsLoad_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "settings.json",
        r#"{ "project_id": "abc", "log_level": "debug", "service": { "retry_count": 0 } }"#,
    )?;

    let settings = Settings::load(&path)?;

    assert_eq!(settings.project_id.as_deref(), Some("abc"));
    assert_eq!(settings.log_level, Some(LogLevel::Debug));
    assert_eq!(settings.service.retry_count, 0);
    assert_eq!(settings.service.source_language, "en-US");
    assert_eq!(settings.service.timeout_secs, 60);
    Ok(())
}

#[test]
fn test_settingsLoad_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "settings.json", "{ not json")?;

    assert!(matches!(Settings::load(&path), Err(ConfigError::SettingsFile(_))));
    assert!(matches!(
        Settings::load(temp_dir.path().join("missing.json")),
        Err(ConfigError::SettingsFile(_))
    ));
    Ok(())
}
