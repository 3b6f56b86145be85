/*!
 * End-to-end translation tests using the mock translator
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use xml_translate::app_config::{Config, RunOptions, Settings};
use xml_translate::app_controller::{Controller, RunOutcome};
use xml_translate::providers::mock::MockTranslator;
use xml_translate::transcoder::TranscodeStats;
use crate::common;

const EXPECTED_FRENCH: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <!-- Application name -->
    <string name="app_name">[fr] Notes</string>
    <string name="greeting">[fr] Hello</string>
    <string name="shared">@string/app_name</string>
    <string name="blank"></string>
    <string name="multiline">First part
        and second part</string>
    <string-array name="colors">
        <item>[fr] Red</item>
        <item>@string/shared</item>
    </string-array>
    <plurals name="minutes">
        <item quantity="one">[fr] %d minute</item>
    </plurals>
</resources>
"#;

fn file_controller(input: &Path, language: &str) -> Result<Controller> {
    let options = RunOptions {
        file: Some(input.to_path_buf()),
        language: language.to_string(),
        project: Some("test-project".to_string()),
        ..Default::default()
    };
    Ok(Controller::with_config(Config::resolve(options, Settings::default())?))
}

#[tokio::test]
async fn test_runWith_fileMode_shouldTranslateOnlyTagPayloads() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_strings(temp_dir.path())?;
    let controller = file_controller(&input, "fr")?;
    let translator = MockTranslator::working();
    let mut diagnostics = Vec::new();

    let outcome = controller.run_with(&translator, &mut diagnostics).await?;

    let output = temp_dir.path().join("strings.xml-fr");
    assert_eq!(fs::read_to_string(&output)?, EXPECTED_FRENCH);
    assert_eq!(
        outcome,
        RunOutcome::File(TranscodeStats { lines: 17, translated: 4, references: 2, passed_through: 11 })
    );

    let texts: Vec<String> = translator.requests().into_iter().map(|r| r.text).collect();
    assert_eq!(texts, vec!["Notes", "Hello", "Red", "%d minute"]);
    assert!(translator.requests().iter().all(|r| r.target_language == "fr"));

    // Input is never modified
    assert_eq!(fs::read_to_string(&input)?, common::SAMPLE_STRINGS_XML);
    Ok(())
}

#[tokio::test]
async fn test_runWith_fileMode_shouldReportEachTranslationOnDiagnostics() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "strings.xml",
        "<resources>\n  <string name=\"x\">Hello</string>\n</resources>\n",
    )?;
    let controller = file_controller(&input, "fr")?;
    let translator = MockTranslator::working().with_custom_response(|_| "Bonjour".to_string());
    let mut diagnostics = Vec::new();

    controller.run_with(&translator, &mut diagnostics).await?;

    assert_eq!(String::from_utf8(diagnostics)?, "\"Hello\"\n\"Bonjour\"\n\n");
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("strings.xml-fr"))?,
        "<resources>\n  <string name=\"x\">Bonjour</string>\n</resources>\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_runWith_explicitOutputInNewDirectory_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_strings(temp_dir.path())?;
    let output = temp_dir.path().join("values-fr").join("strings.xml");
    let options = RunOptions {
        file: Some(input),
        language: "fr".to_string(),
        output: Some(output.clone()),
        project: Some("test-project".to_string()),
        ..Default::default()
    };
    let controller = Controller::with_config(Config::resolve(options, Settings::default())?);

    controller.run_with(&MockTranslator::working(), &mut std::io::sink()).await?;

    assert_eq!(fs::read_to_string(&output)?, EXPECTED_FRENCH);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_runWith_fileMode_shouldGiveOutputTheInputPermissions() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_strings(temp_dir.path())?;
    fs::set_permissions(&input, fs::Permissions::from_mode(0o644))?;
    let controller = file_controller(&input, "fr")?;

    controller.run_with(&MockTranslator::working(), &mut std::io::sink()).await?;

    let output_mode = fs::metadata(temp_dir.path().join("strings.xml-fr"))?.permissions().mode();
    assert_eq!(output_mode & 0o777, 0o644);
    Ok(())
}

#[tokio::test]
async fn test_runWith_translatorFailure_shouldAbortAndKeepPreviousOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_strings(temp_dir.path())?;
    let output = common::create_test_file(temp_dir.path(), "strings.xml-fr", "previous run")?;
    let controller = file_controller(&input, "fr")?;
    let translator = MockTranslator::fail_on(3);

    let result = controller.run_with(&translator, &mut std::io::sink()).await;

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("Simulated failure"));
    // Nothing after the failing line was sent
    assert_eq!(translator.request_count(), 3);
    assert_eq!(fs::read_to_string(&output)?, "previous run");
    assert_eq!(
        common::list_file_names(temp_dir.path())?,
        vec!["strings.xml", "strings.xml-fr"]
    );
    Ok(())
}

#[tokio::test]
async fn test_runWith_translatorFailure_shouldNotCreateOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_strings(temp_dir.path())?;
    let controller = file_controller(&input, "de")?;

    let result = controller.run_with(&MockTranslator::failing(), &mut std::io::sink()).await;

    assert!(result.is_err());
    assert!(!temp_dir.path().join("strings.xml-de").exists());
    Ok(())
}

#[tokio::test]
async fn test_runWith_textMode_shouldReturnTranslationVerbatim() -> Result<()> {
    let options = RunOptions {
        text: Some("Hello".to_string()),
        language: "de".to_string(),
        project: Some("test-project".to_string()),
        ..Default::default()
    };
    let controller = Controller::with_config(Config::resolve(options, Settings::default())?);
    let translator = MockTranslator::working().with_custom_response(|req| {
        match (req.text.as_str(), req.target_language.as_str()) {
            ("Hello", "de") => "Hallo".to_string(),
            _ => "unexpected".to_string(),
        }
    });
    let mut diagnostics = Vec::new();

    let outcome = controller.run_with(&translator, &mut diagnostics).await?;

    assert_eq!(outcome, RunOutcome::Text("Hallo".to_string()));
    assert_eq!(String::from_utf8(diagnostics)?, "\"Hello\"\n\"Hallo\"\n\n");
    assert_eq!(translator.request_count(), 1);
    assert_eq!(controller.config().output_path, None);
    Ok(())
}

#[tokio::test]
async fn test_runWith_textMode_withEmptyResult_shouldReturnEmptyString() -> Result<()> {
    let options = RunOptions {
        text: Some("Hello".to_string()),
        language: "de".to_string(),
        project: Some("test-project".to_string()),
        ..Default::default()
    };
    let controller = Controller::with_config(Config::resolve(options, Settings::default())?);

    let outcome = controller.run_with(&MockTranslator::empty(), &mut std::io::sink()).await?;

    assert_eq!(outcome, RunOutcome::Text(String::new()));
    Ok(())
}
