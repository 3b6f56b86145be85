use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use crate::app_config::{Config, InputSource};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::Translator;
use crate::providers::google::{self, GoogleTranslate};
use crate::transcoder::{LineTranscoder, TranscodeStats};

// @module: Application controller for resource translation

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A file was translated and written
    File(TranscodeStats),
    /// A single text was translated
    Text(String),
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run against Google Cloud Translation, printing diagnostics to stdout
    pub async fn run(&self) -> Result<RunOutcome> {
        let access_token = match &self.config.access_token {
            Some(token) => token.clone(),
            None => google::gcloud_access_token().await
                .context("No access token given and gcloud could not provide one")?,
        };

        let translator = GoogleTranslate::new(&self.config.project_id, access_token, &self.config.service)?;
        debug!("Using {:?}", translator);

        let stdout = io::stdout();
        let mut diagnostics = stdout.lock();
        self.run_with(&translator, &mut diagnostics).await
    }

    /// Run with the given translator
    pub async fn run_with<T: Translator + ?Sized>(
        &self,
        translator: &T,
        diagnostics: &mut dyn Write,
    ) -> Result<RunOutcome> {
        let start_time = Instant::now();

        info!(
            "Translating from {} to {}",
            self.config.service.source_language,
            language_utils::describe_language(&self.config.target_language)
        );

        let outcome = match &self.config.input {
            InputSource::File(input) => {
                let output = self.config.output_path.as_deref()
                    .context("No output path resolved for file input")?;
                let stats = self.translate_file(translator, input, output, diagnostics).await?;
                info!("Output written to {:?}", output);
                RunOutcome::File(stats)
            }
            InputSource::Text(text) => {
                RunOutcome::Text(self.translate_text(translator, text, diagnostics).await?)
            }
        };

        info!("Translation completed in {}.", Self::format_duration(start_time.elapsed()));

        Ok(outcome)
    }

    /// Translate a resource file line by line.
    ///
    /// The output is staged next to its final location and only moved into
    /// place once every line has been written.
    pub async fn translate_file<T: Translator + ?Sized>(
        &self,
        translator: &T,
        input: &Path,
        output: &Path,
        diagnostics: &mut dyn Write,
    ) -> Result<TranscodeStats> {
        info!("Translating file {:?}", input);

        let mut reader = FileManager::open_reader(input)?;
        let staging = FileManager::create_staging_file(output)?;
        FileManager::copy_permissions(&staging, input)?;

        let stats = {
            let mut writer = BufWriter::new(staging.as_file());
            let transcoder = LineTranscoder::new(translator, &self.config.target_language);
            transcoder.transcode_stream(&mut reader, &mut writer, diagnostics).await
                .with_context(|| format!("Failed to translate {:?}", input))?
        };

        FileManager::persist(staging, output)?;

        Ok(stats)
    }

    /// Translate a single free-standing text
    pub async fn translate_text<T: Translator + ?Sized>(
        &self,
        translator: &T,
        text: &str,
        diagnostics: &mut dyn Write,
    ) -> Result<String> {
        writeln!(diagnostics, "{:?}", text)?;

        let translation = translator.translate(text, &self.config.target_language).await
            .context("Failed to translate text")?;

        writeln!(diagnostics, "{:?}", translation)?;
        writeln!(diagnostics)?;

        Ok(translation)
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
