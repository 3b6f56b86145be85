/*!
 * Line transcoder for resource files.
 *
 * Reads a document one physical line at a time and writes exactly one line
 * back for each, in order. Translatable lines are sent to the translator one
 * by one and awaited before the next line is read, so at most one request is
 * ever in flight and the first failure stops the run.
 *
 * For every translated line the payload and its translation are written to a
 * diagnostics sink in quoted form, followed by a blank line.
 */

use std::io::{BufRead, Write};

use log::{debug, info, trace};

use crate::errors::TranslationError;
use crate::providers::Translator;
use crate::resource_line::{self, LineClass};

/// What happened to a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Not a translatable tag; emitted unchanged
    PassThrough,
    /// Tag content is an `@` reference; emitted unchanged
    Reference,
    /// Tag content was translated and substituted
    Translated,
}

/// A line after transcoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodedLine {
    /// Output text, including the original line terminator
    pub text: String,
    /// How the line was handled
    pub outcome: LineOutcome,
}

/// Counters for one transcoding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscodeStats {
    /// Lines read (and written)
    pub lines: usize,
    /// Lines whose payload was translated
    pub translated: usize,
    /// Lines skipped because their payload is a reference
    pub references: usize,
    /// Lines written unchanged for any other reason
    pub passed_through: usize,
}

impl TranscodeStats {
    fn record(&mut self, outcome: LineOutcome) {
        self.lines += 1;
        match outcome {
            LineOutcome::PassThrough => self.passed_through += 1,
            LineOutcome::Reference => self.references += 1,
            LineOutcome::Translated => self.translated += 1,
        }
    }
}

/// Rewrites resource lines through a translator
#[derive(Debug)]
pub struct LineTranscoder<'a, T: Translator + ?Sized> {
    translator: &'a T,
    target_language: &'a str,
}

impl<'a, T: Translator + ?Sized> LineTranscoder<'a, T> {
    /// Create a transcoder translating into `target_language`
    pub fn new(translator: &'a T, target_language: &'a str) -> Self {
        Self {
            translator,
            target_language,
        }
    }

    /// Transcode one line
    pub async fn transcode_line(
        &self,
        line: &str,
        diagnostics: &mut dyn Write,
    ) -> Result<TranscodedLine, TranslationError> {
        let payload = match resource_line::classify(line) {
            LineClass::PassThrough => {
                trace!("Passing through: {:?}", line.trim_end());
                return Ok(TranscodedLine {
                    text: line.to_string(),
                    outcome: LineOutcome::PassThrough,
                });
            }
            LineClass::Reference { payload, .. } => {
                debug!("Skipping reference {}", payload);
                return Ok(TranscodedLine {
                    text: line.to_string(),
                    outcome: LineOutcome::Reference,
                });
            }
            LineClass::Translatable { payload, .. } => payload,
        };

        writeln!(diagnostics, "{:?}", payload)?;

        let translation = self.translator.translate(payload, self.target_language).await?;

        writeln!(diagnostics, "{:?}", translation)?;
        writeln!(diagnostics)?;

        Ok(TranscodedLine {
            text: resource_line::substitute(line, payload, &translation),
            outcome: LineOutcome::Translated,
        })
    }

    /// Transcode a sequence of lines, returning one output line per input line
    pub async fn transcode_lines<I, S>(
        &self,
        lines: I,
        diagnostics: &mut dyn Write,
    ) -> Result<Vec<String>, TranslationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut output = Vec::new();
        for line in lines {
            let transcoded = self.transcode_line(line.as_ref(), diagnostics).await?;
            output.push(transcoded.text);
        }
        Ok(output)
    }

    /// Transcode everything `reader` yields into `writer`.
    ///
    /// Line terminators are read and written back as they are, so untouched
    /// lines come out byte for byte. Input must be UTF-8.
    pub async fn transcode_stream<R, W>(
        &self,
        reader: &mut R,
        writer: &mut W,
        diagnostics: &mut dyn Write,
    ) -> Result<TranscodeStats, TranslationError>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        let mut stats = TranscodeStats::default();
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }

            let transcoded = self.transcode_line(&line, diagnostics).await?;
            writer.write_all(transcoded.text.as_bytes())?;
            stats.record(transcoded.outcome);
        }

        writer.flush()?;

        info!(
            "Processed {} lines: {} translated, {} references kept, {} unchanged",
            stats.lines, stats.translated, stats.references, stats.passed_through
        );

        Ok(stats)
    }
}
