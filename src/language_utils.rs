use isolang::Language;

use crate::errors::ConfigError;

/// Language utilities for target language codes
///
/// The translation service accepts BCP-47 style codes ("de", "zh-CN",
/// "mni-Mtei"), so validation here is syntactic only. Whether a language is
/// supported is decided by the service.
/// Check that a code looks like a language tag
pub fn validate_target_language(code: &str) -> Result<(), ConfigError> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ConfigError::MissingLanguage);
    }

    let well_formed = code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && code.chars().next().is_some_and(|c| c.is_ascii_alphabetic());

    if !well_formed {
        return Err(ConfigError::InvalidLanguage(code.to_string()));
    }

    Ok(())
}

/// Primary language subtag, lowercased ("zh-CN" -> "zh")
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// English name of a language code, if it is a known ISO 639 code
pub fn language_display_name(code: &str) -> Option<String> {
    let primary = primary_subtag(code);

    let language = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }?;

    Some(language.to_name().to_string())
}

/// "German (de)" when the name is known, otherwise just the code
pub fn describe_language(code: &str) -> String {
    match language_display_name(code) {
        Some(name) => format!("{} ({})", name, code),
        None => code.to_string(),
    }
}
