/*!
 * Line classification for Android XML resource files.
 *
 * Each physical line is looked at on its own. A line is translatable when,
 * once trimmed, it starts with a `<string ` or `<item` tag whose text content
 * closes on the same line and is not an `@` reference to another resource.
 * Tags that span several lines are never matched and pass through untouched.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// `<string name="...">payload</string>`
static STRING_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<string.*?>(.*?)</string>").unwrap()
});

/// `<item ...>payload</item>`
static ITEM_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<item.*?>(.*?)</item>").unwrap()
});

/// Tag shapes that can carry a translatable payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<string name="...">`
    String,
    /// `<item>` inside a `string-array` or `plurals`
    Item,
}

impl TagKind {
    fn regex(self) -> &'static Regex {
        match self {
            Self::String => &*STRING_TAG_REGEX,
            Self::Item => &*ITEM_TAG_REGEX,
        }
    }
}

/// Result of classifying one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Emit the line unchanged
    PassThrough,
    /// Tag content points at another resource (`@string/...`); emit unchanged
    Reference { kind: TagKind, payload: &'a str },
    /// Tag content is literal text to translate
    Translatable { kind: TagKind, payload: &'a str },
}

/// Tag kind suggested by the start of a trimmed line.
///
/// `<string ` needs the trailing space so that `<string-array` and
/// `<string/>` don't count; `<item` matches with or without attributes.
pub fn tag_kind(probe: &str) -> Option<TagKind> {
    if probe.starts_with("<string ") {
        Some(TagKind::String)
    } else if probe.starts_with("<item") {
        Some(TagKind::Item)
    } else {
        None
    }
}

/// Text between the opening tag and its closing tag, first match only.
///
/// An empty payload counts as no match.
pub fn extract_payload(kind: TagKind, probe: &str) -> Option<&str> {
    kind.regex()
        .captures(probe)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|payload| !payload.is_empty())
}

/// Whether a payload is a reference to another resource entry
pub fn is_reference(payload: &str) -> bool {
    payload.starts_with('@')
}

/// Classify a raw input line. Leading and trailing whitespace (including the
/// line terminator) is ignored for matching only.
pub fn classify(line: &str) -> LineClass<'_> {
    let probe = line.trim();

    let Some(kind) = tag_kind(probe) else {
        return LineClass::PassThrough;
    };

    match extract_payload(kind, probe) {
        None => LineClass::PassThrough,
        Some(payload) if is_reference(payload) => LineClass::Reference { kind, payload },
        Some(payload) => LineClass::Translatable { kind, payload },
    }
}

/// Replace the first `>payload<` in `line` with `>translation<`.
///
/// Every other byte of the line, indentation and terminator included, is
/// kept as is.
pub fn substitute(line: &str, payload: &str, translation: &str) -> String {
    let needle = format!(">{}<", payload);
    let replacement = format!(">{}<", translation);
    line.replacen(&needle, &replacement, 1)
}
