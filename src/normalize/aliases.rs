//! Turns the raw comma-separated setting strings into the lookup lists the
//! engine matches against.

use crate::domain::subject::{Configuration, Labels, PrefixMode};

pub const DEFAULT_TAGS: &str = "EXT, Extern, External";
pub const DEFAULT_REPLY_ALIASES: &str = "Re, Aw, Antw";
pub const DEFAULT_FORWARD_ALIASES: &str = "Fw, Fwd, WG";
pub const DEFAULT_REPLY_LABEL: &str = "Re";
pub const DEFAULT_FORWARD_LABEL: &str = "Fwd";

/// Split a comma-separated list into trimmed, non-empty entries, dropping
/// case-insensitive duplicates (first spelling wins).
///
/// A missing or blank `raw` yields the parsed `default` instead.
pub fn parse_list(raw: Option<&str>, default: &str) -> Vec<String> {
    let source = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => default,
    };

    let mut out: Vec<String> = Vec::new();
    for item in source.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let folded = item.to_lowercase();
        if out.iter().any(|seen| seen.to_lowercase() == folded) {
            continue;
        }
        out.push(item.to_string());
    }
    out
}

/// A label is used verbatim apart from surrounding whitespace and a
/// trailing colon, which the renderer adds itself.
pub fn parse_label(raw: Option<&str>, default: &str) -> String {
    let cleaned = raw
        .map(|s| s.trim().trim_end_matches(':').trim_end())
        .unwrap_or("");
    if cleaned.is_empty() {
        default.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Raw, unvalidated setting strings as the settings store hands them out.
#[derive(Debug, Clone, Default)]
pub struct RawAliasSettings<'a> {
    pub tags: Option<&'a str>,
    pub reply_aliases: Option<&'a str>,
    pub forward_aliases: Option<&'a str>,
    pub reply_label: Option<&'a str>,
    pub forward_label: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConfiguration {
    pub tags: Vec<String>,
    pub reply_aliases: Vec<String>,
    pub forward_aliases: Vec<String>,
    pub labels: Labels,
}

impl AliasConfiguration {
    pub fn parse(raw: &RawAliasSettings<'_>) -> Self {
        Self {
            tags: parse_list(raw.tags, DEFAULT_TAGS),
            reply_aliases: parse_list(raw.reply_aliases, DEFAULT_REPLY_ALIASES),
            forward_aliases: parse_list(raw.forward_aliases, DEFAULT_FORWARD_ALIASES),
            labels: Labels {
                reply: parse_label(raw.reply_label, DEFAULT_REPLY_LABEL),
                forward: parse_label(raw.forward_label, DEFAULT_FORWARD_LABEL),
            },
        }
    }

    pub fn into_configuration(
        self,
        extract_tags: bool,
        reinsert_tags: bool,
        normalize_prefixes: bool,
        prefix_mode: PrefixMode,
    ) -> Configuration {
        Configuration {
            extract_tags,
            reinsert_tags,
            tag_list: self.tags,
            normalize_prefixes,
            prefix_mode,
            reply_aliases: self.reply_aliases,
            forward_aliases: self.forward_aliases,
            labels: self.labels,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        AliasConfiguration::parse(&RawAliasSettings::default()).into_configuration(
            true,
            false,
            true,
            PrefixMode::Collapse,
        )
    }
}

/// Escape each literal and join them into one alternation body.
///
/// Entries that start or end with a word character get a `\b` on that side
/// so `EXT` never matches inside `Extern`. Returns `None` for an empty list.
pub fn alternation(items: &[String], word_bounded: bool) -> Option<String> {
    let parts: Vec<String> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            let escaped = regex::escape(s);
            if !word_bounded {
                return escaped;
            }
            let lead = if s.chars().next().is_some_and(is_word_char) {
                r"\b"
            } else {
                ""
            };
            let tail = if s.chars().last().is_some_and(is_word_char) {
                r"\b"
            } else {
                ""
            };
            format!("{lead}{escaped}{tail}")
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("|"))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
