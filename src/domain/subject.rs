use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixKind {
    Reply,
    Forward,
}

/// One reply/forward marker read off the front of a subject, e.g. `Re*3:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixToken {
    pub kind: PrefixKind,
    pub count: u32,
}

impl PrefixToken {
    pub fn new(kind: PrefixKind, count: u32) -> Self {
        Self {
            kind,
            count: count.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixMode {
    #[default]
    Collapse,
    Overwrite,
}

impl PrefixMode {
    /// Unknown values fall back to `Collapse`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "overwrite" => PrefixMode::Overwrite,
            _ => PrefixMode::Collapse,
        }
    }
}

/// Canonical text written for each prefix kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub reply: String,
    pub forward: String,
}

impl Labels {
    pub fn for_kind(&self, kind: PrefixKind) -> &str {
        match kind {
            PrefixKind::Reply => &self.reply,
            PrefixKind::Forward => &self.forward,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            reply: "Re".to_string(),
            forward: "Fwd".to_string(),
        }
    }
}

/// Everything one normalization call needs. Lists hold literal text; they
/// are escaped when the matching patterns are compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub extract_tags: bool,
    pub reinsert_tags: bool,
    pub tag_list: Vec<String>,
    pub normalize_prefixes: bool,
    pub prefix_mode: PrefixMode,
    pub reply_aliases: Vec<String>,
    pub forward_aliases: Vec<String>,
    pub labels: Labels,
}

impl Configuration {
    /// A configuration with every list empty; any subject passes through.
    pub fn empty() -> Self {
        Self {
            extract_tags: true,
            reinsert_tags: false,
            tag_list: Vec::new(),
            normalize_prefixes: true,
            prefix_mode: PrefixMode::Collapse,
            reply_aliases: Vec::new(),
            forward_aliases: Vec::new(),
            labels: Labels::default(),
        }
    }
}
