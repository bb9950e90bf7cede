//! Subject-line normalization for outgoing mail.
//!
//! The pipeline is a pure function of the subject and a [`Configuration`]:
//!
//! 1. strip (or lift out) external tags like `[EXT]`
//! 2. read the leading `Re:`/`Fwd:` chain into tokens
//! 3. collapse the chain (`Fwd: Re*3:`) or overwrite it (`Fwd:`)
//! 4. reassemble
//!
//! Running it twice gives the same result as running it once, so hosts may
//! call it on window open and again before send.

pub mod aliases;
pub mod collapse;
pub mod overwrite;
pub mod prefix;
pub mod tags;

use crate::domain::subject::{Configuration, PrefixMode};

use collapse::collapse_prefixes;
use overwrite::overwrite_prefixes;
use prefix::PrefixParser;
use tags::TagExtractor;

/// Patterns compiled from one configuration. Build a new one whenever the
/// configuration changes.
pub struct SubjectNormalizer {
    config: Configuration,
    tags: Option<TagExtractor>,
    prefixes: Option<PrefixParser>,
}

impl SubjectNormalizer {
    pub fn new(config: &Configuration) -> Result<Self, regex::Error> {
        let tags = if config.extract_tags {
            TagExtractor::new(&config.tag_list)?
        } else {
            None
        };
        let prefixes = if config.normalize_prefixes {
            PrefixParser::new(
                &config.reply_aliases,
                &config.forward_aliases,
                &config.labels,
            )?
        } else {
            None
        };

        Ok(Self {
            config: config.clone(),
            tags,
            prefixes,
        })
    }

    pub fn normalize(&self, subject: &str) -> String {
        let (tags, rest) = match &self.tags {
            Some(extractor) => {
                let split = extractor.extract(subject);
                let tags = if self.config.reinsert_tags {
                    split.tags
                } else {
                    String::new()
                };
                (tags, split.rest)
            }
            None => (String::new(), subject.to_string()),
        };

        let rest = match &self.prefixes {
            Some(parser) => {
                let parsed = parser.parse(&rest);
                match self.config.prefix_mode {
                    PrefixMode::Collapse => {
                        collapse_prefixes(&parsed.tokens, parsed.remainder, &self.config.labels)
                    }
                    PrefixMode::Overwrite => {
                        overwrite_prefixes(&parsed.tokens, parsed.remainder, &self.config.labels)
                    }
                }
            }
            None => rest,
        };

        if tags.is_empty() {
            rest.trim().to_string()
        } else {
            format!("{tags} {rest}").trim().to_string()
        }
    }
}

/// Normalize `subject` under `config`. Never fails: if the rule set cannot
/// be compiled the subject is returned as given.
pub fn normalize_subject(subject: &str, config: &Configuration) -> String {
    match SubjectNormalizer::new(config) {
        Ok(normalizer) => normalizer.normalize(subject),
        Err(e) => {
            log::warn!("subject rules failed to compile, leaving subject as is: {e}");
            subject.to_string()
        }
    }
}
