//! External-origin tags such as `[EXT]` or `Extern:` inserted by mail
//! gateways.

use regex::Regex;

use super::aliases::alternation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSplit {
    /// Matched tag spans, trimmed and space-joined in order of appearance.
    pub tags: String,
    /// The subject with every matched span removed, trimmed.
    pub rest: String,
}

pub struct TagExtractor {
    pattern: Regex,
}

impl TagExtractor {
    /// Compile a matcher for `tags`. Returns `Ok(None)` when the list has no
    /// usable entries, in which case extraction is a no-op.
    pub fn new(tags: &[String]) -> Result<Option<Self>, regex::Error> {
        let (Some(plain), Some(bounded)) = (alternation(tags, false), alternation(tags, true))
        else {
            return Ok(None);
        };

        let pattern = Regex::new(&format!(
            r"(?i)(?:\[\s*(?:{plain})\s*\]|(?:{bounded}))\s*:?\s*"
        ))?;
        Ok(Some(Self { pattern }))
    }

    /// Collect every tag occurrence anywhere in `subject`.
    ///
    /// Removing a span can splice a new tag together (`[E[EXT]XT]`), so
    /// passes repeat until the remainder holds no tag at all.
    pub fn extract(&self, subject: &str) -> TagSplit {
        let mut tags: Vec<String> = Vec::new();
        let mut rest = subject.trim().to_string();

        while self.pattern.is_match(&rest) {
            rest = self.strip_pass(&rest, &mut tags);
        }

        TagSplit {
            tags: tags.join(" "),
            rest,
        }
    }

    fn strip_pass(&self, text: &str, tags: &mut Vec<String>) -> String {
        let mut rest = String::with_capacity(text.len());
        let mut last = 0;

        for m in self.pattern.find_iter(text) {
            rest.push_str(&text[last..m.start()]);
            let span = m.as_str().trim();
            if !span.is_empty() {
                tags.push(span.to_string());
            }
            last = m.end();
        }
        rest.push_str(&text[last..]);
        rest.trim().to_string()
    }
}
