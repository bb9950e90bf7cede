//! Reads the reply/forward marker chain (`Re: Fwd*2: AW:`) off the front of
//! a subject.

use regex::Regex;

use super::aliases::alternation;
use crate::domain::subject::{Labels, PrefixKind, PrefixToken};

pub struct PrefixParser {
    pattern: Regex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPrefixes<'a> {
    pub tokens: Vec<PrefixToken>,
    pub remainder: &'a str,
}

impl PrefixParser {
    /// Build the anchored token matcher. A label is recognised as an alias of
    /// its own kind whenever that kind has aliases configured, so rendered
    /// output parses back to the same tokens. Returns `Ok(None)` when neither
    /// kind has any alias.
    pub fn new(
        reply_aliases: &[String],
        forward_aliases: &[String],
        labels: &Labels,
    ) -> Result<Option<Self>, regex::Error> {
        let reply = with_label(reply_aliases, &labels.reply);
        let forward = with_label(forward_aliases, &labels.forward);

        let reply = alternation(&reply, false);
        let forward = alternation(&forward, false);

        let alias = match (reply, forward) {
            (None, None) => return Ok(None),
            (Some(r), None) => format!("(?P<reply>{r})"),
            (None, Some(f)) => format!("(?P<forward>{f})"),
            (Some(r), Some(f)) => format!("(?P<reply>{r})|(?P<forward>{f})"),
        };

        let pattern = Regex::new(&format!(
            r"^(?i)(?:{alias})(?:\*(?P<count>[0-9]+))?[ \t]*:\s*"
        ))?;
        Ok(Some(Self { pattern }))
    }

    /// Consume markers from the start of `text` until one fails to match.
    pub fn parse<'a>(&self, text: &'a str) -> ParsedPrefixes<'a> {
        let mut tokens = Vec::new();
        let mut rest = text.trim_start();

        while let Some(caps) = self.pattern.captures(rest) {
            let kind = if caps.name("reply").is_some() {
                PrefixKind::Reply
            } else {
                PrefixKind::Forward
            };
            let count = caps
                .name("count")
                .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
                .unwrap_or(1);

            tokens.push(PrefixToken::new(kind, count));

            // the match always covers at least the colon
            let consumed = caps.get(0).map(|m| m.end()).unwrap_or(rest.len());
            rest = &rest[consumed..];
        }

        ParsedPrefixes {
            tokens,
            remainder: rest,
        }
    }
}

fn with_label(aliases: &[String], label: &str) -> Vec<String> {
    let mut out = aliases.to_vec();
    if out.iter().all(|a| a.trim().is_empty()) {
        return out;
    }
    let label = label.trim();
    if !label.is_empty() && !out.iter().any(|a| a.to_lowercase() == label.to_lowercase()) {
        out.push(label.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn parser() -> PrefixParser {
        PrefixParser::new(
            &list(&["Re", "Aw", "Antw"]),
            &list(&["Fwd", "WG"]),
            &Labels::default(),
        )
        .unwrap()
        .unwrap()
    }

    #[test]
    fn test_parse_chain_in_order() {
        let parsed = parser().parse("Fwd: Re: Aw: Re: Hello");
        assert_eq!(
            parsed.tokens,
            vec![
                PrefixToken::new(PrefixKind::Forward, 1),
                PrefixToken::new(PrefixKind::Reply, 1),
                PrefixToken::new(PrefixKind::Reply, 1),
                PrefixToken::new(PrefixKind::Reply, 1),
            ]
        );
        assert_eq!(parsed.remainder, "Hello");
    }

    #[test]
    fn test_parse_repetition_marker() {
        let parsed = parser().parse("RE*3: wg*2:Budget");
        assert_eq!(
            parsed.tokens,
            vec![
                PrefixToken::new(PrefixKind::Reply, 3),
                PrefixToken::new(PrefixKind::Forward, 2),
            ]
        );
        assert_eq!(parsed.remainder, "Budget");
    }

    #[test]
    fn test_space_before_colon_is_accepted() {
        let parsed = parser().parse("Re : Aw :Hi");
        assert_eq!(parsed.tokens.len(), 2);
        assert_eq!(parsed.remainder, "Hi");
    }

    #[test]
    fn test_requires_colon_directly_after_alias() {
        let parsed = parser().parse("Real estate: offer");
        assert!(parsed.tokens.is_empty());
        assert_eq!(parsed.remainder, "Real estate: offer");

        let parsed = parser().parse("Reply needed");
        assert!(parsed.tokens.is_empty());
    }

    #[test]
    fn test_only_leading_markers_are_parsed() {
        let parsed = parser().parse("Hello Re: there");
        assert!(parsed.tokens.is_empty());
        assert_eq!(parsed.remainder, "Hello Re: there");
    }

    #[test]
    fn test_overlapping_aliases_backtrack_to_full_match() {
        let p = PrefixParser::new(&list(&["Re", "Real"]), &[], &Labels::default())
            .unwrap()
            .unwrap();
        let parsed = p.parse("Real: x");
        assert_eq!(parsed.tokens, vec![PrefixToken::new(PrefixKind::Reply, 1)]);
        assert_eq!(parsed.remainder, "x");
    }

    #[test]
    fn test_no_aliases_means_no_parser() {
        let p = PrefixParser::new(&[], &[], &Labels::default()).unwrap();
        assert!(p.is_none());
    }

    #[test]
    fn test_zero_count_is_treated_as_one() {
        let parsed = parser().parse("Re*0: x");
        assert_eq!(parsed.tokens, vec![PrefixToken::new(PrefixKind::Reply, 1)]);
    }

    #[test]
    fn test_oversized_count_saturates() {
        let parsed = parser().parse("Re*99999999999: x");
        assert_eq!(
            parsed.tokens,
            vec![PrefixToken::new(PrefixKind::Reply, u32::MAX)]
        );
        assert_eq!(parsed.remainder, "x");
    }

    #[test]
    fn test_custom_label_is_recognised() {
        let labels = Labels {
            reply: "Antwort".to_string(),
            forward: "Fwd".to_string(),
        };
        let p = PrefixParser::new(&list(&["Re"]), &list(&["WG"]), &labels)
            .unwrap()
            .unwrap();
        let parsed = p.parse("Antwort*2: Fwd: x");
        assert_eq!(
            parsed.tokens,
            vec![
                PrefixToken::new(PrefixKind::Reply, 2),
                PrefixToken::new(PrefixKind::Forward, 1),
            ]
        );
    }
}
