use crate::domain::subject::{Labels, PrefixToken};

/// Merge runs of same-kind tokens and render them as `Re*3: Fwd: rest`.
///
/// Only adjacent tokens merge, so `Re: Fwd: Re:` keeps three groups. With no
/// tokens the text comes back trimmed and otherwise untouched.
pub fn collapse_prefixes(tokens: &[PrefixToken], remainder: &str, labels: &Labels) -> String {
    if tokens.is_empty() {
        return remainder.trim().to_string();
    }

    let mut groups: Vec<PrefixToken> = Vec::new();
    for token in tokens {
        match groups.last_mut() {
            Some(prev) if prev.kind == token.kind => {
                prev.count = prev.count.saturating_add(token.count);
            }
            _ => groups.push(*token),
        }
    }

    let prefix = groups
        .iter()
        .map(|g| {
            let label = labels.for_kind(g.kind);
            if g.count > 1 {
                format!("{label}*{}:", g.count)
            } else {
                format!("{label}:")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let rest = remainder.trim();
    if rest.is_empty() {
        prefix
    } else {
        format!("{prefix} {rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subject::PrefixKind::{Forward, Reply};

    #[test]
    fn test_collapse_merges_adjacent_runs() {
        let tokens = [
            PrefixToken::new(Forward, 1),
            PrefixToken::new(Reply, 1),
            PrefixToken::new(Reply, 1),
            PrefixToken::new(Reply, 1),
        ];
        assert_eq!(
            collapse_prefixes(&tokens, "Hello", &Labels::default()),
            "Fwd: Re*3: Hello"
        );
    }

    #[test]
    fn test_collapse_keeps_separated_runs_apart() {
        let tokens = [
            PrefixToken::new(Reply, 1),
            PrefixToken::new(Forward, 1),
            PrefixToken::new(Reply, 1),
        ];
        assert_eq!(
            collapse_prefixes(&tokens, "x", &Labels::default()),
            "Re: Fwd: Re: x"
        );
    }

    #[test]
    fn test_collapse_sums_existing_counts() {
        let tokens = [PrefixToken::new(Reply, 3), PrefixToken::new(Reply, 2)];
        assert_eq!(
            collapse_prefixes(&tokens, "  Status ", &Labels::default()),
            "Re*5: Status"
        );
    }

    #[test]
    fn test_collapse_sum_saturates() {
        let tokens = [PrefixToken::new(Reply, u32::MAX), PrefixToken::new(Reply, 1)];
        assert_eq!(
            collapse_prefixes(&tokens, "x", &Labels::default()),
            "Re*4294967295: x"
        );
    }

    #[test]
    fn test_collapse_without_remainder() {
        let tokens = [PrefixToken::new(Forward, 1), PrefixToken::new(Forward, 1)];
        assert_eq!(collapse_prefixes(&tokens, "", &Labels::default()), "Fwd*2:");
    }

    #[test]
    fn test_collapse_no_tokens_returns_trimmed_text() {
        assert_eq!(
            collapse_prefixes(&[], "  Hello world ", &Labels::default()),
            "Hello world"
        );
    }

    #[test]
    fn test_collapse_uses_custom_labels() {
        let labels = Labels {
            reply: "AW".to_string(),
            forward: "WG".to_string(),
        };
        let tokens = [PrefixToken::new(Reply, 2), PrefixToken::new(Forward, 1)];
        assert_eq!(collapse_prefixes(&tokens, "Termin", &labels), "AW*2: WG: Termin");
    }
}
