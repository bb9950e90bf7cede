use crate::domain::subject::{Labels, PrefixToken};

/// Reduce the whole marker chain to a single label of the first marker's
/// kind, e.g. `Fwd: Re: Aw: Hello` becomes `Fwd: Hello`.
///
/// `remainder` is what the parser left after consuming every leading marker.
pub fn overwrite_prefixes(tokens: &[PrefixToken], remainder: &str, labels: &Labels) -> String {
    let rest = remainder.trim();
    let Some(first) = tokens.first() else {
        return rest.to_string();
    };

    let label = labels.for_kind(first.kind);
    if rest.is_empty() {
        format!("{label}:")
    } else {
        format!("{label}: {rest}")
    }
}
