//! Link resolution and in-fragment URL rewriting.
//!
//! Both operate on plain strings. Resolution is a three-way classification
//! of the reference; rewriting is a literal substitution over serialized
//! markup, so single-quoted and already absolute values are left untouched.

/// Resolve `reference` against `origin`.
///
/// - scheme-absolute (`https://…`, `mailto:…`): returned unchanged
/// - root-relative (`/path`): `origin + reference`
/// - anything else: `origin + "/" + reference`
///
/// Malformed input is passed through the same rules without validation.
pub fn normalize(reference: &str, origin: &str) -> String {
    if has_scheme(reference) {
        reference.to_string()
    } else if reference.starts_with('/') {
        format!("{origin}{reference}")
    } else {
        format!("{origin}/{reference}")
    }
}

/// `true` when the reference starts with a URI scheme (`alpha *( alpha / digit / "+" / "-" / "." ) ":"`).
fn has_scheme(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Rewrite root-relative attribute values to absolute ones.
///
/// For every `(source, target)` pair, each literal `source="/` becomes
/// `target="<origin>/`. Several sources may map to the same target, which
/// promotes lazy-load attributes such as `data-original` to `src`.
pub fn rewrite_relative_urls(fragment: &str, remap: &[(&str, &str)], origin: &str) -> String {
    let mut rewritten = fragment.to_string();
    for (source, target) in remap {
        let needle = format!("{source}=\"/");
        let replacement = format!("{target}=\"{origin}/");
        rewritten = rewritten.replace(&needle, &replacement);
    }
    rewritten
}
