use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Fold a free-text label into a lookup key.
///
/// Lower-cases, decomposes (NFD), drops combining marks and trims, so that
/// `"Février"`, `"FEVRIER"` and `" fevrier "` all fold to `"fevrier"`.
pub fn fold(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        .collect()
}
