//! Name search term

/// Case-insensitive substring search over names.
///
/// Matching runs against names stored through [`fold`], so case is folded
/// for all of Unicode rather than only ASCII. An empty term matches
/// everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm(String);

/// Lowercase form that names are stored and searched under.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

impl SearchTerm {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Folded pattern for `LIKE ? ESCAPE '\'`: `%`, `_` and `\` in the term
    /// match themselves rather than acting as wildcards.
    pub fn like_pattern(&self) -> String {
        let folded = fold(&self.0);
        let mut pattern = String::with_capacity(folded.len() + 2);
        pattern.push('%');
        for c in folded.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}
