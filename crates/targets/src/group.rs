use crate::TargetPattern;

/// A named, ordered collection of extraction rules applied together to one
/// stats file. Order is insertion order; extraction tests every line against
/// every pattern, so order never decides which counters match.
///
/// Patterns are held as plain strings. Nothing is validated here: a
/// malformed pattern only surfaces when the pipeline compiles the group
/// against a concrete stats file.
#[derive(Debug, Clone)]
pub struct TargetGroup {
    name: &'static str,
    patterns: Vec<TargetPattern>,
}

impl TargetGroup {
    pub fn new(name: &'static str, patterns: Vec<TargetPattern>) -> Self {
        Self { name, patterns }
    }

    /// A group of gem5-shaped patterns whose labels come from the captured
    /// text.
    pub fn positional<I>(name: &'static str, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new(
            name,
            patterns
                .into_iter()
                .map(|pattern| TargetPattern::Positional(pattern.into()))
                .collect(),
        )
    }

    /// A group of log-shaped patterns with fixed labels.
    pub fn keyed<I, L, P>(name: &'static str, patterns: I) -> Self
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: Into<String>,
    {
        Self::new(
            name,
            patterns
                .into_iter()
                .map(|(label, pattern)| TargetPattern::Keyed {
                    label: label.into(),
                    pattern: pattern.into(),
                })
                .collect(),
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn patterns(&self) -> &[TargetPattern] {
        &self.patterns
    }
}
