/// One extraction rule, applied to every line of a stats file.
///
/// The two variants correspond to the two stats shapes we consume. gem5
/// prints `name value` pairs, so the interesting part of the counter name
/// doubles as the column label; XiangShan-style simulators print free-text
/// log lines with the value buried inside, so the label has to be fixed up
/// front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetPattern {
    /// The single capturing group yields the column label; the cell value is
    /// the first whitespace-delimited token after the match on the same
    /// line. Two patterns capturing the same literal text alias into the
    /// same column.
    Positional(String),
    /// The label is fixed; the single capturing group yields the value text.
    Keyed { label: String, pattern: String },
}

impl TargetPattern {
    pub fn pattern(&self) -> &str {
        match self {
            Self::Positional(pattern) => pattern,
            Self::Keyed { pattern, .. } => pattern,
        }
    }
}
