use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use derive_more::{Display, Error};
use omega_targets::{TargetGroup, TargetPattern};
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::{
    discover::{DiscoverError, find_stats_file},
    table::Table,
};

#[derive(Debug, Display, Error)]
pub enum PatternError {
    #[display("bad pattern {pattern:?}: {source}")]
    Syntax { pattern: String, source: regex::Error },
    #[display("pattern {pattern:?} has {found} capturing groups, expected exactly one")]
    CaptureCount { pattern: String, found: usize },
}

#[derive(Debug, Display, Error)]
pub enum ExtractError {
    #[display("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Pattern(#[error(source)] PatternError),
    Discover(#[error(source)] DiscoverError),
}

/// A compiled extraction rule.
///
/// Compilation is where all pattern validation happens; the catalog itself
/// is plain strings. Since [`extract`] compiles its group on every call, a
/// malformed pattern fails once per benchmark it is applied to.
pub struct CompiledRule {
    regex: Regex,
    /// Fixed label for keyed rules; positional rules derive theirs per
    /// match.
    label: Option<String>,
}

impl CompiledRule {
    pub fn compile(pattern: &TargetPattern) -> Result<Self, PatternError> {
        let text = pattern.pattern();
        let regex = Regex::new(text).map_err(|source| PatternError::Syntax {
            pattern: text.to_owned(),
            source,
        })?;
        // captures_len counts the implicit whole-match group
        let found = regex.captures_len() - 1;
        if found != 1 {
            return Err(PatternError::CaptureCount {
                pattern: text.to_owned(),
                found,
            });
        }
        let label = match pattern {
            TargetPattern::Positional(_) => None,
            TargetPattern::Keyed { label, .. } => Some(label.clone()),
        };
        Ok(Self { regex, label })
    }

    /// The column label for one concrete match: the fixed label for keyed
    /// rules, the captured text for positional ones. Distinct positional
    /// patterns capturing the same literal text alias into the same column.
    pub fn derive_label<'a>(&'a self, captures: &Captures<'a>) -> Option<&'a str> {
        match &self.label {
            Some(label) => Some(label),
            None => captures.get(1).map(|capture| capture.as_str()),
        }
    }

    /// Applies the rule to one line, returning the derived label and the
    /// numeric value. `None` when the line does not match or carries no
    /// parsable number.
    pub fn apply(&self, line: &str) -> Option<(String, f64)> {
        let captures = self.regex.captures(line)?;
        let label = self.derive_label(&captures)?.to_owned();
        let value = match &self.label {
            // keyed rules capture the value itself
            Some(_) => captures.get(1)?.as_str().parse().ok()?,
            // positional rules capture the label; the value is the next
            // whitespace-delimited token after the match
            None => {
                let rest = &line[captures.get(0)?.end()..];
                rest.split_whitespace().next()?.parse().ok()?
            }
        };
        Some((label, value))
    }
}

/// Extracts all of a group's counters from one stats file.
///
/// Every line is tested against every rule. A counter that appears several
/// times keeps its last value; a counter that never matches is simply
/// absent. Cell order is first-emission order.
pub fn extract(path: &Path, group: &TargetGroup) -> Result<Vec<(String, f64)>, ExtractError> {
    let rules = group
        .patterns()
        .iter()
        .map(CompiledRule::compile)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ExtractError::Pattern)?;
    let io = |source| ExtractError::Io {
        path: path.to_owned(),
        source,
    };
    let file = File::open(path).map_err(io)?;
    let mut cells: Vec<(String, f64)> = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(io)?;
        for rule in &rules {
            if let Some((label, value)) = rule.apply(&line) {
                match cells.iter_mut().find(|(have, _)| *have == label) {
                    // last match wins, the column keeps its first position
                    Some((_, cell)) => *cell = value,
                    None => cells.push((label, value)),
                }
            }
        }
    }
    debug!(path = %path.display(), group = group.name(), cells = cells.len(), "extracted");
    Ok(cells)
}

/// Builds the per-benchmark table for one configuration root: one row per
/// benchmark output directory, keyed by directory name. Stray files at the
/// root are skipped; a directory with an ambiguous stats artifact aborts
/// the build.
///
/// Row order follows directory listing order; callers wanting a particular
/// order sort afterwards.
pub fn build_table(config_root: &Path, group: &TargetGroup) -> Result<Table, ExtractError> {
    let io = |source| ExtractError::Io {
        path: config_root.to_owned(),
        source,
    };
    let mut table = Table::new();
    for entry in fs::read_dir(config_root).map_err(io)? {
        let entry = entry.map_err(io)?;
        let path = entry.path();
        if !path.is_dir() {
            warn!(path = %path.display(), "skipping non-directory entry");
            continue;
        }
        let stats = find_stats_file(&path).map_err(ExtractError::Discover)?;
        let cells = extract(&stats, group)?;
        table.insert_row(entry.file_name().to_string_lossy().into_owned(), cells);
    }
    Ok(table)
}
