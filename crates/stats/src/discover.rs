use std::{
    fs,
    path::{Path, PathBuf},
};

use derive_more::{Display, Error};
use itertools::Itertools;

/// File names recognized as simulator statistics artifacts. gem5 runs leave
/// a `stats.txt`, XiangShan runs a captured `simulator_out.txt`.
pub const STATS_FILE_NAMES: &[&str] = &["stats.txt", "simulator_out.txt"];

#[derive(Debug, Display, Error)]
pub enum DiscoverError {
    #[display("no stats file in {}", dir.display())]
    NoCandidate { dir: PathBuf },
    #[display(
        "{} candidate stats files in {}: {}",
        candidates.len(),
        dir.display(),
        candidates.iter().join(", ")
    )]
    Ambiguous {
        dir: PathBuf,
        candidates: Vec<String>,
    },
    #[display("listing {}: {source}", dir.display())]
    Io {
        dir: PathBuf,
        source: std::io::Error,
    },
}

/// Locates the single recognized stats artifact in a benchmark output
/// directory. Zero or several candidates is an error: picking one silently
/// would corrupt that benchmark's row.
pub fn find_stats_file(dir: &Path) -> Result<PathBuf, DiscoverError> {
    let io = |source| DiscoverError::Io {
        dir: dir.to_owned(),
        source,
    };
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(io)? {
        let entry = entry.map_err(io)?;
        if STATS_FILE_NAMES
            .iter()
            .any(|known| entry.file_name() == **known)
        {
            candidates.push(entry.path());
        }
    }
    if candidates.len() > 1 {
        candidates.sort();
        return Err(DiscoverError::Ambiguous {
            dir: dir.to_owned(),
            candidates: candidates
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        });
    }
    candidates.pop().ok_or(DiscoverError::NoCandidate {
        dir: dir.to_owned(),
    })
}
