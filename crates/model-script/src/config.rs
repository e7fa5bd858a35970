use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Which plotted series an annotation attaches to.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Series {
    Ipc,
    IdealIpc,
}

/// A circled benchmark with a caption, drawn over the scatter.
#[derive(Debug, Clone, Deserialize)]
pub struct Annotation {
    pub benchmark: String,
    pub series: Series,
    pub text: String,
    #[serde(default)]
    pub dx: f64,
    #[serde(default)]
    pub dy: f64,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Stats root of the dataflow configuration, one subdirectory per
    /// benchmark.
    pub dataflow: PathBuf,
    /// Stats root of the idealized out-of-order baseline.
    pub baseline: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

fn default_output() -> PathBuf {
    PathBuf::from("figures/model.png")
}

pub fn read_config(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_config() {
        let config: Config = serde_json::from_str(
            r#"{
                "dataflow": "results/f1_base-full",
                "baseline": "results/ooo_4w-full",
                "annotations": [
                    { "benchmark": "bwaves_0", "series": "ideal_ipc",
                      "text": "bwaves: high PPI & high IPC", "dx": 0.2, "dy": 0.25 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.output, PathBuf::from("figures/model.png"));
        assert_eq!(config.annotations.len(), 1);
        assert!(matches!(config.annotations[0].series, Series::IdealIpc));
    }
}
