use std::{env, io};

use anyhow::{Context, bail};
use omega_stats::{Table, build_table};
use omega_targets::{TargetGroup, model_targets};

use crate::{
    chart::{ModelPoint, render_model_chart},
    config::read_config,
};

mod chart;
mod config;

fn main() -> anyhow::Result<()> {
    let mut csv = false;
    let mut config_path = None;
    for arg in env::args().skip(1) {
        if arg == "--csv" {
            csv = true;
        } else if config_path.is_none() {
            config_path = Some(arg);
        } else {
            bail!("unexpected argument {arg:?}");
        }
    }
    let Some(config_path) = config_path else {
        bail!("usage: model-script <config.json> [--csv]");
    };
    let config = read_config(&config_path)?;

    println!("{}", config.dataflow.display());
    let dataflow =
        build_table(&config.dataflow, &model_targets()).context("building the dataflow table")?;
    println!("{}", config.baseline.display());
    let baseline_group = TargetGroup::positional("ideal-ipc", [r"(?:cpus?|switch_cpus_1)\.(ipc)"]);
    let mut baseline =
        build_table(&config.baseline, &baseline_group).context("building the baseline table")?;
    baseline.rename_column("ipc", "ideal_ipc")?;

    let mut matrix = dataflow.join(baseline)?;
    matrix.derive("PPI", |row| row.ratio("0.TotalPackets", "Insts"))?;
    matrix.sort_by_column("PPI")?;
    let matrix = matrix.thinned(2);

    if csv {
        matrix.write_csv(io::stdout())?;
    } else {
        print!("{matrix}");
    }

    let points = model_points(&matrix);
    render_model_chart(&points, &config.annotations, &config.output)?;
    println!("wrote {}", config.output.display());
    Ok(())
}

/// Rows with every model quantity present and finite; the chart cannot
/// place anything else.
fn model_points(matrix: &Table) -> Vec<ModelPoint> {
    matrix
        .iter()
        .filter_map(|(name, row)| {
            let ppi = row.get("PPI")?;
            let ipc = row.get("ipc")?;
            let ideal_ipc = row.get("ideal_ipc")?;
            (ppi.is_finite() && ipc.is_finite() && ideal_ipc.is_finite()).then(|| ModelPoint {
                name: name.to_owned(),
                ppi,
                ipc,
                ideal_ipc,
            })
        })
        .collect()
}
