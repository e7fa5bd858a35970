use std::{env, io, path::Path};

use anyhow::{Context, bail};
use itertools::Itertools;
use omega_stats::build_table;
use omega_targets::GroupId;
use strum::IntoEnumIterator;

fn main() -> anyhow::Result<()> {
    let mut csv = false;
    let mut args = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--csv" {
            csv = true;
        } else {
            args.push(arg);
        }
    }
    let (group, roots) = match args.as_slice() {
        [group, roots @ ..] if !roots.is_empty() => (group, roots),
        _ => bail!(
            "usage: stattab <group> <config-root>... [--csv]\ngroups: {}",
            GroupId::iter().join(", ")
        ),
    };
    let group: GroupId = group.parse().map_err(|_| {
        anyhow::anyhow!(
            "unknown group {group:?}, expected one of: {}",
            GroupId::iter().join(", ")
        )
    })?;
    for root in roots {
        let table = build_table(Path::new(root), &group.group())
            .with_context(|| format!("building table for {root}"))?;
        println!("{root}");
        if csv {
            table.write_csv(io::stdout())?;
        } else {
            print!("{table}");
        }
    }
    Ok(())
}
