//! `bomsmith select` command

use anyhow::Result;
use serde::Serialize;

use super::{fail, LoadedRun};
use crate::cli::SelectArgs;
use bomsmith::core::CoordinateSet;
use bomsmith::ops::{select, Repositories, Selection};
use bomsmith::BomError;

#[derive(Serialize)]
struct SelectedBom {
    artifact_id: String,
    #[serde(flatten)]
    selection: Selection,
}

pub fn execute(args: SelectArgs, color: bool) -> Result<()> {
    let run = LoadedRun::load(&args.run)?;
    let mut resolver = run.descriptor.resolver();
    let repositories = Repositories {
        local: &run.opts.local_repository,
        remotes: &run.opts.remote_repositories,
    };

    let mut selected = Vec::new();
    for config in run.configs() {
        let spec = match config.compile() {
            Ok(spec) => spec,
            Err(err) => fail(
                &BomError::from_config(Some(config.artifact_id.trim()), err),
                color,
            ),
        };
        let selection = match select(&run.projects, &spec, &mut resolver, &repositories) {
            Ok(selection) => selection,
            Err(err) => fail(&err, color),
        };
        selected.push(SelectedBom {
            artifact_id: spec.artifact_id,
            selection,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    for bom in &selected {
        println!("{}", bom.artifact_id);
        print_bucket("libraries", &bom.selection.libraries);
        print_bucket("plugins", &bom.selection.plugins);
        print_bucket("poms", &bom.selection.poms);
    }
    Ok(())
}

fn print_bucket(label: &str, coordinates: &CoordinateSet) {
    if coordinates.is_empty() {
        return;
    }
    println!("  {}:", label);
    for coordinate in coordinates {
        println!("    {}", coordinate);
    }
}
