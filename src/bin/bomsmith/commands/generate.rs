//! `bomsmith generate` command

use anyhow::Result;

use super::{fail, LoadedRun};
use crate::cli::GenerateArgs;
use bomsmith::core::{GeneratedRegistry, Task};
use bomsmith::ops::{generate_bom, GenerateReport, PomRenderer};
use bomsmith::LocalReactor;

pub fn execute(args: GenerateArgs, color: bool) -> Result<()> {
    let run = LoadedRun::load(&args.run)?;
    let origin = run.origin().clone();

    let tasks: Vec<Task> = args.goals.iter().map(|t| Task::parse(t)).collect();
    let mut resolver = run.descriptor.resolver();
    let mut reactor = LocalReactor::new(
        run.projects.clone(),
        tasks,
        run.opts.local_repository.clone(),
    );
    let registry = GeneratedRegistry::new();

    let report = match generate_bom(
        &origin,
        &mut reactor,
        &mut resolver,
        &PomRenderer,
        &registry,
        &run.opts,
    ) {
        Ok(report) => report,
        Err(err) => fail(&err, color),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report, &origin.id());
    for executed in reactor.executed() {
        tracing::debug!("ran {} on {}", executed.task, executed.unit);
    }
    Ok(())
}

fn print_report(report: &GenerateReport, origin: &str) {
    if report.is_empty() {
        println!("Nothing to generate: {} does not aggregate modules", origin);
        return;
    }

    for bom in &report.generated {
        println!(
            "Generated {} ({} libraries, {} plugins, {} poms)",
            bom.artifact_id,
            bom.selection.libraries.len(),
            bom.selection.plugins.len(),
            bom.selection.poms.len(),
        );
        println!("  manifest: {}", bom.manifest_path.display());

        let tasks: Vec<&str> = bom
            .segments
            .iter()
            .flat_map(|segment| segment.task_names())
            .collect();
        if tasks.is_empty() {
            println!("  no tasks run");
        } else {
            println!("  ran: {}", tasks.join(" "));
        }
    }

    for id in &report.skipped {
        println!("Skipped {} (already generated)", id);
    }
}
