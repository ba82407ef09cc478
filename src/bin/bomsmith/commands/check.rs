//! `bomsmith check` command

use std::collections::HashSet;

use anyhow::Result;

use crate::cli::CheckArgs;
use bomsmith::util::diagnostic::{emit, suggestions, SettingsIssue};
use bomsmith::util::{GlobalContext, Settings};
use bomsmith::BomError;

pub fn execute(args: CheckArgs, color: bool) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let path = ctx.resolve_path(&args.settings);
    let settings = Settings::load(&path)?;

    let mut errors = 0;
    let base = path.parent().unwrap_or(ctx.cwd());
    if let Err(err) = settings.template.template_ref(base) {
        emit(
            &SettingsIssue::error(err.to_string(), &path)
                .with_help(suggestions::BUILTIN_TEMPLATE),
            color,
        );
        errors += 1;
    }

    let mut seen = HashSet::new();
    for config in &settings.boms {
        let artifact_id = config.artifact_id.trim();
        match config.compile() {
            Ok(spec) => {
                if !seen.insert(spec.artifact_id.clone()) {
                    emit(
                        &SettingsIssue::warning(
                            format!("bom `{}` is configured more than once", spec.artifact_id),
                            &path,
                        )
                        .with_help("only the first config is generated"),
                        color,
                    );
                }
                println!("ok {}", spec.artifact_id);
            }
            Err(err) => {
                emit(&BomError::from_config(Some(artifact_id), err), color);
                errors += 1;
            }
        }
    }

    if settings.boms.is_empty() {
        println!("ok (no boms configured, the default bom will be generated)");
    }

    if errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}
