use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use fattr_engine::{AttributeProvider, Catalog};
use fattr_fs::NativeProvider;
use serde_json::json;

use crate::commands::CommandResult;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Files to inspect
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output one JSON object per line
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ShowArgs) -> CommandResult<ExitCode> {
    let provider = NativeProvider;
    let catalog = Catalog::full();
    let mut failures = 0usize;

    for path in &args.paths {
        match provider.read_flags(path) {
            Ok(flags) => {
                if args.json {
                    let set: String = catalog
                        .iter()
                        .filter(|d| flags.contains(d.bit))
                        .map(|d| d.code)
                        .collect();
                    let line = json!({
                        "path": path.display().to_string(),
                        "flags": catalog.render(flags),
                        "set": set,
                        "bits": flags.bits(),
                    });
                    println!("{line}");
                } else {
                    println!("{} {}", catalog.render(flags), path.display());
                }
            }
            Err(e) => {
                eprintln!("[error] {e}");
                failures += 1;
            }
        }
    }

    Ok(ExitCode::from(if failures == 0 { 0 } else { 1 }))
}
