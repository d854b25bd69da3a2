use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use fattr_engine::{EditSession, VecListing};
use fattr_fs::NativeProvider;
use log::debug;

use crate::commands::CommandResult;
use crate::prompt::TerminalPort;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Files to edit; the form opens on the first one
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

pub fn run(args: EditArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: EditArgs) -> CommandResult<ExitCode> {
    let provider = NativeProvider;
    let mut port = TerminalPort::new();
    let mut listing = VecListing::from_marked(args.paths.iter().cloned());

    let report = EditSession::new(&provider, &mut port, &mut listing).run()?;
    debug!(
        "[edit] applied={} ignored={} missing={} cancelled={}",
        report.applied, report.ignored, report.missing, report.cancelled
    );

    println!(
        "changed {}, skipped {}, vanished {}{}",
        report.applied,
        report.ignored,
        report.missing,
        if report.cancelled { ", cancelled" } else { "" }
    );

    Ok(ExitCode::from(if report.cancelled { 1 } else { 0 }))
}
