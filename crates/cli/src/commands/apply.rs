use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::anyhow;
use clap::{Args, ValueEnum};
use fattr_engine::{
    AttrDef, AttributeProvider, BatchApplier, Catalog, ErrorChoice, Mask, VecListing,
};
use fattr_fs::NativeProvider;
use log::debug;

use crate::commands::CommandResult;
use crate::prompt::AutoPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnError {
    /// Skip the failed file and keep going
    Ignore,
    /// Stop at the first failure
    Cancel,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Attribute codes to set, e.g. `ia`
    #[arg(long, value_name = "CODES", default_value = "")]
    pub set: String,

    /// Attribute codes to clear
    #[arg(long, value_name = "CODES", default_value = "")]
    pub clear: String,

    /// What to do when a write fails
    #[arg(long, value_enum, default_value_t = OnError::Cancel)]
    pub on_error: OnError,

    /// Files to change
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

pub fn run(args: ApplyArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ApplyArgs) -> CommandResult<ExitCode> {
    let provider = NativeProvider;

    let Some(first) = args.paths.first() else {
        return Ok(ExitCode::from(0));
    };
    let supported = provider.probe(first)?;
    let catalog = Catalog::supported(supported);

    let mask = parse_mask(&catalog, &args.set, &args.clear)?;
    if mask == Mask::identity() {
        return Err(anyhow!("nothing to do: pass --set and/or --clear").into());
    }
    debug!(
        "[apply] and={:#010x} or={:#010x} over {} paths",
        mask.and_mask.bits(),
        mask.or_mask.bits(),
        args.paths.len()
    );

    let mut listing = VecListing::from_marked(args.paths.iter().cloned());
    let mut applier = BatchApplier::new(&provider);
    let mut port = AutoPort::new(match args.on_error {
        OnError::Ignore => ErrorChoice::Ignore,
        OnError::Cancel => ErrorChoice::Cancel,
    });

    let report = applier.run_batch(&mut port, &mut listing, &mask);

    println!(
        "changed {}, skipped {}, vanished {}",
        report.applied, report.ignored, report.missing
    );

    Ok(ExitCode::from(if report.cancelled { 1 } else { 0 }))
}

fn parse_mask(catalog: &Catalog, set: &str, clear: &str) -> CommandResult<Mask> {
    let mut mask = Mask::identity();

    for code in set.chars() {
        let def = lookup(catalog, code)?;
        mask.force_set(def.bit);
    }
    for code in clear.chars() {
        let def = lookup(catalog, code)?;
        if mask.or_mask.contains(def.bit) {
            return Err(anyhow!("attribute '{code}' is both set and cleared").into());
        }
        mask.force_clear(def.bit);
    }

    Ok(mask)
}

fn lookup<'c>(catalog: &'c Catalog, code: char) -> CommandResult<&'c AttrDef> {
    let def = catalog
        .by_code(code)
        .ok_or_else(|| anyhow!("unknown or unsupported attribute code '{code}'"))?;
    if !def.mutable {
        return Err(anyhow!("attribute '{code}' is read-only").into());
    }
    Ok(def)
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;
