pub mod apply;
pub mod edit;
pub mod show;

use clap::Subcommand;
pub use apply::ApplyArgs;
pub use edit::EditArgs;
pub use show::ShowArgs;

/// Common error type for command handlers
pub type CommandResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the attribute flags of each given file.
    ///
    /// Example:
    ///   fattr show src/main.rs
    ///   fattr show --json /etc/passwd /etc/shadow
    Show(ShowArgs),

    /// Set or clear attributes on files without prompting.
    ///
    /// Example:
    ///   fattr apply --set ia archive.log
    ///   fattr apply --clear d --on-error ignore a.bin b.bin
    Apply(ApplyArgs),

    /// Walk files through the interactive attribute form.
    Edit(EditArgs),
}
