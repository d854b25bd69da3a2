//! Terminal frontends for the engine's interaction seam.

use std::io::{self, BufRead, Write};
use std::path::Path;

use fattr_engine::{AttrError, BulkMode, ErrorChoice, FormCommand, FormView, InteractionPort};

/// Line-oriented interactive frontend on stdin/stderr.
///
/// Prompts go to stderr so stdout stays clean for the final summary and
/// for scripted use.
#[derive(Debug, Default)]
pub struct TerminalPort;

impl TerminalPort {
    pub fn new() -> Self {
        TerminalPort
    }

    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn parse_command(&self, line: &str, view: &FormView<'_>) -> Option<FormCommand> {
        match line {
            "set" => return Some(FormCommand::Set),
            "cancel" | "q" => return Some(FormCommand::Cancel),
            _ => {}
        }

        // Bulk commands only exist with more than one file in play.
        if !view.single_set {
            match line {
                "all" => return Some(FormCommand::Commit(BulkMode::SetAll)),
                "marked" => return Some(FormCommand::Commit(BulkMode::SetMarked)),
                "force" => return Some(FormCommand::Commit(BulkMode::ForceSetMarked)),
                "clear" => return Some(FormCommand::Commit(BulkMode::ClearMarked)),
                _ => {}
            }
        }

        let (bulk, rest) = match line.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let mut chars = rest.chars();
        let (Some(code), None) = (chars.next(), chars.next()) else {
            return None;
        };

        let index = view.catalog.iter_mutable().position(|d| d.code == code)?;

        Some(if bulk {
            FormCommand::ToggleBulk(index)
        } else {
            FormCommand::ToggleChecked(index)
        })
    }
}

impl InteractionPort for TerminalPort {
    fn present_form(&mut self, view: FormView<'_>) -> FormCommand {
        let mut out = io::stderr().lock();
        let _ = writeln!(
            out,
            "\n{} ({} marked)",
            view.path.display(),
            view.marked_remaining
        );
        let _ = writeln!(out, "flags: {}", view.preview);

        for (index, def) in view.catalog.iter_mutable().enumerate() {
            let Some(state) = view.selection.state(index) else {
                break;
            };
            let _ = writeln!(
                out,
                "  [{}]{} {}  {}",
                if state.checked { 'x' } else { ' ' },
                if state.bulk_selected { '*' } else { ' ' },
                def.code,
                def.label
            );
        }

        if view.single_set {
            let _ = writeln!(out, "commands: <code> toggle, set, cancel");
        } else {
            let _ = writeln!(
                out,
                "commands: <code> toggle, *<code> mark, set, all, marked, force, clear, cancel"
            );
        }

        loop {
            let _ = write!(out, "> ");
            let _ = out.flush();

            let Some(line) = self.read_line() else {
                return FormCommand::Cancel;
            };

            match self.parse_command(&line, &view) {
                Some(command) => return command,
                None => {
                    let _ = writeln!(out, "unrecognized: {line}");
                }
            }
        }
    }

    fn resolve_failure(&mut self, _path: &Path, error: &AttrError) -> ErrorChoice {
        let mut out = io::stderr().lock();
        let _ = writeln!(out, "cannot change attributes: {error}");

        loop {
            let _ = write!(out, "[i]gnore / ignore [a]ll / [r]etry / [c]ancel: ");
            let _ = out.flush();

            let Some(line) = self.read_line() else {
                return ErrorChoice::Cancel;
            };

            match line.as_str() {
                "i" => return ErrorChoice::Ignore,
                "a" => return ErrorChoice::IgnoreAll,
                "r" => return ErrorChoice::Retry,
                "c" => return ErrorChoice::Cancel,
                _ => {}
            }
        }
    }

    fn report_failure(&mut self, _path: &Path, error: &AttrError) {
        eprintln!("[error] {error}");
    }
}

/// Non-interactive frontend with a fixed on-failure policy, used by the
/// batch `apply` command.
#[derive(Debug)]
pub struct AutoPort {
    on_failure: ErrorChoice,
}

impl AutoPort {
    pub fn new(on_failure: ErrorChoice) -> Self {
        AutoPort { on_failure }
    }
}

impl InteractionPort for AutoPort {
    fn present_form(&mut self, _view: FormView<'_>) -> FormCommand {
        // apply never opens the form
        FormCommand::Cancel
    }

    fn resolve_failure(&mut self, _path: &Path, error: &AttrError) -> ErrorChoice {
        eprintln!("[error] {error}");
        self.on_failure
    }

    fn report_failure(&mut self, _path: &Path, error: &AttrError) {
        eprintln!("[error] {error}");
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
