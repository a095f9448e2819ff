//! External editor invocation.
//!
//! Resolves which editor to run and blocks on it as a child process:
//! - Resolution order: explicit override → config `editor` key → `$VISUAL`
//!   → `$EDITOR`
//! - The command string is split on whitespace, so values like `code -w`
//!   work; the file path is appended as the final argument
//! - The wait has no timeout. A Ctrl-C delivered to the tool kills the
//!   editor and aborts the session; scratch-file cleanup is the session's
//!   responsibility and happens on that path too.

use std::path::Path;

use tokio::process::Command;

use remedit_types::errors::RemeditError;

/// A parsed editor invocation: program plus leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    /// Program name or path, looked up on `$PATH` as usual.
    pub program: String,
    /// Arguments placed before the file path.
    pub args: Vec<String>,
}

impl EditorCommand {
    /// Parse an editor command string by whitespace splitting.
    pub fn parse(raw: &str) -> Result<Self, RemeditError> {
        let mut words = raw.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| RemeditError::EditorLaunch("editor command is empty".to_string()))?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Resolve the editor for this invocation.
    ///
    /// Precedence: `override_cmd` (the `--editor` flag), then the config
    /// file's `editor` key, then `$VISUAL`, then `$EDITOR`.
    pub fn resolve(
        override_cmd: Option<&str>,
        configured: Option<&str>,
    ) -> Result<Self, RemeditError> {
        let raw = override_cmd
            .map(str::to_string)
            .or_else(|| configured.map(str::to_string))
            .or_else(|| env_editor("VISUAL"))
            .or_else(|| env_editor("EDITOR"))
            .ok_or_else(|| {
                RemeditError::EditorLaunch(
                    "no editor configured: set $EDITOR, add an `editor` key to the \
                     config file, or pass --editor"
                        .to_string(),
                )
            })?;
        Self::parse(&raw)
    }
}

/// Read an editor command from an environment variable, treating unset and
/// blank the same way.
fn env_editor(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Runs the configured editor against a file and waits for it to exit.
pub struct EditorLauncher {
    command: EditorCommand,
}

impl EditorLauncher {
    /// Create a launcher for the given editor command.
    pub fn new(command: EditorCommand) -> Self {
        Self { command }
    }

    /// Launch the editor against `path` and block until it exits.
    ///
    /// Fails with `EditorLaunch` if the process cannot be started and
    /// `EditorExit` if it terminates with a non-zero status or the wait is
    /// interrupted by Ctrl-C. A non-zero exit is treated as
    /// abort-and-discard: the session never submits after one.
    pub async fn run(&self, path: &Path) -> Result<(), RemeditError> {
        tracing::debug!(editor = %self.command.program, path = %path.display(), "launching editor");

        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(path)
            .spawn()
            .map_err(|e| RemeditError::EditorLaunch(format!("{}: {e}", self.command.program)))?;

        let status = tokio::select! {
            status = child.wait() => status
                .map_err(|e| RemeditError::EditorLaunch(format!("failed to wait for editor: {e}")))?,
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("interrupted; killing editor");
                let _ = child.kill().await;
                return Err(RemeditError::EditorExit("interrupted".to_string()));
            }
        };

        if !status.success() {
            let detail = match status.code() {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            };
            return Err(RemeditError::EditorExit(detail));
        }

        Ok(())
    }
}
