//! The per-invocation edit session.
//!
//! Drives the sequential workflow:
//! 1. Fetch the page text and revision token
//! 2. Write the text to an owner-only scratch file
//! 3. Block on the external editor
//! 4. Skip the submit entirely when the text comes back byte-identical
//! 5. Submit once against the fetch-time revision
//!
//! The scratch file never outlives the session, whichever way it ends. When
//! a submit fails (conflict or otherwise), the edited text is first copied
//! to a recovery file so no work is lost, then the scratch file is removed
//! as usual.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;

use remedit_types::errors::RemeditError;
use remedit_types::page::SessionOutcome;
use remedit_types::traits::WikiClient;

use crate::editor::EditorLauncher;

/// Filesystem locations used by a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory for the session's scratch file.
    pub scratch_dir: PathBuf,
    /// Directory where edits are preserved on conflict or submit failure.
    pub recovery_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scratch_dir: std::env::temp_dir(),
            recovery_dir: PathBuf::from("."),
        }
    }
}

/// One fetch-edit-submit invocation.
///
/// The wiki transport is injected as a trait object so the state machine
/// can be exercised against an in-memory double.
pub struct EditSession {
    client: Arc<dyn WikiClient>,
    launcher: EditorLauncher,
    config: SessionConfig,
}

impl EditSession {
    /// Create a session with all dependencies injected.
    pub fn new(client: Arc<dyn WikiClient>, launcher: EditorLauncher, config: SessionConfig) -> Self {
        Self {
            client,
            launcher,
            config,
        }
    }

    /// Run the session for one page.
    ///
    /// Terminal states: `Ok(Done)` after a successful submit, `Ok(Unchanged)`
    /// when the editor left the text byte-identical (no network write), or an
    /// error. Submit-phase errors carry a note naming the recovery file that
    /// preserves the edited text.
    pub async fn run(&self, page: &str) -> Result<SessionOutcome, RemeditError> {
        tracing::info!(page, "fetching page");
        let fetched = self.client.fetch(page).await?;

        // Scratch file is removed on drop, on every exit path below.
        let scratch = write_scratch(&self.config.scratch_dir, page, &fetched.text)?;

        self.launcher.run(scratch.path()).await?;

        let edited = std::fs::read_to_string(scratch.path())
            .map_err(|e| RemeditError::Io(format!("failed to read edited file: {e}")))?;

        if edited == fetched.text {
            tracing::info!(page, "text unchanged; skipping submit");
            return Ok(SessionOutcome::Unchanged);
        }

        tracing::info!(page, parent = %fetched.revision, "submitting edited text");
        match self.client.submit(page, &edited, &fetched.revision).await {
            Ok(receipt) => {
                tracing::info!(page, revision = %receipt.revision, "submit accepted");
                Ok(SessionOutcome::Done {
                    revision: receipt.revision,
                })
            }
            Err(err) => Err(self.preserve_edits(page, &edited, err)),
        }
    }

    /// Copy the edited text to a recovery file and attach its path to the
    /// submit error. If preservation itself fails, the original error is
    /// returned unchanged and the failure is logged.
    fn preserve_edits(&self, page: &str, edited: &str, err: RemeditError) -> RemeditError {
        match write_recovery(&self.config.recovery_dir, page, edited) {
            Ok(path) => {
                tracing::warn!(page, saved = %path.display(), "submit failed; edited text preserved");
                with_saved_note(err, &path)
            }
            Err(save_err) => {
                tracing::error!(page, error = %save_err, "failed to preserve edited text");
                err
            }
        }
    }
}

/// Write `text` to a fresh uniquely named scratch file in `dir`.
///
/// The file is created with owner-only permissions and removed when the
/// returned handle is dropped.
fn write_scratch(dir: &Path, page: &str, text: &str) -> Result<NamedTempFile, RemeditError> {
    let mut file = tempfile::Builder::new()
        .prefix(&format!("remedit-{}-", sanitize_page_name(page)))
        .suffix(".txt")
        .tempfile_in(dir)
        .map_err(|e| RemeditError::Io(format!("failed to create scratch file: {e}")))?;
    file.write_all(text.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| RemeditError::Io(format!("failed to write scratch file: {e}")))?;
    Ok(file)
}

/// Write `text` to `<page>.remedit-save` in `dir`, uniquified so an
/// existing save is never clobbered.
fn write_recovery(dir: &Path, page: &str, text: &str) -> Result<PathBuf, RemeditError> {
    let stem = sanitize_page_name(page);
    for n in 0..1000 {
        let name = if n == 0 {
            format!("{stem}.remedit-save")
        } else {
            format!("{stem}.remedit-save.{n}")
        };
        let path = dir.join(name);
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(mut file) => {
                file.write_all(text.as_bytes())
                    .map_err(|e| RemeditError::Io(format!("failed to write recovery file: {e}")))?;
                return Ok(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(RemeditError::Io(format!(
                    "failed to create {}: {e}",
                    path.display()
                )));
            }
        }
    }
    Err(RemeditError::Io(format!(
        "too many recovery files for page '{page}' in {}",
        dir.display()
    )))
}

/// Flatten a page name/path into a filesystem-safe stem.
fn sanitize_page_name(page: &str) -> String {
    let stem: String = page
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    if stem.is_empty() {
        "page".to_string()
    } else {
        stem
    }
}

/// Re-wrap a submit error with a note naming the recovery file.
fn with_saved_note(err: RemeditError, path: &Path) -> RemeditError {
    let note = format!("; edited text saved to {}", path.display());
    match err {
        RemeditError::Conflict(msg) => RemeditError::Conflict(format!("{msg}{note}")),
        RemeditError::Auth(msg) => RemeditError::Auth(format!("{msg}{note}")),
        RemeditError::Network(msg) => RemeditError::Network(format!("{msg}{note}")),
        RemeditError::NotFound(msg) => RemeditError::NotFound(format!("{msg}{note}")),
        other => other,
    }
}
