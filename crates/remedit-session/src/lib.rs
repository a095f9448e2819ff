//! Per-invocation edit session for remedit.
//!
//! Contains the two local halves of the tool:
//! - [`EditorLauncher`]: scratch-file handling and external editor invocation
//! - [`EditSession`]: the sequential `Fetching → Editing → (Unchanged |
//!   Submitting) → (Done | Conflict | Failed)` workflow, including the
//!   edit-preservation contract on conflict and submit failure

mod editor;
mod session;

pub use editor::{EditorCommand, EditorLauncher};
pub use session::{EditSession, SessionConfig};
