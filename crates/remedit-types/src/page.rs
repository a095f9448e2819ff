/// Shared data types for the fetch-edit-submit workflow.
///
/// These types are the lingua franca of the tool — the client, the session,
/// and the CLI all agree on these structures.
use serde::{Deserialize, Serialize};

// ============================================================
// Page Types
// ============================================================

/// Opaque revision token issued by the server at fetch time.
///
/// The server uses it to detect concurrent modification: a submit carrying a
/// stale token is rejected as a conflict. The tool never interprets the
/// value — it only round-trips it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionToken(String);

impl RevisionToken {
    /// Wrap a raw token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token value, for embedding in a submit request.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RevisionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A page as fetched from the remote wiki: current text plus the revision
/// token needed to submit against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// Page name/path on the wiki.
    pub name: String,
    /// Full page text at fetch time.
    pub text: String,
    /// Revision token for optimistic concurrency at submit time.
    pub revision: RevisionToken,
}

/// Acknowledgement returned by the server after a successful submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReceipt {
    /// The revision the server assigned to the new page text.
    pub revision: RevisionToken,
}

// ============================================================
// Credentials
// ============================================================

/// Credentials for the remote wiki, held in process memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No authentication — the wiki allows anonymous edits.
    Anonymous,
    /// HTTP basic auth.
    Basic {
        /// Account name on the wiki.
        username: String,
        /// Account password.
        password: String,
    },
    /// A pre-established session cookie, sent verbatim in the Cookie header.
    Cookie(String),
}

// ============================================================
// Session Outcome
// ============================================================

/// Successful terminal states of an edit session.
///
/// The failure states (`Conflict`, `Failed`) travel as
/// [`RemeditError`](crate::errors::RemeditError) values instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The edited text was submitted and accepted.
    Done {
        /// Revision the server assigned to the submitted text.
        revision: RevisionToken,
    },
    /// The editor left the text byte-identical; no network write occurred.
    Unchanged,
}
