/// Trait contract between the session workflow and the wiki transport.
///
/// The session crate codes against this interface, not against a concrete
/// HTTP client, so the state machine can be exercised with an in-memory
/// double. The trait is defined here in `remedit-types` so both sides can
/// depend on it without circular dependencies.
use async_trait::async_trait;

use crate::errors::RemeditError;
use crate::page::{FetchedPage, RevisionToken, SubmitReceipt};

/// Fetch and submit operations against a remote wiki.
///
/// Both operations are side-effect free locally; the only mutation a
/// `submit` performs lives on the server.
#[async_trait]
pub trait WikiClient: Send + Sync {
    /// Fetch the current text and revision token of a page.
    ///
    /// Fails with `NotFound` if the page is absent, `Auth` if credentials
    /// are rejected, and `Network` on transport failure.
    async fn fetch(&self, page: &str) -> Result<FetchedPage, RemeditError>;

    /// Submit new text for a page against the revision fetched earlier.
    ///
    /// Fails with `Conflict` if the server reports the page changed since
    /// `parent` was issued, `Auth` if credentials are rejected at submit
    /// time, and `Network` on transport failure. The caller is responsible
    /// for skipping the call entirely when the text is unchanged.
    async fn submit(
        &self,
        page: &str,
        text: &str,
        parent: &RevisionToken,
    ) -> Result<SubmitReceipt, RemeditError>;
}
