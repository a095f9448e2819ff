/// Shared types, traits, and errors for the remedit tool.
///
/// This crate is the foundation that the other remedit crates depend on.
/// It contains:
/// - **Trait contracts** (`traits`) that define the fetch/submit seam
/// - **Shared data types** (`page`) used across the session workflow
/// - **Error types** (`errors`) for unified error handling
/// - **Config types** (`config`) and the config file loader (`config_loader`)
pub mod config;
pub mod config_loader;
pub mod errors;
pub mod page;
pub mod traits;

// Re-export commonly used types at the crate root for convenience.
pub use config::{RemeditConfig, WikiProfile};
pub use errors::RemeditError;
pub use page::*;
pub use traits::WikiClient;
