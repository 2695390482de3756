//! Share links: public hashes that expose a single file.
//!
//! # Design Decisions
//! - Expiration is lazy: an expired record is deleted by the request that
//!   finds it, there is no background sweep
//! - Store deletes are idempotent so racing requests never fail each other
//! - Nothing is cached between requests

pub mod resolver;
pub mod store;

pub use resolver::share_page;
pub use store::{MemoryShareStore, ShareLink, ShareStore, StoreError};
