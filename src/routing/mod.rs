//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (decoded path)
//!     → router.rs (base path, top-level areas, UI shell fallback)
//!     → matcher.rs (prefix tests, area/rest split)
//!     → Return: Outcome
//! ```
//!
//! # Design Decisions
//! - No route table: the areas are fixed and checked in order
//! - No regex in the hot path (prefix matching only)
//! - Deterministic: same input always takes the same branch

pub mod matcher;
pub mod router;

pub use router::serve;
