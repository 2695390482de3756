//! The `/api` surface.
//!
//! # Data Flow
//! ```text
//! /api/<area>/<rest>
//!     → dispatcher.rs (authenticate, split, authorize, hook, file info)
//!     → checksum.rs (local)
//!     → handlers.rs (everything else, via ApiHandlers)
//! ```

pub mod checksum;
pub mod dispatcher;
pub mod handlers;

use std::fmt;
use std::str::FromStr;

pub use dispatcher::dispatch;
pub use handlers::{ApiHandlers, DefaultHandlers};

/// First path segment under `/api`, selecting the handler group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceArea {
    Download,
    Checksum,
    Command,
    Search,
    Resource,
    Users,
    Settings,
    Share,
}

impl ResourceArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceArea::Download => "download",
            ResourceArea::Checksum => "checksum",
            ResourceArea::Command => "command",
            ResourceArea::Search => "search",
            ResourceArea::Resource => "resource",
            ResourceArea::Users => "users",
            ResourceArea::Settings => "settings",
            ResourceArea::Share => "share",
        }
    }

    /// Areas that need the target file's metadata before their handler runs.
    pub fn needs_file_info(&self) -> bool {
        matches!(self, ResourceArea::Download | ResourceArea::Checksum)
    }
}

impl fmt::Display for ResourceArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownArea(pub String);

impl fmt::Display for UnknownArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resource area: {:?}", self.0)
    }
}

impl std::error::Error for UnknownArea {}

impl FromStr for ResourceArea {
    type Err = UnknownArea;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "download" => Ok(ResourceArea::Download),
            "checksum" => Ok(ResourceArea::Checksum),
            "command" => Ok(ResourceArea::Command),
            "search" => Ok(ResourceArea::Search),
            "resource" => Ok(ResourceArea::Resource),
            "users" => Ok(ResourceArea::Users),
            "settings" => Ok(ResourceArea::Settings),
            "share" => Ok(ResourceArea::Share),
            other => Err(UnknownArea(other.to_string())),
        }
    }
}
