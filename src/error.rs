//! Error types.
//!
//! Geometry queries are total and never fail. Errors only surface at the
//! edges: parsing configuration strings and running a container re-layout.

use thiserror::Error;

use crate::engine::NodeId;

/// Unknown origin name passed to `Origin::from_str`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown origin `{0}`")]
pub struct ParseOriginError(pub String);

/// Malformed hex color passed to `Rgba::from_str`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color `{0}`")]
pub struct ParseColorError(pub String);

/// Failure while a managed container lays out its children.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("flexbox computation failed: {0}")]
    Taffy(#[from] taffy::TaffyError),

    #[error("child {0} is already borrowed")]
    ChildBorrowed(NodeId),
}
