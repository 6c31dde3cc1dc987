//! Errors surfaced by the document API.

use lynx_tree::{NodeId, TreeError};
use thiserror::Error;

/// Failures of the document API.
///
/// The numeric core never fails; these come from parsing dimension strings
/// and from addressing elements that do not exist or have the wrong kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A dimension string carried a unit suffix we do not know.
    #[error("unknown dimension unit: {0:?}")]
    UnknownUnit(String),
    /// A dimension string had no parsable number.
    #[error("invalid dimension: {0:?}")]
    InvalidDimension(String),
    /// The tree rejected a structural change.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// No element is stored under this id.
    #[error("element {0:?} does not exist")]
    UnknownElement(NodeId),
    /// The element exists but is not of the kind the operation needs.
    #[error("element {id:?} is not a {expected} element")]
    KindMismatch {
        /// The addressed element.
        id: NodeId,
        /// Kind the operation works on.
        expected: &'static str,
    },
}
