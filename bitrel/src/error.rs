use thiserror::Error;

/// Failures raised while building or querying boolean relations over bit strings.
///
/// Every variant describes malformed input. Nothing is retried and no partially built
/// relation is ever handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two matrices cannot be composed, or a support matrix does not have the shape its
    /// site window requires.
    #[error("dimension mismatch: expected shape {expected:?}, found {found:?}")]
    DimensionMismatch {
        /// Shape the operation needed.
        expected: (usize, usize),
        /// Shape that was supplied.
        found: (usize, usize),
    },

    /// A position, site index, or length falls outside what the receiving structure holds.
    #[error("{index} is out of range for length {length}")]
    OutOfRange {
        /// Offending position or length.
        index: usize,
        /// Length it was checked against.
        length: usize,
    },

    /// Two collections that must have equal lengths do not.
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// Length of the reference collection.
        expected: usize,
        /// Length of the offending collection.
        found: usize,
    },

    /// A site window names the same site twice.
    #[error("site {0} appears more than once in the window")]
    DuplicateSite(usize),

    /// A site window names no sites at all.
    #[error("a site window must name at least one site")]
    EmptyWindow,

    /// Text that is not a bit string or bit matrix.
    #[error("cannot parse {0:?} as bits")]
    Parse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
