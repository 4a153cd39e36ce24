use thiserror::Error;

/// Failure modes of structure construction and serialization.  There is no
/// recovery path for any of these; a caller that hits one has either passed a
/// value outside its documented domain or tripped a schema invariant.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A semantic value was rejected at construction time.
    #[error("{field}: {constraint}")]
    Validation {
        field: &'static str,
        constraint: &'static str,
    },
    /// A field encoder produced more bytes than its declared range holds.
    #[error("{field}: encoded {actual} bytes for a {width} byte range")]
    EncodingOverflow {
        field: String,
        width: usize,
        actual: usize,
    },
    /// A list field's range width does not divide evenly into its elements.
    #[error("{field}: range of {width} bytes does not divide into {count} elements")]
    ListBlockSize {
        field: String,
        width: usize,
        count: usize,
    },
    /// Two fields of one structure claim overlapping byte ranges.
    #[error("{field}: byte range overlaps the preceding field")]
    FieldOverlap { field: String },
}

pub type Result<Q> = core::result::Result<Q, Error>;
