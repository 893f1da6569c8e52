use core::fmt;

/// Why a ring, line, or polygon failed to validate.
///
/// These correspond to the "Shape errors" of the error-handling design:
/// malformed point sequences caught at construction time, before any
/// index or cached metric is built.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A ring had fewer than 3 distinct positions after implicit closure.
    RingTooShort { len: usize },
    /// The caller passed an already-closed ring whose first and last
    /// points differ.
    FirstLastMismatch,
    /// A line had fewer than 2 positions.
    LineTooShort { len: usize },
    /// Per-position `z`/`m` arrays did not all agree on length with the
    /// point sequence they decorate.
    DimsMismatch { expected: usize, found: usize },
    /// An accessor (`point_at`, `hole_at`, `geometry_at`, ...) was asked
    /// for an index outside the valid range.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::RingTooShort { len } => {
                write!(f, "ring has {len} position(s) after closure, need at least 3")
            }
            ShapeError::FirstLastMismatch => {
                write!(f, "closed ring's first and last positions do not match")
            }
            ShapeError::LineTooShort { len } => {
                write!(f, "line has {len} position(s), need at least 2")
            }
            ShapeError::DimsMismatch { expected, found } => {
                write!(f, "expected {expected} coordinate(s), found {found}")
            }
            ShapeError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

/// Every failure mode a core constructor can report.
///
/// Constructors never panic: a failure is always communicated by
/// returning [`GeometryValue::Error`](crate::GeometryValue::Error)
/// (or, for the lower-level `Ring`/`Line`/`Polygon` builders, a bare
/// `Err(Error)`) rather than by unwinding. Every query on an
/// `Error`-tagged value is defined to return a conservative default
/// (`false`, `0`, empty) rather than propagate the failure further.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed textual input (WKT and friends live outside this
    /// crate, but parsers built on top of it report failures through
    /// this variant).
    InvalidText(String),
    /// Malformed binary input (WKB/GeoBin and friends, same as above).
    InvalidBinary(String),
    /// Well-formed syntax, but the type tag named is not one this
    /// library knows how to represent.
    UnknownType(String),
    /// Well-formed syntax, missing a field required for the type.
    MissingField(&'static str),
    /// A ring, line, or polygon failed a structural invariant.
    Shape(ShapeError),
    /// A `GeometryCollection` nested deeper than the configured limit.
    DepthExceeded { max: u32 },
    /// The allocator hook returned failure during construction.
    NoMemory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidText(msg) => write!(f, "invalid text: {msg}"),
            Error::InvalidBinary(msg) => write!(f, "invalid binary: {msg}"),
            Error::UnknownType(msg) => write!(f, "unknown type: {msg}"),
            Error::MissingField(name) => write!(f, "missing field: {name}"),
            Error::Shape(e) => write!(f, "shape error: {e}"),
            Error::DepthExceeded { max } => {
                write!(f, "geometry collection nesting exceeds depth limit of {max}")
            }
            Error::NoMemory => write!(f, "allocation failure"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ShapeError> for Error {
    fn from(e: ShapeError) -> Self {
        Error::Shape(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_is_non_empty() {
        let errs = [
            Error::InvalidText("bad wkt".into()),
            Error::InvalidBinary("bad wkb".into()),
            Error::UnknownType("Whatsit".into()),
            Error::MissingField("coordinates"),
            Error::Shape(ShapeError::RingTooShort { len: 2 }),
            Error::DepthExceeded { max: 1024 },
            Error::NoMemory,
        ];
        for e in errs {
            assert!(!e.to_string().is_empty());
        }
    }
}
