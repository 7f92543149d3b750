use core::fmt;

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type returned by [`strip`][crate::strip] and
/// [`strip_all`][crate::strip_all].
pub struct Error {
    kind: ErrorKind,
}

/// Categorizes the ways a strip operation can fail.
///
/// [`ErrorKind::ExifNotPresent`] is an expected, common outcome for JPEG files
/// that simply carry no EXIF metadata; callers typically branch on it and pass
/// the input through unchanged. All other kinds indicate malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input does not start with the JPEG SOI marker (`FF D8`).
    MissingSoiMarker,
    /// No APP1 segment was found while walking the marker sequence.
    ///
    /// This is also returned when a byte that is not a valid `FF xx` marker is
    /// encountered during the walk, so a corrupted marker sequence surfaces as
    /// "no EXIF" rather than as a distinct corruption error.
    ExifNotPresent,
    /// A marker segment declared a length smaller than the length field itself.
    InvalidBlockSize,
    /// The APP1 payload does not begin with the `Exif\0\0` identifier.
    InvalidExifHeader,
    /// The TIFF byte-order marker is neither `MM` nor `II`.
    InvalidByteOrder,
    /// The offset to IFD0 is smaller than the 8-byte TIFF header it is
    /// measured from.
    InvalidIfdOffset,
    /// A parse step needed more bytes than the buffer holds.
    UnexpectedEof,
}

impl ErrorKind {
    fn message(self) -> &'static str {
        match self {
            ErrorKind::MissingSoiMarker => "missing JPEG SOI marker",
            ErrorKind::ExifNotPresent => "EXIF data not present",
            ErrorKind::InvalidBlockSize => "invalid block size",
            ErrorKind::InvalidExifHeader => "invalid EXIF header",
            ErrorKind::InvalidByteOrder => "invalid byte order flag",
            ErrorKind::InvalidIfdOffset => "invalid IFD offset",
            ErrorKind::UnexpectedEof => "reached end of data while parsing JPEG stream",
        }
    }
}

impl Error {
    /// Returns the [`ErrorKind`] describing this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.message().fmt(f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.message().fmt(f)
    }
}

impl std::error::Error for Error {}
