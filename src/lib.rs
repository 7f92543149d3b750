//! Removes the EXIF metadata segment from JPEG byte streams.
//!
//! JPEG files store EXIF metadata in an APP1 marker segment near the start of
//! the file. This crate walks the marker sequence far enough to locate that
//! segment and produces a copy of the input with it excised; everything else
//! (quantization tables, Huffman tables, scan data, other APP segments) is
//! passed through as opaque bytes.
//!
//! Two operations are provided, both pure functions over an in-memory buffer:
//!
//! - [`strip_all`] removes the APP1 segment unconditionally.
//! - [`strip`] preserves the image's Orientation tag (0x0112), replacing the
//!   segment with a minimal 32-byte EXIF segment holding only that tag. If the
//!   segment has no Orientation tag, it is removed entirely.
//!
//! A JPEG without EXIF metadata is an ordinary input, not a broken one: both
//! operations report it as [`ErrorKind::ExifNotPresent`], and callers that
//! want "strip if present" semantics should treat that as "use the input
//! unchanged".
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let jpeg = std::fs::read("photo.jpg")?;
//! let cleaned = match exif_strip::strip(&jpeg) {
//!     Ok(out) => out,
//!     Err(e) if e.kind() == exif_strip::ErrorKind::ExifNotPresent => jpeg,
//!     Err(e) => return Err(e.into()),
//! };
//! # drop(cleaned);
//! # Ok(())
//! # }
//! ```
//!
//! All file and network I/O is the caller's business; the crate never mutates
//! the input buffer and holds no state across calls, so both functions may be
//! called concurrently on different buffers without coordination.

mod error;
mod exif;
mod file;


pub use crate::error::{Error, ErrorKind};

use crate::error::Result;
use crate::file::JpegParser;

/// Removes the EXIF APP1 segment, preserving the Orientation tag if present.
///
/// When the segment's IFD0 contains an Orientation entry, the output carries a
/// minimal replacement EXIF segment holding exactly that entry, byte-for-byte
/// as it appeared in the input (including its declared byte order). Without an
/// Orientation entry this behaves like [`strip_all`].
///
/// The input is never modified; on success a new buffer is returned, on error
/// nothing is produced.
pub fn strip(jpeg: &[u8]) -> Result<Vec<u8>> {
    let app1 = JpegParser::new(jpeg)?.find_app1()?;
    // The sub-parser reads from the length field onward, not clamped to the
    // declared segment length: the IFD0 offset is allowed to point past it.
    let exif = exif::parse(&jpeg[app1.payload_start()..])?;

    let prefix = &jpeg[..app1.offset];
    let suffix = &jpeg[app1.end()..];
    match exif.minimal_segment() {
        Some(segment) => {
            let mut out = Vec::with_capacity(prefix.len() + segment.len() + suffix.len());
            out.extend_from_slice(prefix);
            out.extend_from_slice(&segment);
            out.extend_from_slice(suffix);
            Ok(out)
        }
        None => Ok(splice(prefix, suffix)),
    }
}

/// Removes the EXIF APP1 segment entirely.
///
/// The segment's payload is not inspected at all, so any APP1 segment (EXIF,
/// XMP, ...) is removed; only the marker walk is validated.
pub fn strip_all(jpeg: &[u8]) -> Result<Vec<u8>> {
    let app1 = JpegParser::new(jpeg)?.find_app1()?;
    Ok(splice(&jpeg[..app1.offset], &jpeg[app1.end()..]))
}

fn splice(prefix: &[u8], suffix: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(prefix.len() + suffix.len());
    out.extend_from_slice(prefix);
    out.extend_from_slice(suffix);
    out
}
