//! EXIF/TIFF IFD parser, just enough of it to find the Orientation entry.
//!
//! The APP1 payload carries a TIFF structure: a byte-order marker selecting
//! the endianness of everything that follows, an offset to the first Image
//! File Directory (IFD0), and a directory of fixed-size 12-byte tag entries.
//! Nothing beyond IFD0 is ever visited, and no entry other than Orientation
//! (tag 0x0112) is interpreted.

use bytemuck::{Pod, Zeroable};

use crate::error::{ErrorKind, Result};
use crate::file::Reader;

/// EXIF tag 0x0112, the rotation/mirroring needed to display the image upright.
const ORIENTATION_TAG: u16 = 0x0112;

/// The fixed TIFF magic following the byte-order marker.
const TIFF_MAGIC: u16 = 0x002A;

/// The 6-byte identifier starting every EXIF APP1 payload.
const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";

/// Endianness declared by the TIFF byte-order marker, governing every
/// multi-byte integer inside the TIFF structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteOrder {
    /// `MM` (Motorola).
    Big,
    /// `II` (Intel).
    Little,
}

impl ByteOrder {
    fn u16_from_bytes(self, b: [u8; 2]) -> u16 {
        match self {
            ByteOrder::Big => u16::from_be_bytes(b),
            ByteOrder::Little => u16::from_le_bytes(b),
        }
    }

    fn u32_from_bytes(self, b: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Big => u32::from_be_bytes(b),
            ByteOrder::Little => u32::from_le_bytes(b),
        }
    }

    fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
        }
    }

    fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
        }
    }
}

/// A raw IFD entry: 2-byte tag id, then format, component count and value.
///
/// Only the tag id is ever decoded. The remaining 10 bytes are carried
/// verbatim so that a preserved entry round-trips byte-identically.
#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(transparent)]
pub(crate) struct IfdEntry([u8; 12]);

impl IfdEntry {
    fn tag(&self, order: ByteOrder) -> u16 {
        order.u16_from_bytes([self.0[0], self.0[1]])
    }

    /// The complete 12-byte entry, exactly as it appeared in the input.
    pub fn raw_bytes(&self) -> &[u8; 12] {
        &self.0
    }
}

/// Outcome of parsing an EXIF APP1 payload.
pub(crate) struct ExifData {
    byte_order: ByteOrder,
    /// The original 2-byte order marker (`MM` or `II`), written back literally.
    order_marker: [u8; 2],
    orientation: Option<IfdEntry>,
}

impl ExifData {
    pub fn orientation(&self) -> Option<&IfdEntry> {
        self.orientation.as_ref()
    }

    /// Synthesizes the smallest valid EXIF APP1 segment (marker and length
    /// field included) holding only the captured Orientation entry.
    ///
    /// The segment length is fixed at 30 and written big-endian like every
    /// JPEG length field; the fields inside the TIFF structure keep the
    /// input's declared byte order, and the entry itself is copied verbatim.
    pub fn minimal_segment(&self) -> Option<[u8; 32]> {
        let entry = self.orientation.as_ref()?;
        let order = self.byte_order;

        let mut seg = [0; 32];
        seg[0..2].copy_from_slice(&APP1_MARKER.to_be_bytes());
        seg[2..4].copy_from_slice(&SEGMENT_LEN.to_be_bytes());
        seg[4..10].copy_from_slice(EXIF_HEADER);
        seg[10..12].copy_from_slice(&self.order_marker);
        seg[12..14].copy_from_slice(&order.u16_bytes(TIFF_MAGIC));
        seg[14..18].copy_from_slice(&order.u32_bytes(IFD0_OFFSET));
        seg[18..20].copy_from_slice(&order.u16_bytes(1)); // entry count
        seg[20..32].copy_from_slice(entry.raw_bytes());
        Some(seg)
    }
}

const APP1_MARKER: u16 = 0xFFE1;
/// 2 length bytes + 6 header bytes + 8-byte TIFF header + 2-byte entry count
/// + one 12-byte entry.
const SEGMENT_LEN: u16 = 30;
/// IFD0 starts right after the 8-byte TIFF header it is measured from.
const IFD0_OFFSET: u32 = 8;

/// Parses an EXIF APP1 payload, starting at the byte after the segment's
/// length field.
///
/// `payload` deliberately extends to the end of the file rather than to the
/// declared segment end: the IFD0 offset is trusted as-is, and files whose
/// directory reaches past the declared length are still accepted.
pub(crate) fn parse(payload: &[u8]) -> Result<ExifData> {
    let mut reader = Reader::new(payload);

    if reader.read_slice(4)? != &EXIF_HEADER[..4] {
        return Err(ErrorKind::InvalidExifHeader.into());
    }
    reader.skip(2)?; // NUL padding of the identifier

    let order_marker = *reader.read_obj::<[u8; 2]>()?;
    let byte_order = match &order_marker {
        b"MM" => ByteOrder::Big,
        b"II" => ByteOrder::Little,
        _ => return Err(ErrorKind::InvalidByteOrder.into()),
    };

    let magic = byte_order.u16_from_bytes(*reader.read_obj()?);
    if magic != TIFF_MAGIC {
        log::warn!("TIFF header magic is {magic:#06x}, expected 0x002a");
    }

    // The offset is measured from the start of the byte-order marker, and the
    // reader already sits 8 bytes past it.
    let ifd0_offset = byte_order.u32_from_bytes(*reader.read_obj()?);
    if ifd0_offset < 8 {
        return Err(ErrorKind::InvalidIfdOffset.into());
    }
    reader.skip(ifd0_offset as usize - 8)?;

    let entry_count = byte_order.u16_from_bytes(*reader.read_obj()?);
    let mut orientation = None;
    for _ in 0..entry_count {
        let entry: &IfdEntry = reader.read_obj()?;
        if entry.tag(byte_order) == ORIENTATION_TAG {
            // Only the first Orientation entry counts; duplicates are ignored.
            orientation = Some(*entry);
            break;
        }
    }

    Ok(ExifData {
        byte_order,
        order_marker,
        orientation,
    })
}
