//! JPEG marker-segment scanner.


use std::mem;

use bytemuck::AnyBitPattern;

use crate::error::{Error, ErrorKind, Result};

/// The `FF E1` marker introducing an APP1 segment, as a big-endian pair.
const MARKER_APP1: u16 = 0xFFE1;

pub(crate) struct JpegParser<'a> {
    reader: Reader<'a>,
}

impl<'a> JpegParser<'a> {
    pub fn new(buf: &'a [u8]) -> Result<Self> {
        let mut reader = Reader { buf, position: 0 };
        if reader.read_u8()? != 0xFF || reader.read_u8()? != 0xD8 {
            return Err(ErrorKind::MissingSoiMarker.into());
        }
        Ok(Self { reader })
    }

    /// Walks the marker-segment sequence until the APP1 segment is found.
    ///
    /// Only the segment *structure* is interpreted: every segment other than
    /// APP1 is skipped over using its declared length, payload untouched.
    ///
    /// Running off the end of the buffer, or hitting a byte that is not a
    /// valid `FF xx` marker (which happens once the walk reaches entropy-coded
    /// scan data), means the file carries no EXIF segment and reports
    /// [`ErrorKind::ExifNotPresent`].
    pub fn find_app1(mut self) -> Result<App1Segment> {
        loop {
            let offset = self.reader.position;
            let marker = self.reader.read_u16().map_err(end_of_markers)?;
            let length = self.reader.read_u16().map_err(end_of_markers)?;

            if marker >> 8 != 0xFF {
                return Err(ErrorKind::ExifNotPresent.into());
            }
            // The length includes its own 2 bytes.
            if length < 2 {
                return Err(ErrorKind::InvalidBlockSize.into());
            }
            let length = usize::from(length);

            if marker == MARKER_APP1 {
                if self.reader.buf.len() - offset < 2 + length {
                    return Err(ErrorKind::UnexpectedEof.into());
                }
                log::debug!("APP1 segment at offset {offset:#06x}, {length} bytes");
                return Ok(App1Segment { offset, length });
            }

            self.reader.skip(length - 2).map_err(end_of_markers)?;
        }
    }
}

/// During the marker walk, reaching the end of the buffer is the ordinary "no
/// EXIF in this file" outcome, not a parse failure.
fn end_of_markers(_: Error) -> Error {
    ErrorKind::ExifNotPresent.into()
}

/// Location of an APP1 segment within the input buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct App1Segment {
    /// Byte offset of the segment's `FF E1` marker, from the start of the file.
    pub offset: usize,
    /// The declared segment length: the 2 length bytes plus the payload, but
    /// not the marker itself.
    pub length: usize,
}

impl App1Segment {
    /// Offset of the first payload byte, just past the length field.
    #[inline]
    pub fn payload_start(&self) -> usize {
        self.offset + 4
    }

    /// Offset of the first byte after the segment.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + 2 + self.length
    }
}

#[derive(Debug)]
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, position: 0 }
    }

    fn remaining(&self) -> &'a [u8] {
        &self.buf[self.position..]
    }

    fn peek_u8(&self, offset: usize) -> Result<u8> {
        if self.position + offset >= self.buf.len() {
            Err(ErrorKind::UnexpectedEof.into())
        } else {
            Ok(self.buf[self.position + offset])
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let res = self.peek_u8(0);
        if res.is_ok() {
            self.position += 1;
        }
        res
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let b = [self.read_u8()?, self.read_u8()?];
        Ok(u16::from_be_bytes(b))
    }

    pub fn read_slice(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining().len() < count {
            Err(ErrorKind::UnexpectedEof.into())
        } else {
            let slice = &self.remaining()[..count];
            self.position += count;
            Ok(slice)
        }
    }

    pub fn read_obj<T: AnyBitPattern>(&mut self) -> Result<&'a T> {
        assert_eq!(mem::align_of::<T>(), 1);

        if self.remaining().len() < mem::size_of::<T>() {
            return Err(ErrorKind::UnexpectedEof.into());
        }

        let object = bytemuck::from_bytes(&self.remaining()[..mem::size_of::<T>()]);

        self.position += mem::size_of::<T>();
        Ok(object)
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        if self.remaining().len() < count {
            return Err(ErrorKind::UnexpectedEof.into());
        }
        self.position += count;
        Ok(())
    }
}
