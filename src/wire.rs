//! Stream encoding of regions.
//!
//! A region is encoded as a little-endian `u32` rectangle count followed by
//! the rectangles, each as `x, y, width, height` in the coordinate type of
//! the region. Decoding rebuilds the region from scratch, so a stream
//! produced by a different writer does not need to be canonical.

use crate::{coord::Coord, rect::Rect, region::Region};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};
use thiserror::Error;

/// Decoded rectangle lists grow incrementally past this, so a corrupt count
/// cannot trigger a huge allocation.
const MAX_PREALLOCATED: u32 = 4096;

/// An error produced while decoding a region from a stream.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The stream failed or ended early.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// A real coordinate was NaN or infinite.
    #[error("non-finite coordinate in stream")]
    InvalidCoordinate,
}

impl<C: Coord> Region<C> {
    /// Decodes a region from `reader`.
    ///
    /// The rectangles are rebuilt through [`Region::from_unsorted_rects`],
    /// so any order, overlap or duplication in the stream is tolerated.
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self, ReadError> {
        let count = reader.read_u32::<LittleEndian>()?;
        let mut rects = Vec::with_capacity(count.min(MAX_PREALLOCATED) as usize);
        for _ in 0..count {
            let x = C::read_coord(reader)?;
            let y = C::read_coord(reader)?;
            let width = C::read_coord(reader)?;
            let height = C::read_coord(reader)?;
            if !(x.is_valid() && y.is_valid() && width.is_valid() && height.is_valid()) {
                return Err(ReadError::InvalidCoordinate);
            }
            rects.push(Rect::new(x, y, width, height));
        }
        Ok(Self::from_unsorted_rects(&rects))
    }

    /// Encodes the region to `writer`.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        let count = u32::try_from(self.rect_count()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "region has more rectangles than the format can count",
            )
        })?;
        writer.write_u32::<LittleEndian>(count)?;
        for rect in self.rects() {
            rect.left().write_coord(writer)?;
            rect.top().write_coord(writer)?;
            rect.width().write_coord(writer)?;
            rect.height().write_coord(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rect::RectF, region::RegionF};

    #[test]
    fn round_trip() {
        let region = Region::from_unsorted_rects(&[
            Rect::new(0, 0, 10, 10),
            Rect::new(5, 5, 10, 10),
            Rect::new(-30, -2, 4, 4),
        ]);
        let mut buf = Vec::new();
        region.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), 4 + region.rect_count() * 16);
        assert_eq!(Region::read_from(&mut buf.as_slice()).unwrap(), region);

        let real = RegionF::from_unsorted_rects(&[
            RectF::new(0.5, 0.5, 2.5, 2.5),
            RectF::new(-1.25, 0.0, 1.0, 4.0),
        ]);
        let mut buf = Vec::new();
        real.write_to(&mut buf).unwrap();
        assert_eq!(RegionF::read_from(&mut buf.as_slice()).unwrap(), real);
    }

    #[test]
    fn empty_round_trip() {
        let mut buf = Vec::new();
        Region::<i32>::new().write_to(&mut buf).unwrap();
        assert_eq!(buf, [0, 0, 0, 0]);
        assert!(Region::<i32>::read_from(&mut buf.as_slice()).unwrap().is_empty());
    }

    #[test]
    fn non_canonical_stream_is_rebuilt() {
        // Two overlapping rectangles, bottom-most first.
        let mut buf = Vec::new();
        buf.write_u32::<LittleEndian>(2).unwrap();
        for value in [0i32, 5, 10, 10, 0, 0, 10, 10] {
            value.write_coord(&mut buf).unwrap();
        }
        let region = Region::read_from(&mut buf.as_slice()).unwrap();
        assert_eq!(region, Region::from(Rect::new(0, 0, 10, 15)));
        assert!(region.is_canonical());
    }

    #[test]
    fn truncated_stream_fails() {
        let region = Region::from(Rect::new(0, 0, 10, 10));
        let mut buf = Vec::new();
        region.write_to(&mut buf).unwrap();
        buf.truncate(buf.len() - 1);
        assert!(matches!(
            Region::<i32>::read_from(&mut buf.as_slice()),
            Err(ReadError::Io(_))
        ));
    }

    #[test]
    fn non_finite_coordinate_fails() {
        let mut buf = Vec::new();
        buf.write_u32::<LittleEndian>(1).unwrap();
        for value in [f64::NAN, 0.0, 1.0, 1.0] {
            value.write_coord(&mut buf).unwrap();
        }
        assert!(matches!(
            RegionF::read_from(&mut buf.as_slice()),
            Err(ReadError::InvalidCoordinate)
        ));
    }
}
