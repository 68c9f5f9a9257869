use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::{
    fmt,
    io::{self, Read, Write},
};

/// A coordinate of a [`Rect`] or a [`Region`].
///
/// The trait unifies integer and real coordinate arithmetic so that the band
/// algorithms can be written once. Coordinates are assumed to be totally
/// ordered; feeding NaN real coordinates to a region operation is outside the
/// contract.
///
/// [`Rect`]: crate::Rect
/// [`Region`]: crate::Region
pub trait Coord: Copy + PartialEq + PartialOrd + fmt::Debug {
    const ZERO: Self;

    /// The most negative representable coordinate.
    const MIN: Self;

    /// The most positive representable coordinate.
    const MAX: Self;

    /// Returns `true` if `self + rhs` cannot be represented exactly in the
    /// coordinate range.
    fn add_overflows(self, rhs: Self) -> bool;

    /// Returns half the coordinate, toward zero.
    fn half(self) -> Self;

    /// Returns `true` if the coordinate may participate in region arithmetic.
    fn is_valid(self) -> bool;

    /// Returns the larger of the coordinates.
    fn max(self, other: Self) -> Self;

    /// Returns the smaller of the coordinates.
    fn min(self, other: Self) -> Self;

    /// Reads a coordinate from a little-endian stream.
    fn read_coord<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self>;

    /// Returns `self + rhs`, clamped to the representable range.
    fn saturating_add(self, rhs: Self) -> Self;

    /// Returns `self - rhs`, clamped to the representable range.
    fn saturating_sub(self, rhs: Self) -> Self;

    /// Writes the coordinate to a little-endian stream.
    fn write_coord<W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()>;
}

impl Coord for i32 {
    const ZERO: Self = 0;
    const MIN: Self = i32::MIN;
    const MAX: Self = i32::MAX;

    fn add_overflows(self, rhs: Self) -> bool {
        self.checked_add(rhs).is_none()
    }

    fn half(self) -> Self {
        self / 2
    }

    fn is_valid(self) -> bool {
        true
    }

    fn max(self, other: Self) -> Self {
        Ord::max(self, other)
    }

    fn min(self, other: Self) -> Self {
        Ord::min(self, other)
    }

    fn read_coord<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        reader.read_i32::<LittleEndian>()
    }

    fn saturating_add(self, rhs: Self) -> Self {
        i32::saturating_add(self, rhs)
    }

    fn saturating_sub(self, rhs: Self) -> Self {
        i32::saturating_sub(self, rhs)
    }

    fn write_coord<W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(self)
    }
}

impl Coord for f64 {
    const ZERO: Self = 0.0;
    const MIN: Self = f64::MIN;
    const MAX: Self = f64::MAX;

    // Real addition rounds instead of overflowing; the translate fast path
    // is always taken.
    fn add_overflows(self, _rhs: Self) -> bool {
        false
    }

    fn half(self) -> Self {
        self / 2.0
    }

    fn is_valid(self) -> bool {
        self.is_finite()
    }

    fn max(self, other: Self) -> Self {
        f64::max(self, other)
    }

    fn min(self, other: Self) -> Self {
        f64::min(self, other)
    }

    fn read_coord<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        reader.read_f64::<LittleEndian>()
    }

    fn saturating_add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn saturating_sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn write_coord<W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        writer.write_f64::<LittleEndian>(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturation() {
        assert_eq!(i32::MAX.saturating_add(1), i32::MAX);
        assert_eq!(i32::MIN.saturating_add(-1), i32::MIN);
        assert!(i32::MAX.add_overflows(1));
        assert!(!i32::MAX.add_overflows(-1));
        assert!(!f64::MAX.add_overflows(f64::MAX));
    }

    #[test]
    fn codec_round_trip() {
        let mut buf = Vec::new();
        (-123i32).write_coord(&mut buf).unwrap();
        2.5f64.write_coord(&mut buf).unwrap();

        let mut cursor = buf.as_slice();
        assert_eq!(i32::read_coord(&mut cursor).unwrap(), -123);
        assert_eq!(f64::read_coord(&mut cursor).unwrap(), 2.5);
    }
}
