//! Banded axis-aligned rectangle regions with Boolean set operations.
//!
//! A [`Region`] represents an arbitrary set of axis-aligned rectangles as a
//! canonical, banded decomposition: rectangles are stored in the y-x
//! lexicographical order and grouped into bands of equal vertical extent.
//! The Boolean operators — union, intersection, difference and symmetric
//! difference — run in time linear in the number of rectangles on each side
//! and keep the decomposition minimal. [`RegionF`] is the same structure
//! with real coordinates.
//!
//! # Examples
//!
//! ```
//! use rectset::{Point, Rect, Region};
//!
//! let a = Region::from(Rect::new(0, 0, 10, 10));
//! let b = Region::from(Rect::new(5, 5, 10, 10));
//!
//! let union = a.united(&b);
//! assert_eq!(
//!     union.rects(),
//!     &[
//!         Rect::new(0, 0, 10, 5),
//!         Rect::new(0, 5, 15, 5),
//!         Rect::new(5, 10, 10, 5),
//!     ]
//! );
//! assert!(union.contains_point(Point::new(12, 12)));
//! assert!(a.intersected(&b).contains_rect(&Rect::new(5, 5, 5, 5)));
//! ```

#![allow(clippy::float_cmp)]

pub use crate::{
    coord::Coord,
    rect::{Point, Rect, RectF},
    region::{Region, RegionF},
    wire::ReadError,
};

mod coord;
mod rect;
mod region;
mod sweep;
mod wire;
