use crate::{
    coord::Coord,
    rect::{Point, Rect, RectF},
    sweep::{self, BandRef, SweepOp},
};
use itertools::Itertools;
use smallvec::SmallVec;
use std::{
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign},
    slice,
};

/// A collection of non-overlapping rectangles describing an area of the
/// plane.
///
/// The rectangles are stored in the y-x lexicographical order: sorted by the
/// top coordinate from top to bottom and, within equal tops, by the left
/// coordinate from left to right. Rectangles sharing a top coordinate also
/// share a bottom coordinate and form a *band*; rectangles of one band never
/// overlap or touch horizontally, and two vertically adjacent bands with the
/// same horizontal spans are always merged into one. Every operation keeps
/// the stored sequence in this canonical form, so two regions cover the same
/// area exactly when they compare equal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Region<C: Coord = i32> {
    rects: Vec<Rect<C>>,
    bounds: Rect<C>,
}

/// A region with real coordinates.
///
/// No fuzzy floating point comparison is performed anywhere; real arithmetic
/// can leave extremely thin rectangles behind, which [`RegionF::rounded`] or
/// [`RegionF::rounded_out`] dispose of.
pub type RegionF = Region<f64>;

impl<C: Coord> Region<C> {
    /// Creates an empty region.
    pub fn new() -> Self {
        Self {
            rects: Vec::new(),
            bounds: Rect::EMPTY,
        }
    }

    /// Constructs a region from rectangles in canonical form.
    ///
    /// The rectangles must be sorted in the y-x lexicographical order and
    /// split into bands: rectangles with the same top coordinate must share a
    /// bottom coordinate, must not overlap, and each must occupy as much
    /// horizontal space as possible. `rects()` of any region satisfies this
    /// and round-trips unchanged.
    ///
    /// Empty rectangles are dropped, touching spans are merged and adjacent
    /// bands with identical spans are coalesced, so borderline inputs are
    /// normalized rather than rejected. Anything less sorted than that is a
    /// contract violation; use [`Region::from_unsorted_rects`] instead.
    pub fn from_sorted_rects(rects: &[Rect<C>]) -> Self {
        let list: Vec<Rect<C>> = rects.iter().copied().filter(|r| !r.is_empty()).collect();
        debug_assert!(
            list.iter().tuple_windows().all(|(a, b)| {
                if a.top() == b.top() {
                    a.bottom() == b.bottom() && a.left() < b.left()
                } else {
                    a.top() < b.top() && a.bottom() <= b.top()
                }
            }),
            "rectangles are not in the y-x lexicographical band order"
        );
        let mut out = Vec::with_capacity(list.len());
        let mut previous = BandRef::default();
        let mut i = 0;
        while i < list.len() {
            let end = sweep::band_end(&list, i);
            previous = sweep::emit_band(
                &mut out,
                &list[i..end],
                list[i].top(),
                list[i].bottom(),
                previous,
            );
            i = end;
        }
        Self::from_rect_vec(out)
    }

    /// Constructs a region from rectangles sorted by their top coordinate.
    ///
    /// The rectangles may overlap and need not be sorted within a group of
    /// equal tops; rectangles sharing a top coordinate are expected to share
    /// a bottom coordinate. Empty rectangles are dropped.
    ///
    /// Because the groups arrive in top order, every group is united as one
    /// pre-merged band, which is cheaper than uniting the rectangles one by
    /// one.
    pub fn from_rects_sorted_by_y(rects: &[Rect<C>]) -> Self {
        debug_assert!(
            rects
                .iter()
                .filter(|r| !r.is_empty())
                .tuple_windows()
                .all(|(a, b)| a.top() <= b.top()),
            "rectangles are not sorted by their top coordinate"
        );
        let mut region = Self::new();
        let groups = rects
            .iter()
            .copied()
            .filter(|r| !r.is_empty())
            .chunk_by(|r| r.top());
        for (_, group) in &groups {
            let mut band: SmallVec<[Rect<C>; 8]> = group.collect();
            band.sort_unstable_by(|a, b| a.left().partial_cmp(&b.left()).unwrap());
            if band.iter().tuple_windows().all(|(a, b)| a.bottom() == b.bottom()) {
                region = region.united(&Self::from_band(&band));
            } else {
                // Mixed bottoms cannot form one band; unite the group
                // rectangle by rectangle instead.
                for rect in &band {
                    region = region.united_rect(rect);
                }
            }
        }
        region
    }

    /// Constructs a region from arbitrary rectangles.
    ///
    /// The rectangles may overlap, repeat and appear in any order; empty
    /// rectangles are dropped. The region is built by divide-and-conquer
    /// union.
    pub fn from_unsorted_rects(rects: &[Rect<C>]) -> Self {
        fn union_all<C: Coord>(rects: &[Rect<C>]) -> Region<C> {
            match rects {
                [] => Region::new(),
                [rect] => Region::from(*rect),
                _ => {
                    let (a, b) = rects.split_at(rects.len() / 2);
                    union_all(a).united(&union_all(b))
                }
            }
        }
        union_all(rects)
    }

    /// Returns the region covering half the representable coordinate range
    /// in each direction.
    ///
    /// The headroom lets the result be translated and united with finite
    /// regions without overflowing the coordinate type.
    pub fn infinite() -> Self {
        Self::from(Rect::new(C::MIN.half(), C::MIN.half(), C::MAX, C::MAX))
    }

    /// Returns the bounding rectangle of the region, or the empty rectangle
    /// if the region is empty.
    pub fn bounding_rect(&self) -> Rect<C> {
        self.bounds
    }

    /// Returns `true` if the region contains the point.
    pub fn contains_point(&self, point: Point<C>) -> bool {
        if !self.bounds.contains_point(point) {
            return false;
        }
        let i = self.band_by_y(point.y);
        if i == self.rects.len() || self.rects[i].top() > point.y {
            return false;
        }
        let top = self.rects[i].top();
        self.rects[i..]
            .iter()
            .take_while(|r| r.top() == top && r.left() <= point.x)
            .any(|r| point.x < r.right())
    }

    /// Returns `true` if `rect` lies completely inside the region.
    ///
    /// Walks the bands spanned by `rect` and checks that each covers its
    /// full horizontal extent; the bands must chain without vertical gaps.
    pub fn contains_rect(&self, rect: &Rect<C>) -> bool {
        if rect.is_empty() {
            return true;
        }
        if !self.bounds.contains_rect(rect) {
            return false;
        }
        let mut y = rect.top();
        let mut i = self.band_by_y(y);
        loop {
            if i == self.rects.len() || self.rects[i].top() > y {
                return false;
            }
            let end = sweep::band_end(&self.rects, i);
            let bottom = self.rects[i].bottom();
            // A band covers the extent only if one span does; spans never
            // touch, so coverage split over two spans would have a gap.
            let covered = self.rects[i..end]
                .iter()
                .take_while(|r| r.left() <= rect.left())
                .any(|r| r.right() >= rect.right());
            if !covered {
                return false;
            }
            if bottom >= rect.bottom() {
                return true;
            }
            y = bottom;
            i = end;
        }
    }

    /// Returns the intersection of the regions.
    pub fn intersected(&self, other: &Self) -> Self {
        if !self.bounds.intersects(&other.bounds) {
            return Self::new();
        }
        Self::from_rect_vec(sweep::sweep(&self.rects, &other.rects, SweepOp::Intersect))
    }

    /// Returns the intersection of the region and `rect`.
    pub fn intersected_rect(&self, rect: &Rect<C>) -> Self {
        self.intersected(&Self::from(*rect))
    }

    /// Returns `true` if the regions overlap.
    ///
    /// The walk stops at the first overlapping pair of rectangles.
    pub fn intersects(&self, other: &Self) -> bool {
        if !self.bounds.intersects(&other.bounds) {
            return false;
        }
        let a = &self.rects;
        let b = &other.rects;
        let mut ai = 0;
        let mut bi = 0;
        while ai < a.len() && bi < b.len() {
            if a[ai].bottom() <= b[bi].top() {
                ai = sweep::band_end(a, ai);
                continue;
            }
            if b[bi].bottom() <= a[ai].top() {
                bi = sweep::band_end(b, bi);
                continue;
            }
            let a_end = sweep::band_end(a, ai);
            let b_end = sweep::band_end(b, bi);
            let mut i = ai;
            let mut j = bi;
            while i < a_end && j < b_end {
                if a[i].right() <= b[j].left() {
                    i += 1;
                } else if b[j].right() <= a[i].left() {
                    j += 1;
                } else {
                    return true;
                }
            }
            let a_bot = a[ai].bottom();
            let b_bot = b[bi].bottom();
            if a_bot <= b_bot {
                ai = a_end;
            }
            if b_bot <= a_bot {
                bi = b_end;
            }
        }
        false
    }

    /// Returns `true` if the region and `rect` overlap.
    pub fn intersects_rect(&self, rect: &Rect<C>) -> bool {
        if rect.is_empty() || !self.bounds.intersects(rect) {
            return false;
        }
        self.rects[self.band_by_y(rect.top())..]
            .iter()
            .take_while(|r| r.top() < rect.bottom())
            .any(|r| r.intersects(rect))
    }

    /// Returns `true` if the stored sequence satisfies the canonical form:
    /// no empty rectangles, the y-x lexicographical order, uniform bands
    /// occupying disjoint vertical extents, no horizontal overlap or touch
    /// within a band, maximal vertical coalescing, and a bounding rectangle
    /// that matches the sequence.
    ///
    /// Every region produced by this crate is canonical; the check exists
    /// for test harnesses and debugging.
    pub fn is_canonical(&self) -> bool {
        if self.rects.iter().any(|r| r.is_empty()) {
            return false;
        }
        for (a, b) in self.rects.iter().tuple_windows() {
            if a.top() == b.top() {
                if a.bottom() != b.bottom() || a.right() >= b.left() {
                    return false;
                }
            } else if a.top() > b.top() || b.top() < a.bottom() {
                return false;
            }
        }
        let mut i = 0;
        while i < self.rects.len() {
            let end = sweep::band_end(&self.rects, i);
            if end < self.rects.len() && self.coalescible(i, end) {
                return false;
            }
            i = end;
        }
        self.bounds == bounds_of(&self.rects)
    }

    /// Returns `true` if the region covers nothing.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Returns an iterator over the rectangles, in the y-x lexicographical
    /// order.
    pub fn iter(&self) -> slice::Iter<'_, Rect<C>> {
        self.rects.iter()
    }

    /// Returns the number of stored rectangles.
    pub fn rect_count(&self) -> usize {
        self.rects.len()
    }

    /// Returns the rectangles the region is made of, in the y-x
    /// lexicographical order.
    pub fn rects(&self) -> &[Rect<C>] {
        &self.rects
    }

    /// Returns `other` subtracted from the region.
    pub fn subtracted(&self, other: &Self) -> Self {
        if self.is_empty() || !self.bounds.intersects(&other.bounds) {
            return self.clone();
        }
        Self::from_rect_vec(sweep::sweep(&self.rects, &other.rects, SweepOp::Subtract))
    }

    /// Returns `rect` subtracted from the region.
    pub fn subtracted_rect(&self, rect: &Rect<C>) -> Self {
        self.subtracted(&Self::from(*rect))
    }

    /// Shifts the region by `dx` along the X axis and `dy` along the Y axis.
    ///
    /// Integer coordinates saturate at the representable extremes;
    /// rectangles that collapse under clamping are dropped.
    pub fn translate(&mut self, dx: C, dy: C) {
        if self.is_empty() {
            return;
        }
        let clamped = self.rects.iter().any(|r| {
            r.left().add_overflows(dx)
                || r.right().add_overflows(dx)
                || r.top().add_overflows(dy)
                || r.bottom().add_overflows(dy)
        });
        if !clamped {
            for rect in &mut self.rects {
                *rect = rect.translated(dx, dy);
            }
            self.bounds = self.bounds.translated(dx, dy);
        } else {
            let rects: Vec<Rect<C>> = self
                .rects
                .iter()
                .map(|r| r.translated(dx, dy))
                .filter(|r| !r.is_empty())
                .collect();
            *self = Self::from_unsorted_rects(&rects);
        }
    }

    /// Returns a copy shifted by `dx` along the X axis and `dy` along the
    /// Y axis.
    pub fn translated(&self, dx: C, dy: C) -> Self {
        let mut region = self.clone();
        region.translate(dx, dy);
        region
    }

    /// Returns the union of the regions.
    pub fn united(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::from_rect_vec(sweep::sweep(&self.rects, &other.rects, SweepOp::Union))
    }

    /// Returns the union of the region and `rect`.
    pub fn united_rect(&self, rect: &Rect<C>) -> Self {
        self.united(&Self::from(*rect))
    }

    /// Returns the exclusive or of the regions.
    pub fn xored(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::from_rect_vec(sweep::sweep(&self.rects, &other.rects, SweepOp::Xor))
    }

    /// Returns the exclusive or of the region and `rect`.
    pub fn xored_rect(&self, rect: &Rect<C>) -> Self {
        self.xored(&Self::from(*rect))
    }

    /// Returns the index of the first rectangle whose band is not entirely
    /// above `y`, which is the length of the sequence if every band is.
    ///
    /// Bands occupy disjoint vertical extents, so the bottoms are
    /// non-decreasing across the whole sequence and the band leaders can be
    /// binary searched through any member.
    fn band_by_y(&self, y: C) -> usize {
        self.rects.partition_point(|r| r.bottom() <= y)
    }

    /// Returns `true` if the band starting at `i` could be coalesced with the
    /// band starting at `end`.
    fn coalescible(&self, i: usize, end: usize) -> bool {
        let next_end = sweep::band_end(&self.rects, end);
        self.rects[i].bottom() == self.rects[end].top()
            && next_end - end == end - i
            && (0..end - i).all(|k| {
                let p = &self.rects[i + k];
                let c = &self.rects[end + k];
                p.left() == c.left() && p.right() == c.right()
            })
    }

    /// Builds a single-band region from same-top, same-bottom rectangles
    /// sorted by their left edge, merging any horizontal overlap.
    fn from_band(band: &[Rect<C>]) -> Self {
        let mut spans: SmallVec<[(C, C); 8]> = SmallVec::new();
        for r in band {
            match spans.last_mut() {
                Some(last) if r.left() <= last.1 => last.1 = last.1.max(r.right()),
                _ => spans.push((r.left(), r.right())),
            }
        }
        let mut out = Vec::with_capacity(spans.len());
        sweep::organize_band(
            &mut out,
            spans,
            band[0].top(),
            band[0].bottom(),
            BandRef::default(),
        );
        Self::from_rect_vec(out)
    }

    /// Adopts a canonical sequence and recomputes the bounds.
    fn from_rect_vec(rects: Vec<Rect<C>>) -> Self {
        let bounds = bounds_of(&rects);
        Self { rects, bounds }
    }
}

/// Returns the axis-aligned hull of the sequence, or the empty rectangle if
/// the sequence is empty.
fn bounds_of<C: Coord>(rects: &[Rect<C>]) -> Rect<C> {
    let (first, last) = match (rects.first(), rects.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Rect::EMPTY,
    };
    // Tops and bottoms are ordered; only the horizontal extent needs a scan.
    let mut left = first.left();
    let mut right = first.right();
    for r in rects {
        left = left.min(r.left());
        right = right.max(r.right());
    }
    Rect::from_edges(left, first.top(), right, last.bottom())
}

impl Region<i32> {
    /// Returns a copy scaled by `sx` along the X axis and `sy` along the
    /// Y axis.
    pub fn scaled(&self, sx: f64, sy: f64) -> RegionF {
        let mut region = RegionF::from(self);
        region.scale(sx, sy);
        region
    }

    /// Returns a copy scaled by `sx` and `sy` with every rectangle then
    /// rounded away from its interior to integer coordinates.
    pub fn scaled_and_rounded_out(&self, sx: f64, sy: f64) -> Region {
        self.scaled(sx, sy).rounded_out()
    }
}

impl RegionF {
    /// Returns a copy with every rectangle rounded to the nearest integer
    /// coordinates.
    ///
    /// Rounding may make thin rectangles disappear.
    pub fn rounded(&self) -> Region {
        self.rounded_with(RectF::rounded)
    }

    /// Returns a copy with every rectangle rounded toward its interior.
    ///
    /// Rounding may make thin rectangles disappear.
    pub fn rounded_in(&self) -> Region {
        self.rounded_with(RectF::rounded_in)
    }

    /// Returns a copy with every rectangle rounded away from its interior.
    pub fn rounded_out(&self) -> Region {
        self.rounded_with(RectF::rounded_out)
    }

    /// Scales the region by `sx` along the X axis and `sy` along the Y axis.
    ///
    /// Positive factors preserve the stored order directly; a non-positive
    /// factor reflects the coordinates, so the region is rebuilt.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        if self.is_empty() {
            return;
        }
        let scaled: Vec<RectF> = self.rects.iter().map(|r| r.scaled(sx, sy)).collect();
        if sx > 0.0 && sy > 0.0 && scaled.iter().all(|r| !r.is_empty()) {
            self.rects = scaled;
            self.bounds = self.bounds.scaled(sx, sy);
        } else {
            let kept: Vec<RectF> = scaled.into_iter().filter(|r| !r.is_empty()).collect();
            *self = Self::from_unsorted_rects(&kept);
        }
    }

    /// Returns a copy scaled by `sx` along the X axis and `sy` along the
    /// Y axis.
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        let mut region = self.clone();
        region.scale(sx, sy);
        region
    }

    /// Rounding keeps the tops sorted but can break the band structure, so
    /// the result is rebuilt from the rounded rectangles.
    fn rounded_with(&self, round: impl Fn(&RectF) -> Rect) -> Region {
        let rects: Vec<Rect> = self.rects.iter().map(round).collect();
        Region::from_rects_sorted_by_y(&rects)
    }
}

impl From<&Region<i32>> for RegionF {
    /// The widening is exact, so the canonical form carries over unchanged.
    fn from(region: &Region<i32>) -> Self {
        Self {
            rects: region.rects.iter().map(Rect::to_f64).collect(),
            bounds: region.bounds.to_f64(),
        }
    }
}

impl<C: Coord> Default for Region<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Coord> From<Rect<C>> for Region<C> {
    fn from(rect: Rect<C>) -> Self {
        if rect.is_empty() {
            Self::new()
        } else {
            Self {
                rects: vec![rect],
                bounds: rect,
            }
        }
    }
}

impl<C: Coord> Extend<Rect<C>> for Region<C> {
    fn extend<T: IntoIterator<Item = Rect<C>>>(&mut self, iter: T) {
        for rect in iter {
            *self = self.united_rect(&rect);
        }
    }
}

impl<C: Coord> FromIterator<Rect<C>> for Region<C> {
    fn from_iter<T: IntoIterator<Item = Rect<C>>>(iter: T) -> Self {
        let rects: Vec<Rect<C>> = iter.into_iter().collect();
        Self::from_unsorted_rects(&rects)
    }
}

impl<'a, C: Coord> IntoIterator for &'a Region<C> {
    type Item = &'a Rect<C>;
    type IntoIter = slice::Iter<'a, Rect<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rects.iter()
    }
}

macro_rules! impl_binary_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $method:ident, $method_rect:ident) => {
        impl<C: Coord> $Op<&Region<C>> for &Region<C> {
            type Output = Region<C>;

            fn $op(self, rhs: &Region<C>) -> Region<C> {
                self.$method(rhs)
            }
        }

        impl<C: Coord> $Op<Rect<C>> for &Region<C> {
            type Output = Region<C>;

            fn $op(self, rhs: Rect<C>) -> Region<C> {
                self.$method_rect(&rhs)
            }
        }

        impl<C: Coord> $OpAssign<&Region<C>> for Region<C> {
            fn $op_assign(&mut self, rhs: &Region<C>) {
                *self = self.$method(rhs);
            }
        }

        impl<C: Coord> $OpAssign<Rect<C>> for Region<C> {
            fn $op_assign(&mut self, rhs: Rect<C>) {
                *self = self.$method_rect(&rhs);
            }
        }
    };
}

impl_binary_op!(BitOr, bitor, BitOrAssign, bitor_assign, united, united_rect);
impl_binary_op!(BitAnd, bitand, BitAndAssign, bitand_assign, intersected, intersected_rect);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, subtracted, subtracted_rect);
impl_binary_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, xored, xored_rect);
