use crate::coord::Coord;

/// A point in the plane.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Point<C: Coord = i32> {
    /// The horizontal coordinate of the point.
    pub x: C,
    /// The vertical coordinate of the point.
    pub y: C,
}

impl<C: Coord> Point<C> {
    /// Creates a new [`Point`].
    pub fn new(x: C, y: C) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle with its origin at the top-left corner.
///
/// A rectangle covers the half-open area `left..right` by `top..bottom`; it
/// is empty unless both its width and its height are positive. Empty
/// rectangles never occur inside a [`Region`]; operations that could produce
/// them drop them instead.
///
/// [`Region`]: crate::Region
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rect<C: Coord = i32> {
    x: C,
    y: C,
    width: C,
    height: C,
}

/// An axis-aligned rectangle with real coordinates.
pub type RectF = Rect<f64>;

impl<C: Coord> Rect<C> {
    /// The empty rectangle at the origin.
    pub const EMPTY: Self = Self {
        x: C::ZERO,
        y: C::ZERO,
        width: C::ZERO,
        height: C::ZERO,
    };

    /// Creates a new [`Rect`] with the given origin and size.
    pub fn new(x: C, y: C, width: C, height: C) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a new [`Rect`] spanning `left..right` and `top..bottom`.
    pub fn from_edges(left: C, top: C, right: C, bottom: C) -> Self {
        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    /// Returns the bottom edge of the rectangle. The edge is exclusive.
    pub fn bottom(&self) -> C {
        self.y.saturating_add(self.height)
    }

    /// Returns `true` if the rectangle contains the point.
    ///
    /// The right and bottom edges are exclusive.
    pub fn contains_point(&self, point: Point<C>) -> bool {
        self.x <= point.x && point.x < self.right() && self.y <= point.y && point.y < self.bottom()
    }

    /// Returns `true` if `other` lies completely inside this rectangle.
    /// An empty rectangle is contained everywhere.
    pub fn contains_rect(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }
        !self.is_empty()
            && self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }

    /// Returns the height of the rectangle.
    pub fn height(&self) -> C {
        self.height
    }

    /// Returns the intersection of the rectangles, which may be empty.
    pub fn intersected(&self, other: &Self) -> Self {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left < right && top < bottom {
            Self::from_edges(left, top, right, bottom)
        } else {
            Self::EMPTY
        }
    }

    /// Returns `true` if the rectangles overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        self.left().max(other.left()) < self.right().min(other.right())
            && self.top().max(other.top()) < self.bottom().min(other.bottom())
    }

    /// Returns `true` if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= C::ZERO || self.height <= C::ZERO
    }

    /// Returns the left edge of the rectangle.
    pub fn left(&self) -> C {
        self.x
    }

    /// Returns the right edge of the rectangle. The edge is exclusive.
    pub fn right(&self) -> C {
        self.x.saturating_add(self.width)
    }

    /// Returns the top edge of the rectangle.
    pub fn top(&self) -> C {
        self.y
    }

    /// Returns a copy shifted by `dx` along the X axis and `dy` along the
    /// Y axis, with each edge clamped to the coordinate range.
    pub fn translated(&self, dx: C, dy: C) -> Self {
        Self::from_edges(
            self.left().saturating_add(dx),
            self.top().saturating_add(dy),
            self.right().saturating_add(dx),
            self.bottom().saturating_add(dy),
        )
    }

    /// Returns the width of the rectangle.
    pub fn width(&self) -> C {
        self.width
    }
}

impl Rect<i32> {
    /// Returns the rectangle with real coordinates. The widening is exact.
    pub fn to_f64(&self) -> RectF {
        RectF::new(
            self.x as f64,
            self.y as f64,
            self.width as f64,
            self.height as f64,
        )
    }
}

impl RectF {
    /// Returns a copy with every edge rounded to the nearest integer.
    ///
    /// Rounding may produce an empty rectangle.
    pub fn rounded(&self) -> Rect {
        Rect::from_edges(
            self.left().round() as i32,
            self.top().round() as i32,
            self.right().round() as i32,
            self.bottom().round() as i32,
        )
    }

    /// Returns a copy with every edge rounded toward the interior of the
    /// rectangle.
    ///
    /// Rounding may produce an empty rectangle.
    pub fn rounded_in(&self) -> Rect {
        Rect::from_edges(
            self.left().ceil() as i32,
            self.top().ceil() as i32,
            self.right().floor() as i32,
            self.bottom().floor() as i32,
        )
    }

    /// Returns a copy with every edge rounded away from the interior of the
    /// rectangle.
    pub fn rounded_out(&self) -> Rect {
        Rect::from_edges(
            self.left().floor() as i32,
            self.top().floor() as i32,
            self.right().ceil() as i32,
            self.bottom().ceil() as i32,
        )
    }

    /// Returns a copy scaled by `sx` along the X axis and `sy` along the
    /// Y axis, with the edges normalized so that a negative factor still
    /// yields a non-negative size.
    pub fn scaled(&self, sx: f64, sy: f64) -> RectF {
        let (left, right) = if sx < 0.0 {
            (self.right() * sx, self.left() * sx)
        } else {
            (self.left() * sx, self.right() * sx)
        };
        let (top, bottom) = if sy < 0.0 {
            (self.bottom() * sy, self.top() * sy)
        } else {
            (self.top() * sy, self.bottom() * sy)
        };
        Self::from_edges(left, top, right, bottom)
    }
}
