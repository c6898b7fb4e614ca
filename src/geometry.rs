//! Plane geometry shared by every entity: points, extents, axis-aligned
//! bounds and the two capability traits (`Collidable`, `Movable`).

use std::ops::{Add, Mul, Sub};

use serde::Deserialize;

// ── Points & vectors ─────────────────────────────────────────────────────────

/// A position or displacement in window pixels (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(Point::new(self.x / len, self.y / len))
        } else {
            None
        }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

// ── Extents & bounds ─────────────────────────────────────────────────────────

/// Visual size of an entity; its collision box has the same size.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Box of `extent` centred on `center`.
    pub fn centered(center: Point, extent: Extent) -> Self {
        let half_w = extent.width / 2.0;
        let half_h = extent.height / 2.0;
        Self {
            left: center.x - half_w,
            top: center.y - half_h,
            right: center.x + half_w,
            bottom: center.y + half_h,
        }
    }

    /// The playable window, anchored at the origin.
    pub fn window(width: f64, height: f64) -> Self {
        Self { left: 0.0, top: 0.0, right: width, bottom: height }
    }

    /// True when the two boxes share a region of non-zero area.
    /// Boxes that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// True when `self` lies entirely inside `outer` (edges may coincide).
    pub fn is_within(&self, outer: &Bounds) -> bool {
        self.left >= outer.left
            && self.top >= outer.top
            && self.right <= outer.right
            && self.bottom <= outer.bottom
    }

    /// True when `point` is inside the box, edges included.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }
}

// ── Capabilities ─────────────────────────────────────────────────────────────

/// Anything with a position and a collision box.
pub trait Collidable {
    fn position(&self) -> Point;
    fn extent(&self) -> Extent;

    fn bounds(&self) -> Bounds {
        Bounds::centered(self.position(), self.extent())
    }

    fn collides_with<C: Collidable + ?Sized>(&self, other: &C) -> bool {
        self.bounds().intersects(&other.bounds())
    }
}

/// Entities that reposition themselves every tick.
pub trait Movable {
    fn move_to(&mut self, destination: Point);
}
