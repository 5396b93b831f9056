//! Core geometric types for the router

use std::ops::{Add, Mul, Neg, Sub};

use serde::Deserialize;

/// A 2D point in world (or arrow-local) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (*self - other).length()
    }

    /// Move this point away from (or toward) `origin` by a factor
    pub fn scale_from(&self, origin: Point, factor: f64) -> Point {
        origin + (*self - origin) * factor
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D direction, not necessarily of unit length
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn cross(&self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_zero(&self) -> bool {
        *self == Vector::ZERO
    }

    /// The cardinal heading closest to this vector, `None` for the zero vector
    pub fn heading(&self) -> Option<Heading> {
        Heading::from_vector(*self)
    }

    /// The heading of an exactly axis-aligned, non-zero vector
    pub fn cardinal(&self) -> Option<Heading> {
        if (self.x == 0.0) == (self.y == 0.0) {
            None
        } else {
            self.heading()
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

/// One of the four cardinal directions a committed route segment may take.
///
/// Screen coordinates: y grows downward, so `Up` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    /// Classify a vector by its dominant axis; exact zero has no heading.
    ///
    /// Exact diagonals fall through the comparisons in order: those
    /// pointing left resolve to `Left`, all others to `Up`.
    pub fn from_vector(v: Vector) -> Option<Heading> {
        if v.is_zero() {
            return None;
        }
        let abs_x = v.x.abs();
        let abs_y = v.y.abs();
        if v.x > abs_y {
            Some(Heading::Right)
        } else if v.x <= -abs_y {
            Some(Heading::Left)
        } else if v.y > abs_x {
            Some(Heading::Down)
        } else {
            Some(Heading::Up)
        }
    }

    pub fn to_vector(self) -> Vector {
        match self {
            Heading::Up => Vector::new(0.0, -1.0),
            Heading::Right => Vector::new(1.0, 0.0),
            Heading::Down => Vector::new(0.0, 1.0),
            Heading::Left => Vector::new(-1.0, 0.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Heading::Left | Heading::Right)
    }

    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Right => Heading::Left,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
        }
    }

    /// Quarter turn clockwise on screen (right-hand turn)
    pub fn rotate_cw(self) -> Heading {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    /// Quarter turn counter-clockwise on screen (left-hand turn)
    pub fn rotate_ccw(self) -> Heading {
        self.rotate_cw().opposite()
    }
}

/// An ordered pair of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn vector(&self) -> Vector {
        self.end - self.start
    }
}

/// An axis-aligned box. `min_x <= max_x` and `min_y <= max_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box containing every point, `None` for an empty iterator
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Bounds> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds::new(p.x, p.y, p.x, p.y),
                Some(b) => b.expand_to_include(p),
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }

    /// Strict interior test: points on the boundary are outside
    pub fn contains(&self, point: Point) -> bool {
        point.x > self.min_x && point.x < self.max_x && point.y > self.min_y && point.y < self.max_y
    }

    /// Check if this box overlaps another; touching edges do not count
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Grow the box by `offset` on every side
    pub fn inflate(&self, offset: f64) -> Bounds {
        Bounds::new(
            self.min_x - offset,
            self.min_y - offset,
            self.max_x + offset,
            self.max_y + offset,
        )
    }

    /// Compute the union of two boxes
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn expand_to_include(&self, point: Point) -> Bounds {
        Bounds::new(
            self.min_x.min(point.x),
            self.min_y.min(point.y),
            self.max_x.max(point.x),
            self.max_y.max(point.y),
        )
    }

    /// Corners in clockwise screen order starting at the top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// The four edges wound clockwise: top, right, bottom, left.
    ///
    /// The winding gives every edge a consistent "first" and "second" end,
    /// which the intersection resolver reads as left and right offsets.
    pub fn clockwise_edges(&self) -> [Segment; 4] {
        let [tl, tr, br, bl] = self.corners();
        [
            Segment::new(tl, tr),
            Segment::new(tr, br),
            Segment::new(br, bl),
            Segment::new(bl, tl),
        ]
    }
}
