//! Bounding-box math shared by words, lines and line groups.
//!
//! OCR backends report word boxes as four vertices that are not guaranteed
//! to be axis aligned (scanned pages are rarely perfectly straight). All
//! extents are therefore derived from the sorted vertex coordinates, taking
//! the mean of the two nearest values per edge.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single vertex in backend coordinates (origin top-left, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position; backends omit zero coordinates
    #[serde(default)]
    pub x: f32,
    /// Vertical position
    #[serde(default)]
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Slope of the segment from `a` to `b`.
///
/// Identical points have slope 0. Points stacked vertically yield an
/// infinite slope whose sign follows the vertical direction.
pub fn slope(a: Point, b: Point) -> f32 {
    if a == b {
        return 0.0;
    }
    (b.y - a.y) / (b.x - a.x)
}

/// Quadrilateral bounding box as reported by the OCR backend.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// The four corners, usually clockwise from top-left
    pub vertices: [Point; 4],
}

impl BoundingBox {
    /// Create a bounding box from four vertices.
    pub fn new(vertices: [Point; 4]) -> Self {
        Self { vertices }
    }

    /// Axis-aligned box covering the given extent.
    pub fn from_extent(extent: Extent) -> Self {
        Self::new([
            Point::new(extent.min_x, extent.min_y),
            Point::new(extent.min_x, extent.max_y),
            Point::new(extent.max_x, extent.max_y),
            Point::new(extent.max_x, extent.min_y),
        ])
    }

    /// Axis-aligned box from its left, top, right and bottom edges.
    pub fn from_rect(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::from_extent(Extent {
            min_x: left,
            max_x: right,
            min_y: top,
            max_y: bottom,
        })
    }

    /// Sorted x coordinates of the vertices.
    pub fn x_coordinates(&self) -> [f32; 4] {
        self.sorted_axis(|p| p.x)
    }

    /// Sorted y coordinates of the vertices.
    pub fn y_coordinates(&self) -> [f32; 4] {
        self.sorted_axis(|p| p.y)
    }

    fn sorted_axis(&self, axis: impl Fn(&Point) -> f32) -> [f32; 4] {
        let mut values = self.vertices.map(|p| axis(&p));
        values.sort_by(|a, b| a.total_cmp(b));
        values
    }

    /// Plain minimum vertex y (no averaging).
    pub fn top(&self) -> f32 {
        self.y_coordinates()[0]
    }

    /// Plain maximum vertex y (no averaging).
    pub fn bottom(&self) -> f32 {
        self.y_coordinates()[3]
    }

    /// Edge-averaged extent of the box.
    pub fn extent(&self) -> Extent {
        let xs = self.x_coordinates();
        let ys = self.y_coordinates();
        Extent {
            min_x: (xs[0] + xs[1]) / 2.0,
            max_x: (xs[2] + xs[3]) / 2.0,
            min_y: (ys[0] + ys[1]) / 2.0,
            max_y: (ys[2] + ys[3]) / 2.0,
        }
    }

    /// Mean slope of the lower and upper edge pairs.
    ///
    /// Degenerate boxes with zero width have slope 0.
    pub fn slope(&self) -> f32 {
        let ys = self.y_coordinates();
        let width = self.extent().width();
        if width == 0.0 {
            return 0.0;
        }

        let lower = (ys[1] - ys[0]) / width;
        let upper = (ys[3] - ys[2]) / width;
        (lower + upper) / 2.0
    }
}

/// Axis-aligned extent derived from a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Extent {
    pub fn width(&self) -> f32 {
        (self.max_x - self.min_x).abs()
    }

    pub fn height(&self) -> f32 {
        (self.max_y - self.min_y).abs()
    }

    pub fn center_x(&self) -> f32 {
        self.min_x + self.width() / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.min_y + self.height() / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    pub fn left_midpoint(&self) -> Point {
        Point::new(self.min_x, self.center_y())
    }

    pub fn right_midpoint(&self) -> Point {
        Point::new(self.max_x, self.center_y())
    }

    /// Smallest extent covering both.
    pub fn union(&self, other: &Extent) -> Extent {
        Extent {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Anything with a position on the page and text to contribute.
///
/// Words report their own box; lines and line groups derive theirs from
/// their children and fail with [`Error::EmptyElement`](crate::Error::EmptyElement)
/// when they have none.
pub trait Element {
    /// The element's bounding box.
    fn bounds(&self) -> Result<BoundingBox>;

    /// Text of the element, including the break text of nested children.
    fn text(&self) -> String;

    /// Text emitted after this element when it is joined with siblings.
    fn break_text(&self) -> &str;

    fn extent(&self) -> Result<Extent> {
        Ok(self.bounds()?.extent())
    }

    fn center(&self) -> Result<Point> {
        Ok(self.extent()?.center())
    }

    fn width(&self) -> Result<f32> {
        Ok(self.extent()?.width())
    }

    fn height(&self) -> Result<f32> {
        Ok(self.extent()?.height())
    }

    fn slope(&self) -> Result<f32> {
        Ok(self.bounds()?.slope())
    }
}
