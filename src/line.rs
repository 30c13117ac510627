use nalgebra as na;

use crate::geometry;

/// Counting line in frame pixel coordinates.
///
/// The direction vector is derived from the endpoints on construction only,
/// so a `Line` is always consistent with itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    start: na::Point2<f32>,
    end: na::Point2<f32>,
    vector: na::Vector2<f32>,
}

impl Line {
    pub fn new(start: na::Point2<f32>, end: na::Point2<f32>) -> Self {
        Self {
            start,
            end,
            vector: geometry::vector(&start, &end),
        }
    }

    #[inline]
    pub fn from_coords(coords: [f32; 4]) -> Self {
        let [x1, y1, x2, y2] = coords;
        Self::new(na::Point2::new(x1, y1), na::Point2::new(x2, y2))
    }

    #[inline(always)]
    pub fn start(&self) -> &na::Point2<f32> {
        &self.start
    }

    #[inline(always)]
    pub fn end(&self) -> &na::Point2<f32> {
        &self.end
    }

    #[inline(always)]
    pub fn vector(&self) -> &na::Vector2<f32> {
        &self.vector
    }

    #[inline]
    pub fn coords(&self) -> [f32; 4] {
        [self.start.x, self.start.y, self.end.x, self.end.y]
    }

    #[inline]
    pub fn is_mostly_horizontal(&self) -> bool {
        (self.start.x - self.end.x).abs() > (self.start.y - self.end.y).abs()
    }
}

/// Vector from the first endpoint of `line` to the second one.
#[inline]
pub fn line_vector(line: &Line) -> na::Vector2<f32> {
    geometry::vector(line.start(), line.end())
}
