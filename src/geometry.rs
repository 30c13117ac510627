use std::fmt;
use std::str::FromStr;

use nalgebra as na;
use serde_derive::Deserialize;

use crate::bbox::{BBox, Ltrb};
use crate::error::Error;

/// Position of a point of interest within the bounding box
#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String")]
pub enum AnchorPoint {
    Center,
    CenterLeft,
    CenterRight,
    TopCenter,
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

impl AnchorPoint {
    pub const ALL: [AnchorPoint; 9] = [
        AnchorPoint::Center,
        AnchorPoint::CenterLeft,
        AnchorPoint::CenterRight,
        AnchorPoint::TopCenter,
        AnchorPoint::TopLeft,
        AnchorPoint::TopRight,
        AnchorPoint::BottomLeft,
        AnchorPoint::BottomCenter,
        AnchorPoint::BottomRight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AnchorPoint::Center => "center",
            AnchorPoint::CenterLeft => "center_left",
            AnchorPoint::CenterRight => "center_right",
            AnchorPoint::TopCenter => "top_center",
            AnchorPoint::TopLeft => "top_left",
            AnchorPoint::TopRight => "top_right",
            AnchorPoint::BottomLeft => "bottom_left",
            AnchorPoint::BottomCenter => "bottom_center",
            AnchorPoint::BottomRight => "bottom_right",
        }
    }
}

impl fmt::Display for AnchorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric codes start at 1, `Center` first and `BottomRight` last.
impl TryFrom<u8> for AnchorPoint {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        code.checked_sub(1)
            .and_then(|idx| AnchorPoint::ALL.get(idx as usize))
            .copied()
            .ok_or_else(|| Error::UnsupportedAnchor(code.to_string()))
    }
}

impl FromStr for AnchorPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();

        AnchorPoint::ALL
            .iter()
            .find(|a| a.name() == name)
            .copied()
            .ok_or_else(|| Error::UnsupportedAnchor(s.to_string()))
    }
}

impl TryFrom<String> for AnchorPoint {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Sign with an explicit zero, so `sign(0.0) == 0`.
#[inline]
pub fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

#[inline]
pub fn sign_vector(v: &na::Vector2<f32>) -> [i8; 2] {
    [sign(v.x), sign(v.y)]
}

/// z-component of the 3D cross product of two plane vectors.
#[inline]
pub fn cross(u: &na::Vector2<f32>, v: &na::Vector2<f32>) -> f32 {
    u.x * v.y - u.y * v.x
}

/// Checks whether segment `a-b` straddles segment `c-d`.
///
/// Touching and collinear configurations are not reported as intersections:
/// a zero signed area compares equal only to another zero.
pub fn segments_intersect(
    a: &na::Point2<f32>,
    b: &na::Point2<f32>,
    c: &na::Point2<f32>,
    d: &na::Point2<f32>,
) -> bool {
    let s = (a.x - b.x) * (c.y - a.y) - (a.y - b.y) * (c.x - a.x);
    let t = (a.x - b.x) * (d.y - a.y) - (a.y - b.y) * (d.x - a.x);
    if sign(s) == sign(t) {
        return false;
    }

    let s = (c.x - d.x) * (a.y - c.y) - (c.y - d.y) * (a.x - c.x);
    let t = (c.x - d.x) * (b.y - c.y) - (c.y - d.y) * (b.x - c.x);

    sign(s) != sign(t)
}

#[inline]
pub fn anchor_point(bbox: &BBox<Ltrb>, anchor: AnchorPoint) -> na::Point2<f32> {
    bbox.anchor(anchor)
}

#[inline]
pub fn vector(start: &na::Point2<f32>, end: &na::Point2<f32>) -> na::Vector2<f32> {
    end - start
}

/// Length of the component of `b` orthogonal to `a`, `None` for a zero `a`.
pub fn projection_residual(a: &na::Vector2<f32>, b: &na::Vector2<f32>) -> Option<f32> {
    let aa = a.dot(a);
    if aa == 0.0 {
        return None;
    }

    let proj = a * (a.dot(b) / aa);

    Some((b - proj).norm())
}
