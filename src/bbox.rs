use serde_derive::{Deserialize, Serialize};
use std::marker::PhantomData;

use nalgebra as na;

use crate::geometry::AnchorPoint;

pub trait BBoxFormat: std::fmt::Debug {}

/// Left-top-right-bottom format, contains left top and right bottom corners
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BBox<F: BBoxFormat + serde::Serialize + serde::Deserialize<'static> + PartialEq>(
    [f32; 4],
    PhantomData<F>,
);

impl<F: BBoxFormat + serde::Serialize + serde::Deserialize<'static> + PartialEq> BBox<F> {
    #[inline]
    pub fn as_slice(&self) -> &[f32; 4] {
        &self.0
    }

    // Use carefully when you REALLY sure that slice have needed format
    #[inline(always)]
    pub fn assigned(slice: &[f32; 4]) -> Self {
        BBox(*slice, Default::default())
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(x1: f32, x2: f32, x3: f32, x4: f32) -> Self {
        BBox([x1, x2, x3, x4], Default::default())
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[3]
    }

    #[inline(always)]
    pub fn cx(&self) -> f32 {
        (self.0[0] + self.0[2]) / 2.0
    }

    #[inline(always)]
    pub fn cy(&self) -> f32 {
        (self.0[1] + self.0[3]) / 2.0
    }

    /// Point of interest inside the box selected by `anchor`.
    pub fn anchor(&self, anchor: AnchorPoint) -> na::Point2<f32> {
        let (x, y) = match anchor {
            AnchorPoint::Center => (self.cx(), self.cy()),
            AnchorPoint::CenterLeft => (self.left(), self.cy()),
            AnchorPoint::CenterRight => (self.right(), self.cy()),
            AnchorPoint::TopCenter => (self.cx(), self.top()),
            AnchorPoint::TopLeft => (self.left(), self.top()),
            AnchorPoint::TopRight => (self.right(), self.top()),
            AnchorPoint::BottomLeft => (self.left(), self.bottom()),
            AnchorPoint::BottomCenter => (self.cx(), self.bottom()),
            AnchorPoint::BottomRight => (self.right(), self.bottom()),
        };

        na::Point2::new(x, y)
    }
}
