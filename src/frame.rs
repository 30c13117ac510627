use std::collections::HashMap;

use crate::bbox::{BBox, Ltrb};
use crate::counts::LineCounts;

/// Drawing parameters of the upstream overlay, reused by annotations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    // BGR
    pub color: [u8; 3],
    pub line_width: i32,
    pub font_scale: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: [255, 255, 0],
            line_width: 3,
            font_scale: 1.0,
        }
    }
}

/// Per-frame result envelope shared by the analyzers
#[derive(Debug, Clone)]
pub struct FrameResult<K> {
    /// Boxes of every active trail, oldest first
    pub trails: HashMap<K, Vec<BBox<Ltrb>>>,
    pub trail_classes: HashMap<K, String>,
    pub overlay: OverlayStyle,

    /// Filled by `LineCounter::analyze`, one record per configured line
    pub line_counts: Option<Vec<LineCounts>>,
}

impl<K> Default for FrameResult<K> {
    fn default() -> Self {
        Self {
            trails: HashMap::new(),
            trail_classes: HashMap::new(),
            overlay: OverlayStyle::default(),
            line_counts: None,
        }
    }
}

impl<K: std::hash::Hash + Eq> FrameResult<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trail(mut self, id: K, trail: Vec<BBox<Ltrb>>) -> Self {
        self.trails.insert(id, trail);
        self
    }

    pub fn with_class(mut self, id: K, class: impl Into<String>) -> Self {
        self.trail_classes.insert(id, class.into());
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }
}
