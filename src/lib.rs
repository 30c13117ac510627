pub mod annotate;
pub mod bbox;
pub mod config;
pub mod counter;
pub mod counts;
pub mod editor;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod line;

#[cfg(feature = "gui")]
pub mod render;

pub use bbox::BBox;
pub use config::LineCounterConfig;
pub use counter::LineCounter;
pub use counts::{CountingScheme, DirectionCounts, LineCounts};
pub use editor::{LineEditor, PointerEvent};
pub use frame::FrameResult;
pub use geometry::AnchorPoint;
pub use line::Line;

use error::Error;
use std::{fmt, hash::Hash};

/// Stage of a per-frame analysis chain working on a shared result envelope.
pub trait ResultAnalyzer<K> {
    fn analyze(&mut self, result: &mut FrameResult<K>) -> Result<(), Error>;
    fn reset(&mut self);

    #[cfg(feature = "gui")]
    fn annotate(&self, result: &FrameResult<K>, image: &mut opencv::core::Mat) -> Result<(), Error>;
}

impl<K: Hash + Eq + Clone + fmt::Debug> ResultAnalyzer<K> for LineCounter<K> {
    #[inline]
    fn analyze(&mut self, result: &mut FrameResult<K>) -> Result<(), Error> {
        LineCounter::analyze(self, result)
    }

    #[inline]
    fn reset(&mut self) {
        LineCounter::reset(self)
    }

    #[cfg(feature = "gui")]
    #[inline]
    fn annotate(
        &self,
        result: &FrameResult<K>,
        image: &mut opencv::core::Mat,
    ) -> Result<(), Error> {
        render::annotate(self, result, image)
    }
}
