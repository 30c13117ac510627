use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, trace};

use crate::annotate::AnnotationStyle;
use crate::config::LineCounterConfig;
use crate::counts::{CountingScheme, LineCounts};
use crate::editor::{self, LineEditor, LineSet, SharedLines};
use crate::error::Error;
use crate::frame::{FrameResult, OverlayStyle};
use crate::geometry::{self, AnchorPoint};
use crate::line::Line;

/// Counts object trails crossing a set of lines.
///
/// Every frame passed to [`LineCounter::analyze`] is checked trail by trail
/// against every line. A crossing is classified either against the image
/// axes (one of left/right plus one of top/bottom) or against the crossed
/// line (in or out), and the per-line records are published on the frame.
pub struct LineCounter<K> {
    lines: SharedLines,
    anchor: AnchorPoint,
    whole_trail: bool,
    count_first_crossing: bool,
    accumulate: bool,
    per_class_display: bool,
    scheme: CountingScheme,

    counted: Vec<HashSet<K>>,
    counts: Vec<LineCounts>,

    show_overlay: bool,
    annotation_color: Option<[u8; 3]>,
    annotation_line_width: Option<i32>,
}

impl<K: Hash + Eq + Clone + fmt::Debug> LineCounter<K> {
    pub fn configure(config: LineCounterConfig) -> Self {
        let lines: Vec<Line> = config.lines.iter().copied().map(Line::from_coords).collect();
        let scheme = CountingScheme::new(config.absolute_directions);
        let nlines = lines.len();

        info!(
            lines = nlines,
            ?scheme,
            anchor = %config.anchor_point,
            whole_trail = config.whole_trail,
            count_first_crossing = config.count_first_crossing,
            accumulate = config.accumulate,
            "line counter configured"
        );

        let counter = Self {
            lines: Arc::new(Mutex::new(LineSet::new(lines))),
            anchor: config.anchor_point,
            whole_trail: config.whole_trail,
            count_first_crossing: config.count_first_crossing,
            accumulate: config.accumulate,
            per_class_display: config.per_class_display,
            scheme,
            counted: (0..nlines).map(|_| HashSet::new()).collect(),
            counts: (0..nlines).map(|_| LineCounts::new(scheme)).collect(),
            show_overlay: config.show_overlay,
            annotation_color: config.annotation_color,
            annotation_line_width: config.annotation_line_width,
        };

        if let Some(name) = &config.window_name {
            counter.try_attach_window(name);
        }

        counter
    }

    #[cfg(feature = "gui")]
    fn try_attach_window(&self, name: &str) {
        if let Err(err) = crate::render::attach_window(name, self.editor()) {
            tracing::warn!(window = name, %err, "line editing disabled");
        }
    }

    #[cfg(not(feature = "gui"))]
    fn try_attach_window(&self, name: &str) {
        tracing::warn!(
            window = name,
            "line editing disabled: built without the `gui` feature"
        );
    }

    pub fn reset(&mut self) {
        for counted in &mut self.counted {
            counted.clear();
        }

        for counts in &mut self.counts {
            *counts = LineCounts::new(self.scheme);
        }

        info!("line counts reset");
    }

    /// Detects trails crossing the lines and stores a copy of the counts in
    /// `result.line_counts`.
    ///
    /// A frame without trails is skipped and leaves `result` untouched.
    pub fn analyze(&mut self, result: &mut FrameResult<K>) -> Result<(), Error> {
        if result.trails.is_empty() {
            trace!("no trails in frame");
            return Ok(());
        }

        let set = editor::lock(&self.lines);

        let candidates: Vec<Vec<&K>> = self
            .counted
            .iter_mut()
            .map(|counted| {
                if self.count_first_crossing {
                    // forget trails which are not active anymore
                    counted.retain(|id| result.trails.contains_key(id));

                    result
                        .trails
                        .keys()
                        .filter(|id| !counted.contains(*id))
                        .collect()
                } else {
                    result.trails.keys().collect()
                }
            })
            .collect();

        if !self.accumulate {
            for counts in &mut self.counts {
                *counts = LineCounts::new(self.scheme);
            }
        }

        for (idx, (line, ids)) in set.lines().iter().zip(candidates).enumerate() {
            for id in ids {
                let trail = &result.trails[id];
                if trail.len() < 2 {
                    continue;
                }

                let first = if self.whole_trail { 0 } else { trail.len() - 2 };
                let start = trail[first].anchor(self.anchor);
                let end = trail[trail.len() - 1].anchor(self.anchor);

                if !geometry::segments_intersect(line.start(), line.end(), &start, &end) {
                    continue;
                }

                if self.count_first_crossing {
                    self.counted[idx].insert(id.clone());
                }

                let crossing = self
                    .scheme
                    .classify(&geometry::vector(&start, &end), line.vector());

                debug!(line = idx, id = ?id, ?crossing, "trail crossed line");

                let counts = &mut self.counts[idx];
                let recorded = counts.record_total(crossing);
                debug_assert!(recorded, "{:?} in {:?} counts", crossing, self.scheme);

                if self.per_class_display {
                    let class = result
                        .trail_classes
                        .get(id)
                        .ok_or_else(|| Error::MissingClassLabel(format!("{:?}", id)))?;

                    let recorded = counts.record_class(class, crossing);
                    debug_assert!(recorded, "{:?} in {:?} counts", crossing, self.scheme);
                }
            }
        }

        drop(set);
        result.line_counts = Some(self.counts.clone());

        Ok(())
    }

    /// Handle for moving lines interactively, see [`crate::editor`]
    pub fn editor(&self) -> LineEditor {
        LineEditor::new(self.lines.clone())
    }
}

impl<K> LineCounter<K> {
    /// Snapshot of the committed lines
    pub fn lines(&self) -> Vec<Line> {
        editor::lock(&self.lines).lines().to_vec()
    }

    /// Lines as they should be drawn right now, including a drag in progress
    pub fn display_lines(&self) -> Vec<Line> {
        editor::lock(&self.lines).display_lines()
    }

    #[inline]
    pub fn counts(&self) -> &[LineCounts] {
        &self.counts
    }

    #[inline]
    pub fn scheme(&self) -> CountingScheme {
        self.scheme
    }

    #[inline]
    pub fn per_class_display(&self) -> bool {
        self.per_class_display
    }

    /// Drawing style for the overlay of a frame, `None` when annotation is off.
    pub fn annotation_style(&self, overlay: &OverlayStyle) -> Option<AnnotationStyle> {
        self.show_overlay.then(|| {
            AnnotationStyle::resolve(overlay, self.annotation_color, self.annotation_line_width)
        })
    }
}
