//! Interactive adjustment of counting lines with a pointer.
//!
//! The primary button grabs a whole line by its body, the secondary button
//! grabs a single endpoint. While a drag is in progress only a draft copy of
//! the geometry moves; the counted line (endpoints and vector together) is
//! replaced when the button is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nalgebra as na;
use tracing::trace;

use crate::geometry;
use crate::line::Line;

/// Pick distance in pixels for both line bodies and endpoints
pub const PICK_RADIUS: f32 = 10.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Press { button: Button, x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Release { button: Button, x: f32, y: f32 },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragTarget {
    Line(usize),
    Endpoint(usize, Endpoint),
}

impl DragTarget {
    #[inline]
    pub fn line_index(&self) -> usize {
        match *self {
            DragTarget::Line(idx) | DragTarget::Endpoint(idx, _) => idx,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    Dragging {
        target: DragTarget,
        last: na::Point2<f32>,
        draft: [na::Point2<f32>; 2],
    },
}

/// Canonical line list together with the state of the current drag session
#[derive(Debug, Clone)]
pub struct LineSet {
    lines: Vec<Line>,
    drag: DragState,
}

impl LineSet {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            drag: DragState::Idle,
        }
    }

    /// Committed lines, never showing a drag in progress
    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn dragging(&self) -> Option<DragTarget> {
        match &self.drag {
            DragState::Idle => None,
            DragState::Dragging { target, .. } => Some(*target),
        }
    }

    /// Lines as they should be drawn, with the dragged line at its draft position
    pub fn display_lines(&self) -> Vec<Line> {
        let mut lines = self.lines.clone();

        if let DragState::Dragging { target, draft, .. } = &self.drag {
            if let Some(line) = lines.get_mut(target.line_index()) {
                *line = Line::new(draft[0], draft[1]);
            }
        }

        lines
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press { button, x, y } => {
                self.commit();

                let p = na::Point2::new(x, y);
                let target = match button {
                    Button::Primary => self.pick_body(&p).map(DragTarget::Line),
                    Button::Secondary => self
                        .pick_endpoint(&p)
                        .map(|(idx, end)| DragTarget::Endpoint(idx, end)),
                };

                if let Some(target) = target {
                    let line = &self.lines[target.line_index()];
                    trace!(?target, "drag started");

                    self.drag = DragState::Dragging {
                        target,
                        last: p,
                        draft: [*line.start(), *line.end()],
                    };
                }
            }

            PointerEvent::Move { x, y } => {
                if let DragState::Dragging {
                    target,
                    last,
                    draft,
                } = &mut self.drag
                {
                    let p = na::Point2::new(x, y);
                    let delta = p - *last;

                    match target {
                        DragTarget::Line(_) => {
                            draft[0] += delta;
                            draft[1] += delta;
                        }
                        DragTarget::Endpoint(_, Endpoint::Start) => draft[0] += delta,
                        DragTarget::Endpoint(_, Endpoint::End) => draft[1] += delta,
                    }

                    *last = p;
                }
            }

            PointerEvent::Release { .. } => self.commit(),
        }
    }

    // first line in configuration order wins, both for bodies and endpoints
    fn pick_body(&self, p: &na::Point2<f32>) -> Option<usize> {
        self.lines.iter().position(|line| {
            let to_point = p - line.start();

            geometry::projection_residual(line.vector(), &to_point)
                .map_or(false, |d| d < PICK_RADIUS)
        })
    }

    fn pick_endpoint(&self, p: &na::Point2<f32>) -> Option<(usize, Endpoint)> {
        self.lines.iter().enumerate().find_map(|(idx, line)| {
            if na::distance(line.start(), p) < PICK_RADIUS {
                Some((idx, Endpoint::Start))
            } else if na::distance(line.end(), p) < PICK_RADIUS {
                Some((idx, Endpoint::End))
            } else {
                None
            }
        })
    }

    fn commit(&mut self) {
        if let DragState::Dragging { target, draft, .. } =
            std::mem::replace(&mut self.drag, DragState::Idle)
        {
            if let Some(line) = self.lines.get_mut(target.line_index()) {
                *line = Line::new(draft[0], draft[1]);
                trace!(?target, coords = ?line.coords(), "drag committed");
            }
        }
    }
}

pub(crate) type SharedLines = Arc<Mutex<LineSet>>;

#[inline]
pub(crate) fn lock(lines: &SharedLines) -> MutexGuard<'_, LineSet> {
    lines.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable handle feeding pointer events into the line set of a counter
#[derive(Debug, Clone)]
pub struct LineEditor {
    lines: SharedLines,
}

impl LineEditor {
    pub(crate) fn new(lines: SharedLines) -> Self {
        Self { lines }
    }

    pub fn handle(&self, event: PointerEvent) {
        lock(&self.lines).handle(event);
    }

    pub fn dragging(&self) -> Option<DragTarget> {
        lock(&self.lines).dragging()
    }

    pub fn display_lines(&self) -> Vec<Line> {
        lock(&self.lines).display_lines()
    }
}
