//! Placement and text of the count labels drawn next to every line.
//!
//! Everything here is plain arithmetic on line coordinates and the frame
//! size, the actual drawing lives in `render` behind the `gui` feature.

use crate::counts::{AbsoluteCounts, DirectionCounts, LineCounts, RelativeCounts};
use crate::frame::OverlayStyle;
use crate::line::Line;

/// Distance in pixels between a line start and its label
pub const LABEL_MARGIN: i32 = 3;

/// Which corner of a text box sits on the label anchor
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CornerPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Rows separated by `\n`
    pub text: String,
    pub anchor: (i32, i32),
    pub corner: CornerPosition,
}

/// Colors and widths resolved from the counter settings and the envelope
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnnotationStyle {
    pub line_color: [u8; 3],
    pub text_color: [u8; 3],
    pub line_width: i32,
    pub font_scale: f64,
}

impl AnnotationStyle {
    pub fn resolve(
        overlay: &OverlayStyle,
        color: Option<[u8; 3]>,
        line_width: Option<i32>,
    ) -> Self {
        let line_color = color.unwrap_or_else(|| color_complement(overlay.color));

        Self {
            line_color,
            text_color: deduce_text_color(line_color),
            line_width: line_width.unwrap_or(overlay.line_width),
            font_scale: overlay.font_scale,
        }
    }
}

#[inline]
pub fn color_complement(color: [u8; 3]) -> [u8; 3] {
    color.map(|c| 255 - c)
}

/// Black text on light backgrounds, white on dark ones. Colors are BGR.
pub fn deduce_text_color(background: [u8; 3]) -> [u8; 3] {
    let [b, g, r] = background.map(f32::from);
    let luma = 0.299 * r + 0.587 * g + 0.114 * b;

    if luma > 128.0 {
        [0, 0, 0]
    } else {
        [255, 255, 255]
    }
}

/// Top-left corner of a `size` text box whose `corner` is placed at `anchor`.
pub fn corner_to_top_left(
    anchor: (i32, i32),
    corner: CornerPosition,
    size: (i32, i32),
) -> (i32, i32) {
    let (x, y) = anchor;
    let (w, h) = size;

    match corner {
        CornerPosition::TopLeft => (x, y),
        CornerPosition::TopRight => (x - w, y),
        CornerPosition::BottomLeft => (x, y - h),
        CornerPosition::BottomRight => (x - w, y - h),
    }
}

pub fn absolute_row(counts: &AbsoluteCounts, prefix: &str) -> String {
    format!(
        "{}^({}) v({}) <({}) >({})",
        prefix, counts.top, counts.bottom, counts.left, counts.right
    )
}

fn relative_row(counts: &RelativeCounts, prefix: &str, out: bool) -> String {
    let n = if out {
        counts.out_direction
    } else {
        counts.in_direction
    };

    format!("{}{}", prefix, n)
}

/// Per-class rows in first-seen order followed by a `Total: ` row
fn class_rows(
    counts: &LineCounts,
    row: impl Fn(&DirectionCounts, &str) -> Option<String>,
) -> Vec<String> {
    counts
        .for_class
        .iter()
        .filter_map(|(class, c)| row(c, &format!("{}: ", class)))
        .chain(row(&counts.total, "Total: "))
        .collect()
}

/// Labels to draw for one line: one for absolute counts, `in` and `out`
/// for relative ones.
pub fn layout_labels(
    counts: &LineCounts,
    line: &Line,
    frame_size: (i32, i32),
    per_class: bool,
) -> Vec<Label> {
    let [x1, y1, x2, y2] = line.coords().map(|v| v.round() as i32);
    let (w, h) = frame_size;
    let (cx, cy) = (w / 2, h / 2);
    let m = LABEL_MARGIN;
    let mostly_horizontal = line.is_mostly_horizontal();

    match &counts.total {
        DirectionCounts::Absolute(total) => {
            let (anchor, corner) = if mostly_horizontal {
                if y1 <= cy {
                    ((x1 + m, y1 + m), CornerPosition::TopLeft)
                } else {
                    ((x1 + m, y1 - m), CornerPosition::BottomLeft)
                }
            } else if x1 <= cx {
                ((x1 + m, y1 + m), CornerPosition::TopLeft)
            } else {
                ((x1 - m, y1 + m), CornerPosition::TopRight)
            };

            let text = if per_class {
                class_rows(counts, |c, prefix| {
                    c.as_absolute().map(|c| absolute_row(c, prefix))
                })
                .join("\n")
            } else {
                absolute_row(total, "")
            };

            vec![Label {
                text,
                anchor,
                corner,
            }]
        }

        DirectionCounts::Relative(total) => {
            use CornerPosition::*;

            let (anchor_in, anchor_out, corner_in, corner_out) = if mostly_horizontal {
                if x1 <= x2 {
                    let (ci, co) = match y1.cmp(&y2) {
                        std::cmp::Ordering::Less => (TopRight, BottomLeft),
                        std::cmp::Ordering::Greater => (TopLeft, BottomRight),
                        std::cmp::Ordering::Equal => (TopLeft, BottomLeft),
                    };
                    ((x1 + m, y1 + m), (x1 + m, y1 - m), ci, co)
                } else {
                    let (ci, co) = match y1.cmp(&y2) {
                        std::cmp::Ordering::Less => (BottomRight, TopLeft),
                        std::cmp::Ordering::Greater => (BottomLeft, TopRight),
                        std::cmp::Ordering::Equal => (BottomLeft, TopLeft),
                    };
                    ((x1 + m, y1 - m), (x1 + m, y1 + m), ci, co)
                }
            } else if y1 <= y2 {
                let (ci, co) = match x1.cmp(&x2) {
                    std::cmp::Ordering::Less => (TopRight, BottomLeft),
                    std::cmp::Ordering::Greater => (BottomRight, TopLeft),
                    std::cmp::Ordering::Equal => (TopRight, TopLeft),
                };
                ((x1 - m, y1 + m), (x1 + m, y1 + m), ci, co)
            } else {
                let (ci, co) = match x1.cmp(&x2) {
                    std::cmp::Ordering::Less => (TopLeft, BottomRight),
                    std::cmp::Ordering::Greater => (BottomLeft, TopRight),
                    std::cmp::Ordering::Equal => (BottomLeft, BottomRight),
                };
                ((x1 + m, y1 + m), (x1 - m, y1 + m), ci, co)
            };

            let caption = |out: bool| {
                let rows = if per_class {
                    class_rows(counts, |c, prefix| {
                        c.as_relative().map(|c| relative_row(c, prefix, out))
                    })
                } else {
                    vec![relative_row(total, "", out)]
                };

                format!("{}\n{}", if out { "out" } else { "in" }, rows.join("\n"))
            };

            vec![
                Label {
                    text: caption(false),
                    anchor: anchor_in,
                    corner: corner_in,
                },
                Label {
                    text: caption(true),
                    anchor: anchor_out,
                    corner: corner_out,
                },
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counts::{Crossing, CountingScheme, Horizontal, Relative, Vertical};

    const FRAME: (i32, i32) = (640, 480);

    fn relative_counts(n_in: u64, n_out: u64) -> LineCounts {
        let mut c = LineCounts::new(CountingScheme::Relative);
        for _ in 0..n_in {
            c.record_total(Crossing::Relative(Relative::In));
        }
        for _ in 0..n_out {
            c.record_total(Crossing::Relative(Relative::Out));
        }
        c
    }

    #[test]
    fn absolute_label_on_upper_horizontal_line() {
        let mut c = LineCounts::new(CountingScheme::Absolute);
        c.record_total(Crossing::Absolute {
            horizontal: Horizontal::Right,
            vertical: Vertical::Bottom,
        });

        let line = Line::from_coords([10.0, 100.0, 300.0, 120.0]);
        let labels = layout_labels(&c, &line, FRAME, false);

        assert_eq!(
            labels,
            vec![Label {
                text: "^(0) v(1) <(0) >(1)".into(),
                anchor: (13, 103),
                corner: CornerPosition::TopLeft,
            }]
        );
    }

    #[test]
    fn absolute_label_placement_follows_frame_center() {
        let c = LineCounts::new(CountingScheme::Absolute);

        let line = Line::from_coords([10.0, 400.0, 300.0, 400.0]);
        let lower = layout_labels(&c, &line, FRAME, false);
        assert_eq!(lower[0].anchor, (13, 397));
        assert_eq!(lower[0].corner, CornerPosition::BottomLeft);

        let left = layout_labels(&c, &Line::from_coords([100.0, 10.0, 100.0, 300.0]), FRAME, false);
        assert_eq!(left[0].anchor, (103, 13));
        assert_eq!(left[0].corner, CornerPosition::TopLeft);

        // compared against the horizontal center
        let line = Line::from_coords([500.0, 10.0, 500.0, 300.0]);
        let right = layout_labels(&c, &line, FRAME, false);
        assert_eq!(right[0].anchor, (497, 13));
        assert_eq!(right[0].corner, CornerPosition::TopRight);
    }

    #[test]
    fn absolute_per_class_rows_end_with_total() {
        let mut c = LineCounts::new(CountingScheme::Absolute);
        let crossing = Crossing::Absolute {
            horizontal: Horizontal::Left,
            vertical: Vertical::Top,
        };
        c.record_total(crossing);
        c.record_total(crossing);
        c.record_class("person", crossing);
        c.record_class("car", crossing);

        let line = Line::from_coords([10.0, 100.0, 300.0, 100.0]);
        let labels = layout_labels(&c, &line, FRAME, true);

        assert_eq!(
            labels[0].text,
            "person: ^(1) v(0) <(1) >(0)\ncar: ^(1) v(0) <(1) >(0)\nTotal: ^(2) v(0) <(2) >(0)"
        );
    }

    #[test]
    fn relative_labels_on_left_to_right_horizontal_line() {
        let labels = layout_labels(
            &relative_counts(2, 5),
            &Line::from_coords([0.0, 50.0, 100.0, 50.0]),
            FRAME,
            false,
        );

        assert_eq!(
            labels,
            vec![
                Label {
                    text: "in\n2".into(),
                    anchor: (3, 53),
                    corner: CornerPosition::TopLeft,
                },
                Label {
                    text: "out\n5".into(),
                    anchor: (3, 47),
                    corner: CornerPosition::BottomLeft,
                },
            ]
        );
    }

    #[test]
    fn relative_corner_tables() {
        let c = relative_counts(0, 0);
        let corners = |coords| {
            let l = layout_labels(&c, &Line::from_coords(coords), FRAME, false);
            (l[0].anchor, l[0].corner, l[1].anchor, l[1].corner)
        };
        use CornerPosition::*;

        // mostly horizontal, right to left, going down
        assert_eq!(
            corners([100.0, 50.0, 0.0, 60.0]),
            ((103, 47), BottomRight, (103, 53), TopLeft)
        );
        // mostly horizontal, left to right, going up
        assert_eq!(
            corners([0.0, 60.0, 100.0, 50.0]),
            ((3, 63), TopLeft, (3, 57), BottomRight)
        );
        // mostly vertical, downwards, leaning right
        assert_eq!(
            corners([50.0, 0.0, 60.0, 100.0]),
            ((47, 3), TopRight, (53, 3), BottomLeft)
        );
        // mostly vertical, exactly downwards
        assert_eq!(corners([50.0, 0.0, 50.0, 100.0]), ((47, 3), TopRight, (53, 3), TopLeft));
        // mostly vertical, upwards, leaning left
        assert_eq!(
            corners([60.0, 100.0, 50.0, 0.0]),
            ((63, 103), BottomLeft, (57, 103), TopRight)
        );
        // mostly vertical, exactly upwards
        assert_eq!(
            corners([50.0, 100.0, 50.0, 0.0]),
            ((53, 103), BottomLeft, (47, 103), BottomRight)
        );
    }

    #[test]
    fn relative_per_class_captions() {
        let mut c = relative_counts(1, 1);
        c.record_class("car", Crossing::Relative(Relative::In));
        c.record_class("bus", Crossing::Relative(Relative::Out));

        let labels = layout_labels(&c, &Line::from_coords([0.0, 50.0, 100.0, 50.0]), FRAME, true);

        assert_eq!(labels[0].text, "in\ncar: 1\nbus: 0\nTotal: 1");
        assert_eq!(labels[1].text, "out\ncar: 0\nbus: 1\nTotal: 1");
    }

    #[test]
    fn corners_map_to_top_left() {
        let size = (40, 20);
        assert_eq!(corner_to_top_left((100, 100), CornerPosition::TopLeft, size), (100, 100));
        assert_eq!(corner_to_top_left((100, 100), CornerPosition::TopRight, size), (60, 100));
        assert_eq!(corner_to_top_left((100, 100), CornerPosition::BottomLeft, size), (100, 80));
        assert_eq!(corner_to_top_left((100, 100), CornerPosition::BottomRight, size), (60, 80));
    }

    #[test]
    fn style_resolution() {
        let overlay = OverlayStyle::default();

        let s = AnnotationStyle::resolve(&overlay, None, None);
        assert_eq!(s.line_color, [0, 0, 255]);
        assert_eq!(s.text_color, [255, 255, 255]);
        assert_eq!(s.line_width, 3);

        let s = AnnotationStyle::resolve(&overlay, Some([200, 255, 255]), Some(1));
        assert_eq!(s.line_color, [200, 255, 255]);
        assert_eq!(s.text_color, [0, 0, 0]);
        assert_eq!(s.line_width, 1);
    }
}
