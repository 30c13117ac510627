//! OpenCV drawing of counting lines and their labels, plus the mouse hook
//! used to drag lines around in a `highgui` window.

use opencv::{core, highgui, imgproc, prelude::*};
use tracing::info;

use crate::annotate::{self, AnnotationStyle, Label};
use crate::counter::LineCounter;
use crate::editor::{Button, LineEditor, PointerEvent};
use crate::error::Error;
use crate::frame::FrameResult;

const FONT: i32 = imgproc::FONT_HERSHEY_COMPLEX_SMALL;

#[inline]
fn scalar(c: [u8; 3]) -> core::Scalar {
    core::Scalar::new(c[0] as f64, c[1] as f64, c[2] as f64, 0.0)
}

/// Draws lines and counts of the last analyzed frame onto `image`.
pub fn annotate<K>(
    counter: &LineCounter<K>,
    result: &FrameResult<K>,
    image: &mut Mat,
) -> Result<(), Error> {
    let (counts, style) = match (&result.line_counts, counter.annotation_style(&result.overlay)) {
        (Some(counts), Some(style)) => (counts, style),
        _ => return Ok(()),
    };
    let frame_size = (image.cols(), image.rows());

    for (counts, line) in counts.iter().zip(counter.display_lines()) {
        let [x1, y1, x2, y2] = line.coords().map(|v| v.round() as i32);

        imgproc::line(
            image,
            core::Point::new(x1, y1),
            core::Point::new(x2, y2),
            scalar(style.line_color),
            style.line_width,
            imgproc::LINE_8,
            0,
        )?;

        let per_class = counter.per_class_display();
        for label in annotate::layout_labels(counts, &line, frame_size, per_class) {
            put_label(image, &label, &style)?;
        }
    }

    Ok(())
}

fn put_label(image: &mut Mat, label: &Label, style: &AnnotationStyle) -> Result<(), Error> {
    let rows: Vec<&str> = label.text.lines().collect();

    let mut width = 0;
    let mut row_height = 0;
    for row in &rows {
        let mut baseline = 0;
        let size = imgproc::get_text_size(row, FONT, style.font_scale, 1, &mut baseline)?;
        width = width.max(size.width);
        row_height = row_height.max(size.height + baseline);
    }

    let margin = row_height / 4;
    let size = (
        width + 2 * margin,
        rows.len() as i32 * (row_height + margin) + margin,
    );
    let (left, top) = annotate::corner_to_top_left(label.anchor, label.corner, size);

    imgproc::rectangle(
        image,
        core::Rect::new(left, top, size.0, size.1),
        scalar(style.line_color),
        imgproc::FILLED,
        imgproc::LINE_8,
        0,
    )?;

    for (idx, row) in rows.iter().enumerate() {
        let baseline_y = top + (idx as i32 + 1) * (row_height + margin);

        imgproc::put_text(
            image,
            row,
            core::Point::new(left + margin, baseline_y),
            FONT,
            style.font_scale,
            scalar(style.text_color),
            1,
            imgproc::LINE_AA,
            false,
        )?;
    }

    Ok(())
}

fn pointer_event(event: i32, x: i32, y: i32) -> Option<PointerEvent> {
    let (x, y) = (x as f32, y as f32);

    Some(match event {
        highgui::EVENT_LBUTTONDOWN => PointerEvent::Press {
            button: Button::Primary,
            x,
            y,
        },
        highgui::EVENT_RBUTTONDOWN => PointerEvent::Press {
            button: Button::Secondary,
            x,
            y,
        },
        highgui::EVENT_MOUSEMOVE => PointerEvent::Move { x, y },
        highgui::EVENT_LBUTTONUP => PointerEvent::Release {
            button: Button::Primary,
            x,
            y,
        },
        highgui::EVENT_RBUTTONUP => PointerEvent::Release {
            button: Button::Secondary,
            x,
            y,
        },
        _ => return None,
    })
}

/// Routes mouse events of the window `name` to `editor`.
pub fn attach_window(name: &str, editor: LineEditor) -> Result<(), Error> {
    highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
    highgui::set_mouse_callback(
        name,
        Some(Box::new(move |event, x, y, _flags| {
            if let Some(event) = pointer_event(event, x, y) {
                editor.handle(event);
            }
        })),
    )?;

    info!(window = name, "line editor attached");

    Ok(())
}
