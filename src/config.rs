//! Line counter configuration
//!
//! Loaded from an optional file with env-var overrides.
//! Env format: QCOUNT__KEY (double underscore separator).

use serde_derive::Deserialize;

use crate::error::Error;
use crate::geometry::AnchorPoint;

#[derive(Debug, Clone, Deserialize)]
pub struct LineCounterConfig {
    /// `[x1, y1, x2, y2]` per line; the position in this list identifies the line
    pub lines: Vec<[f32; 4]>,
    #[serde(default)]
    pub anchor_point: AnchorPoint,
    #[serde(default = "default_true")]
    pub whole_trail: bool,
    #[serde(default = "default_true")]
    pub count_first_crossing: bool,
    #[serde(default)]
    pub absolute_directions: bool,
    #[serde(default = "default_true")]
    pub accumulate: bool,
    #[serde(default)]
    pub per_class_display: bool,
    #[serde(default = "default_true")]
    pub show_overlay: bool,
    // BGR
    pub annotation_color: Option<[u8; 3]>,
    pub annotation_line_width: Option<i32>,
    pub window_name: Option<String>,
}

fn default_true() -> bool {
    true
}

impl LineCounterConfig {
    pub fn new(lines: Vec<[f32; 4]>) -> Self {
        Self {
            lines,
            anchor_point: AnchorPoint::default(),
            whole_trail: true,
            count_first_crossing: true,
            absolute_directions: false,
            accumulate: true,
            per_class_display: false,
            show_overlay: true,
            annotation_color: None,
            annotation_line_width: None,
            window_name: None,
        }
    }

    /// Reads `name` (any format known to the `config` crate, extension optional)
    /// layered under `QCOUNT__*` environment variables.
    pub fn load(name: &str) -> Result<Self, Error> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(
                config::Environment::with_prefix("QCOUNT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize::<LineCounterConfig>()?)
    }

    pub fn with_anchor_point(mut self, anchor_point: AnchorPoint) -> Self {
        self.anchor_point = anchor_point;
        self
    }

    pub fn with_whole_trail(mut self, whole_trail: bool) -> Self {
        self.whole_trail = whole_trail;
        self
    }

    pub fn with_count_first_crossing(mut self, count_first_crossing: bool) -> Self {
        self.count_first_crossing = count_first_crossing;
        self
    }

    pub fn with_absolute_directions(mut self, absolute_directions: bool) -> Self {
        self.absolute_directions = absolute_directions;
        self
    }

    pub fn with_accumulate(mut self, accumulate: bool) -> Self {
        self.accumulate = accumulate;
        self
    }

    pub fn with_per_class_display(mut self, per_class_display: bool) -> Self {
        self.per_class_display = per_class_display;
        self
    }

    pub fn with_window_name(mut self, window_name: impl Into<String>) -> Self {
        self.window_name = Some(window_name.into());
        self
    }
}
