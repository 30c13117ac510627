use std::ops::AddAssign;

use indexmap::IndexMap;
use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::geometry::{cross, sign_vector};

/// Crossings counted against the image axes
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AbsoluteCounts {
    pub left: u64,
    pub right: u64,
    pub top: u64,
    pub bottom: u64,
}

impl AddAssign for AbsoluteCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.left += rhs.left;
        self.right += rhs.right;
        self.top += rhs.top;
        self.bottom += rhs.bottom;
    }
}

/// Crossings counted against the orientation of the crossed line
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RelativeCounts {
    pub in_direction: u64,
    pub out_direction: u64,
}

impl AddAssign for RelativeCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.in_direction += rhs.in_direction;
        self.out_direction += rhs.out_direction;
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Vertical {
    Top,
    Bottom,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Relative {
    In,
    Out,
}

/// Classified direction of a single crossing
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Crossing {
    Absolute {
        horizontal: Horizontal,
        vertical: Vertical,
    },
    Relative(Relative),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CountingScheme {
    Absolute,
    Relative,
}

impl CountingScheme {
    #[inline]
    pub fn new(absolute_directions: bool) -> Self {
        if absolute_directions {
            CountingScheme::Absolute
        } else {
            CountingScheme::Relative
        }
    }

    pub fn classify(
        &self,
        trail_vector: &na::Vector2<f32>,
        line_vector: &na::Vector2<f32>,
    ) -> Crossing {
        match self {
            CountingScheme::Absolute => Crossing::Absolute {
                horizontal: if trail_vector.x < 0.0 {
                    Horizontal::Left
                } else {
                    Horizontal::Right
                },
                vertical: if trail_vector.y < 0.0 {
                    Vertical::Top
                } else {
                    Vertical::Bottom
                },
            },
            CountingScheme::Relative => {
                let cp = cross(trail_vector, line_vector);

                let dir = if cp > 0.0 {
                    Relative::Out
                } else if cp < 0.0 {
                    Relative::In
                } else if sign_vector(trail_vector) == sign_vector(line_vector) {
                    Relative::Out
                } else {
                    Relative::In
                };

                Crossing::Relative(dir)
            }
        }
    }

    #[inline]
    pub fn zeroed(&self) -> DirectionCounts {
        match self {
            CountingScheme::Absolute => DirectionCounts::Absolute(Default::default()),
            CountingScheme::Relative => DirectionCounts::Relative(Default::default()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum DirectionCounts {
    Absolute(AbsoluteCounts),
    Relative(RelativeCounts),
}

impl DirectionCounts {
    #[inline]
    pub fn scheme(&self) -> CountingScheme {
        match self {
            DirectionCounts::Absolute(_) => CountingScheme::Absolute,
            DirectionCounts::Relative(_) => CountingScheme::Relative,
        }
    }

    #[inline]
    pub fn as_absolute(&self) -> Option<&AbsoluteCounts> {
        match self {
            DirectionCounts::Absolute(c) => Some(c),
            DirectionCounts::Relative(_) => None,
        }
    }

    #[inline]
    pub fn as_relative(&self) -> Option<&RelativeCounts> {
        match self {
            DirectionCounts::Relative(c) => Some(c),
            DirectionCounts::Absolute(_) => None,
        }
    }

    /// Adds one crossing. Returns `false` if the crossing belongs to the other scheme.
    pub fn record(&mut self, crossing: Crossing) -> bool {
        match (self, crossing) {
            (
                DirectionCounts::Absolute(c),
                Crossing::Absolute {
                    horizontal,
                    vertical,
                },
            ) => {
                match horizontal {
                    Horizontal::Left => c.left += 1,
                    Horizontal::Right => c.right += 1,
                }
                match vertical {
                    Vertical::Top => c.top += 1,
                    Vertical::Bottom => c.bottom += 1,
                }
                true
            }
            (DirectionCounts::Relative(c), Crossing::Relative(dir)) => {
                match dir {
                    Relative::In => c.in_direction += 1,
                    Relative::Out => c.out_direction += 1,
                }
                true
            }
            _ => false,
        }
    }
}

/// Counts for one line: the total over all classes plus optional per-class
/// records, kept in the order classes were first seen
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LineCounts {
    pub total: DirectionCounts,
    #[serde(default)]
    pub for_class: IndexMap<String, DirectionCounts>,
}

impl LineCounts {
    pub fn new(scheme: CountingScheme) -> Self {
        Self {
            total: scheme.zeroed(),
            for_class: IndexMap::new(),
        }
    }

    #[inline]
    pub fn scheme(&self) -> CountingScheme {
        self.total.scheme()
    }

    pub fn record_total(&mut self, crossing: Crossing) -> bool {
        self.total.record(crossing)
    }

    pub fn record_class(&mut self, class: &str, crossing: Crossing) -> bool {
        let scheme = self.scheme();

        self.for_class
            .entry(class.to_string())
            .or_insert_with(|| scheme.zeroed())
            .record(crossing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_classification_uses_strict_negative_test() {
        let s = CountingScheme::Absolute;
        let line = na::Vector2::new(100.0, 0.0);

        assert_eq!(
            s.classify(&na::Vector2::new(0.0, 100.0), &line),
            Crossing::Absolute {
                horizontal: Horizontal::Right,
                vertical: Vertical::Bottom
            }
        );
        assert_eq!(
            s.classify(&na::Vector2::new(-1.0, -1.0), &line),
            Crossing::Absolute {
                horizontal: Horizontal::Left,
                vertical: Vertical::Top
            }
        );
    }

    #[test]
    fn relative_classification_by_cross_product() {
        let s = CountingScheme::Relative;
        let line = na::Vector2::new(100.0, 0.0);

        // y grows downwards: moving down across a left-to-right line is "in"
        assert_eq!(
            s.classify(&na::Vector2::new(0.0, 100.0), &line),
            Crossing::Relative(Relative::In)
        );
        assert_eq!(
            s.classify(&na::Vector2::new(0.0, -100.0), &line),
            Crossing::Relative(Relative::Out)
        );
    }

    #[test]
    fn zero_cross_product_falls_back_to_sign_vectors() {
        let s = CountingScheme::Relative;
        let line = na::Vector2::new(10.0, 0.0);

        assert_eq!(
            s.classify(&na::Vector2::new(5.0, 0.0), &line),
            Crossing::Relative(Relative::Out)
        );
        assert_eq!(
            s.classify(&na::Vector2::new(-5.0, 0.0), &line),
            Crossing::Relative(Relative::In)
        );
        assert_eq!(
            s.classify(&na::Vector2::zeros(), &line),
            Crossing::Relative(Relative::In)
        );
    }

    #[test]
    fn record_rejects_other_scheme() {
        let mut c = CountingScheme::Relative.zeroed();
        assert!(!c.record(Crossing::Absolute {
            horizontal: Horizontal::Left,
            vertical: Vertical::Top
        }));
        assert_eq!(c, CountingScheme::Relative.zeroed());
    }

    #[test]
    fn class_records_are_created_zeroed() {
        let mut lc = LineCounts::new(CountingScheme::Absolute);
        let crossing = Crossing::Absolute {
            horizontal: Horizontal::Left,
            vertical: Vertical::Bottom,
        };

        assert!(lc.record_total(crossing));
        assert!(lc.record_class("car", crossing));
        assert!(lc.record_class("car", crossing));

        let car = lc.for_class["car"].as_absolute().copied().unwrap();
        assert_eq!(
            car,
            AbsoluteCounts {
                left: 2,
                right: 0,
                top: 0,
                bottom: 2
            }
        );
        assert_eq!(lc.total.as_absolute().unwrap().left, 1);
    }

    #[test]
    fn class_records_keep_first_seen_order() {
        let mut lc = LineCounts::new(CountingScheme::Relative);
        for class in ["person", "car", "person", "bus"] {
            lc.record_class(class, Crossing::Relative(Relative::Out));
        }

        let classes: Vec<&str> = lc.for_class.keys().map(String::as_str).collect();
        assert_eq!(classes, ["person", "car", "bus"]);
    }

    #[test]
    fn counts_add_up() {
        let mut a = RelativeCounts {
            in_direction: 1,
            out_direction: 2,
        };
        a += RelativeCounts {
            in_direction: 3,
            out_direction: 4,
        };
        assert_eq!(
            a,
            RelativeCounts {
                in_direction: 4,
                out_direction: 6
            }
        );

        let mut b = AbsoluteCounts::default();
        b += AbsoluteCounts {
            left: 1,
            right: 2,
            top: 3,
            bottom: 4,
        };
        assert_eq!(b.bottom, 4);
    }
}
