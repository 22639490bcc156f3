use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::models::countdown::TimeUnit;
use crate::models::settings::CountdownSettings;

/// Ring radius used at or below `max_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub max_width: u32,
    pub radius: f64,
}

/// Stroke attributes of one progress ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingStroke {
    pub dash_array: f64,
    pub dash_offset: f64,
}

/// Maps viewport widths to ring sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsiveLayout {
    breakpoints: Vec<Breakpoint>,
    default_radius: f64,
}

impl Default for ResponsiveLayout {
    fn default() -> Self {
        Self::new(
            vec![
                Breakpoint {
                    max_width: 480,
                    radius: 34.0,
                },
                Breakpoint {
                    max_width: 768,
                    radius: 44.0,
                },
            ],
            54.0,
        )
    }
}

impl ResponsiveLayout {
    pub fn new(mut breakpoints: Vec<Breakpoint>, default_radius: f64) -> Self {
        breakpoints.sort_by_key(|bp| bp.max_width);
        Self {
            breakpoints,
            default_radius,
        }
    }

    pub fn from_settings(settings: &CountdownSettings) -> Self {
        Self::new(
            settings
                .breakpoints
                .iter()
                .map(|bp| Breakpoint {
                    max_width: bp.max_width,
                    radius: bp.radius,
                })
                .collect(),
            settings.default_radius,
        )
    }

    /// Index of the bucket `width` falls into; the default bucket is last.
    pub fn bucket_for(&self, width: u32) -> usize {
        self.breakpoints
            .iter()
            .position(|bp| width <= bp.max_width)
            .unwrap_or(self.breakpoints.len())
    }

    pub fn radius_for(&self, width: u32) -> f64 {
        self.breakpoints
            .get(self.bucket_for(width))
            .map(|bp| bp.radius)
            .unwrap_or(self.default_radius)
    }

    pub fn circumference_for(&self, width: u32) -> f64 {
        circumference(self.radius_for(width))
    }
}

pub fn circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

/// Fraction of the ring to fill for `value`, in `[0, 1]`.
///
/// Days are taken modulo 365 against a fixed 365-day year.
pub fn progress_ratio(unit: TimeUnit, value: u64) -> f64 {
    let max = unit.progress_max();
    let value = match unit {
        TimeUnit::Days => value % max,
        _ => value,
    };
    (1.0 - value as f64 / max as f64).clamp(0.0, 1.0)
}

pub fn stroke_for(circumference: f64, ratio: f64) -> RingStroke {
    let ratio = ratio.clamp(0.0, 1.0);
    RingStroke {
        dash_array: circumference,
        dash_offset: circumference * (1.0 - ratio),
    }
}

/// An empty ring, drawn before the first tick and after a resize.
pub fn reset_stroke(circumference: f64) -> RingStroke {
    RingStroke {
        dash_array: circumference,
        dash_offset: circumference,
    }
}
