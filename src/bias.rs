//! Editorial bias mapping.
//!
//! Converts a bias score in [-1, 1] into a label, a colour and a slider
//! position. Buckets are an ordered threshold table, first match wins.

use ratatui::style::Color;

/// Upper bound of a bias bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Score strictly below the value
    Below(f64),
    /// Score at or below the value
    AtMost(f64),
    /// Catch-all for the last bucket
    Any,
}

impl Bound {
    fn admits(self, score: f64) -> bool {
        match self {
            Bound::Below(limit) => score < limit,
            Bound::AtMost(limit) => score <= limit,
            Bound::Any => true,
        }
    }
}

/// One bucket on the left–right spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasBucket {
    pub bound: Bound,
    pub label: &'static str,
    pub color: Color,
}

/// Buckets ordered from left to right.
///
/// -0.15 and 0.15 both fall in "Centre".
pub const BIAS_BUCKETS: [BiasBucket; 5] = [
    BiasBucket {
        bound: Bound::Below(-0.4),
        label: "Left",
        color: Color::Rgb(59, 130, 246),
    },
    BiasBucket {
        bound: Bound::Below(-0.15),
        label: "Centre-left",
        color: Color::Rgb(147, 197, 253),
    },
    BiasBucket {
        bound: Bound::AtMost(0.15),
        label: "Centre",
        color: Color::Rgb(161, 161, 170),
    },
    BiasBucket {
        bound: Bound::AtMost(0.4),
        label: "Centre-right",
        color: Color::Rgb(252, 165, 165),
    },
    BiasBucket {
        bound: Bound::Any,
        label: "Right",
        color: Color::Rgb(239, 68, 68),
    },
];

/// Find the bucket a score falls into.
///
/// Scores outside [-1, 1] are not clamped; NaN lands in the last bucket.
pub fn bias_bucket(score: f64) -> &'static BiasBucket {
    BIAS_BUCKETS
        .iter()
        .find(|bucket| bucket.bound.admits(score))
        .unwrap_or(&BIAS_BUCKETS[BIAS_BUCKETS.len() - 1])
}

/// Human-readable bias label (e.g. "Centre-left").
pub fn bias_label(score: f64) -> &'static str {
    bias_bucket(score).label
}

/// Marker colour for a bias score.
pub fn bias_color(score: f64) -> Color {
    bias_bucket(score).color
}

/// Map a bias score onto a 0–100 percentage.
///
/// # Arguments
/// * `score` - Bias score, nominally in [-1, 1]
///
/// # Returns
/// * `f64` - `(score + 1) * 50` clamped to [0, 100]; NaN maps to the centre
pub fn bias_position(score: f64) -> f64 {
    if score.is_nan() {
        return 50.0;
    }
    ((score + 1.0) * 50.0).clamp(0.0, 100.0)
}

/// Top offset of the slider marker as a percentage of the track.
///
/// The track is vertical with right at the top.
pub fn slider_offset(score: f64) -> f64 {
    100.0 - bias_position(score)
}

/// Row of the slider marker on a vertical track.
///
/// # Arguments
/// * `score` - Bias score
/// * `height` - Track height in terminal rows
///
/// # Returns
/// * `Option<u16>` - Marker row counted from the top, or None for an empty track
pub fn slider_row(score: f64, height: u16) -> Option<u16> {
    if height == 0 {
        return None;
    }
    let span = f64::from(height - 1);
    Some((slider_offset(score) / 100.0 * span).round() as u16)
}
