//! Color scales and outcome colors
//!
//! A [`ColorScale`] maps a normalized value in `[0, 1]` to an RGB color by
//! piecewise-linear interpolation between evenly spaced anchor colors.

use crate::{ColorError, ColorResult};

/// Anchors of the viridis scale, sampled at nine evenly spaced points.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (0x44, 0x01, 0x54),
    (0x47, 0x2d, 0x7b),
    (0x3b, 0x52, 0x8b),
    (0x2c, 0x72, 0x8e),
    (0x21, 0x91, 0x8c),
    (0x28, 0xae, 0x80),
    (0x5e, 0xc9, 0x62),
    (0xad, 0xdc, 0x30),
    (0xfd, 0xe7, 0x25),
];

const GRAY: [(u8, u8, u8); 2] = [(0, 0, 0), (255, 255, 255)];

/// A continuous color scale over `[0, 1]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColorScale {
    /// Perceptually uniform dark purple to yellow
    #[default]
    Viridis,
    /// Black to white
    Gray,
    /// Caller-supplied anchors, evenly spaced over `[0, 1]`; built with
    /// [`ColorScale::custom`]
    Custom(Anchors),
}

/// At least two anchor colors of a custom scale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchors(Vec<(u8, u8, u8)>);

impl Anchors {
    /// The anchor colors, low end first
    pub fn colors(&self) -> &[(u8, u8, u8)] {
        &self.0
    }
}

impl ColorScale {
    /// Build a custom scale.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidInput`] with fewer than 2 anchors.
    pub fn custom(anchors: Vec<(u8, u8, u8)>) -> ColorResult<Self> {
        if anchors.len() < 2 {
            return Err(ColorError::InvalidInput(format!(
                "a color scale needs at least 2 anchors, got {}",
                anchors.len()
            )));
        }
        Ok(ColorScale::Custom(Anchors(anchors)))
    }

    fn anchors(&self) -> &[(u8, u8, u8)] {
        match self {
            ColorScale::Viridis => &VIRIDIS,
            ColorScale::Gray => &GRAY,
            ColorScale::Custom(a) => a.colors(),
        }
    }

    /// Look up the color at `t`.
    ///
    /// `t` is clamped to `[0, 1]`; NaN maps to the low end.
    pub fn sample(&self, t: f64) -> (u8, u8, u8) {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (anchors.len() - 1) as f64;
        let i = (pos.floor() as usize).min(anchors.len() - 2);
        let f = pos - i as f64;
        let (a, b) = (anchors[i], anchors[i + 1]);
        let lerp = |p: u8, q: u8| (p as f64 + f * (q as f64 - p as f64)).round() as u8;
        (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }
}

/// Per-object outcome categories with their display colors
///
/// The first three describe ground-truth annotation; the last four a
/// classifier's verdict against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeColor {
    /// Gland not demarcated by the annotator
    NotDemarcated,
    /// Gland demarcated by the annotator
    Demarcated,
    /// No annotation value available
    Undefined,
    /// Not demarcated, classified as not demarcated
    TrueNegative,
    /// Not demarcated, classified as demarcated
    FalseNegative,
    /// Demarcated, classified as demarcated
    TruePositive,
    /// Demarcated, classified as not demarcated
    FalsePositive,
}

impl OutcomeColor {
    /// RGB triple for this outcome.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            OutcomeColor::NotDemarcated => (55, 126, 184),
            OutcomeColor::Demarcated => (228, 26, 28),
            OutcomeColor::Undefined => (77, 175, 74),
            OutcomeColor::TrueNegative => (44, 123, 182),
            OutcomeColor::FalseNegative => (171, 217, 233),
            OutcomeColor::TruePositive => (255, 0, 0),
            OutcomeColor::FalsePositive => (255, 255, 0),
        }
    }
}
