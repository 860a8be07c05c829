//! Visual signals derived from the titration state.
//!
//! Nothing here is chemistry: the indicator is a fixed color ramp over a pH
//! window and the beaker fill level is a linear function of added volume.

use std::fmt;

use uom::si::{
    f64::{Ratio, Volume},
    ratio::percent,
    volume::milliliter,
};

use crate::support::constraint::{Constrained, UnitInterval};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: Constrained<f64, UnitInterval>,
}

impl Color {
    fn with_alpha([red, green, blue]: [u8; 3], alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: UnitInterval::saturating(alpha),
        }
    }
}

/// Formats as a CSS `rgba()` value.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.red,
            self.green,
            self.blue,
            self.alpha.as_ref()
        )
    }
}

/// An acid-base indicator with a single color transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    name: &'static str,
    onset_ph: f64,
    full_ph: f64,
    clear: [u8; 3],
    tint: [u8; 3],
    clear_alpha: f64,
    tint_alpha: f64,
}

impl Indicator {
    /// Phenolphthalein: colorless below pH 8.2, pink from pH 10.
    pub const PHENOLPHTHALEIN: Self = Self {
        name: "phenolphthalein",
        onset_ph: 8.2,
        full_ph: 10.0,
        clear: [255, 255, 255],
        tint: [255, 105, 180],
        clear_alpha: 0.4,
        tint_alpha: 0.8,
    };

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// pH at which the color change begins.
    #[must_use]
    pub fn onset_ph(&self) -> f64 {
        self.onset_ph
    }

    /// Color of a solution at the given pH.
    ///
    /// Below the onset the solution is clear; at or above the full-color pH
    /// it is fully tinted. In between, the tint's opacity rises linearly.
    /// NaN is treated as below the onset.
    #[must_use]
    pub fn color(&self, ph: f64) -> Color {
        if ph.is_nan() || ph < self.onset_ph {
            return Color::with_alpha(self.clear, self.clear_alpha);
        }
        if ph >= self.full_ph {
            return Color::with_alpha(self.tint, self.tint_alpha);
        }

        let ratio = (ph - self.onset_ph) / (self.full_ph - self.onset_ph);
        Color::with_alpha(
            self.tint,
            self.clear_alpha + ratio * (self.tint_alpha - self.clear_alpha),
        )
    }
}

/// Fraction of the beaker drawn as filled after `volume_added` of titrant.
///
/// Starts at 30 %, gains 50 % per 150 mL, and is capped at 90 %.
#[must_use]
pub fn liquid_fill_fraction(volume_added: Volume) -> Constrained<Ratio, UnitInterval> {
    const BASE: f64 = 30.0;
    const CAP: f64 = 90.0;
    const GAIN_PER_SCALE: f64 = 50.0;
    const SCALE_ML: f64 = 150.0;

    let level = BASE + volume_added.get::<milliliter>() / SCALE_ML * GAIN_PER_SCALE;
    UnitInterval::saturating(Ratio::new::<percent>(level.min(CAP)))
}
