use std::fmt;

use uom::si::{
    f64::{Ratio, Volume},
    volume::milliliter,
};

use crate::support::constraint::{Constrained, UnitInterval};

use super::{Color, Region};

/// A point on the titration curve.
///
/// The pH is reported as computed and is not clamped to `0..=14`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Total titrant delivered when the sample was taken.
    pub volume_added: Volume,

    /// pH of the mixture.
    pub ph: f64,

    /// Curve region the pH was computed in.
    pub region: Region,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pH {:.2} at {:.2} mL",
            self.ph,
            self.volume_added.get::<milliliter>()
        )
    }
}

/// A sample together with the visual state derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub sample: Sample,

    /// Indicator color of the mixture at the sample's pH.
    pub color: Color,

    /// How full the beaker is drawn.
    pub fill: Constrained<Ratio, UnitInterval>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_two_decimals() {
        let sample = Sample {
            volume_added: Volume::new::<milliliter>(12.5),
            ph: 4.744_727,
            region: Region::Buffer,
        };
        assert_eq!(sample.to_string(), "pH 4.74 at 12.50 mL");
    }
}
