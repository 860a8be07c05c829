//! Piecewise pH of an acid sample partially neutralised by a strong base.
//!
//! The curve is split into regions, each with its own closed-form
//! approximation. Moles of acid and base are compared with an absolute
//! tolerance of [`EQUIVALENCE_TOLERANCE`] so that volumes accumulated by
//! repeated floating-point steps still land on the equivalence point.

use std::fmt;

use uom::si::{
    amount_of_substance::mole,
    f64::{AmountOfSubstance, MolarConcentration, Volume},
    molar_concentration::mole_per_liter,
    volume::liter,
};

use super::{AcidSpecies, Experiment, PKW, PhError, Sample};

/// Moles of acid and base closer than this are treated as equivalent.
pub const EQUIVALENCE_TOLERANCE: f64 = 1e-9;

/// Region of the titration curve a pH value was computed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// No titrant added yet.
    Initial,

    /// Strong acid in excess of the added base.
    ExcessAcid,

    /// Weak acid and its conjugate base coexist.
    Buffer,

    /// Moles of base equal moles of acid.
    Equivalence,

    /// Strong base in excess of the acid.
    ExcessBase,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initial => "initial",
            Self::ExcessAcid => "excess acid",
            Self::Buffer => "buffer",
            Self::Equivalence => "equivalence",
            Self::ExcessBase => "excess base",
        };
        f.write_str(name)
    }
}

/// Computes the pH after `added` titrant has been delivered.
///
/// Pure function of the experiment and the argument.
///
/// # Errors
///
/// - [`PhError::NonPositiveConcentration`] if a logarithm operand is not
///   strictly positive (e.g. a negative `added` volume).
/// - [`PhError::UnsupportedSpecies`] for a weak acid whose `Ka` is not a
///   strictly positive finite number.
pub(super) fn evaluate(experiment: &Experiment, added: Volume) -> Result<Sample, PhError> {
    let mixture = Mixture::new(experiment, added);

    let (ph, region) = match experiment.species() {
        AcidSpecies::Strong => mixture.strong()?,
        AcidSpecies::Weak { ka } => mixture.weak(ka, experiment.acid_concentration())?,
    };

    Ok(Sample {
        volume_added: added,
        ph,
        region,
    })
}

/// Mole balance of the flask after some titrant has been added.
struct Mixture {
    acid: AmountOfSubstance,
    base: AmountOfSubstance,
    total_volume: Volume,
    no_titrant: bool,
}

impl Mixture {
    fn new(experiment: &Experiment, added: Volume) -> Self {
        let acid_volume = experiment.acid_volume();
        Self {
            acid: moles(acid_volume, experiment.acid_concentration()),
            base: moles(added, experiment.titrant_concentration()),
            total_volume: acid_volume + added,
            no_titrant: added.get::<liter>() == 0.0,
        }
    }

    fn at_equivalence(&self) -> bool {
        (self.base - self.acid).abs() < AmountOfSubstance::new::<mole>(EQUIVALENCE_TOLERANCE)
    }

    fn strong(&self) -> Result<(f64, Region), PhError> {
        if self.at_equivalence() {
            return Ok((PKW / 2.0, Region::Equivalence));
        }

        if self.acid > self.base {
            let region = if self.no_titrant {
                Region::Initial
            } else {
                Region::ExcessAcid
            };
            let h = concentration(self.acid - self.base, self.total_volume);
            Ok((-log10(h.get::<mole_per_liter>(), region)?, region))
        } else {
            self.excess_base()
        }
    }

    fn weak(
        &self,
        ka: f64,
        acid_concentration: MolarConcentration,
    ) -> Result<(f64, Region), PhError> {
        if !(ka > 0.0 && ka.is_finite()) {
            return Err(PhError::UnsupportedSpecies { ka });
        }
        let pka = -ka.log10();

        if self.no_titrant {
            let ca = log10(acid_concentration.get::<mole_per_liter>(), Region::Initial)?;
            return Ok((0.5 * (pka - ca), Region::Initial));
        }

        if self.at_equivalence() {
            // Hydrolysis of the conjugate base.
            let pkb = PKW - pka;
            let salt = concentration(self.acid, self.total_volume);
            let poh = 0.5 * (pkb - log10(salt.get::<mole_per_liter>(), Region::Equivalence)?);
            return Ok((PKW - poh, Region::Equivalence));
        }

        if self.base < self.acid {
            // Henderson-Hasselbalch with [A-] = base added, [HA] = acid left.
            let ratio = self.base.get::<mole>() / (self.acid - self.base).get::<mole>();
            return Ok((pka + log10(ratio, Region::Buffer)?, Region::Buffer));
        }

        // Residual weak-acid equilibrium is ignored past equivalence.
        self.excess_base()
    }

    fn excess_base(&self) -> Result<(f64, Region), PhError> {
        let oh = concentration(self.base - self.acid, self.total_volume);
        Ok((
            PKW + log10(oh.get::<mole_per_liter>(), Region::ExcessBase)?,
            Region::ExcessBase,
        ))
    }
}

fn moles(volume: Volume, concentration: MolarConcentration) -> AmountOfSubstance {
    AmountOfSubstance::new::<mole>(volume.get::<liter>() * concentration.get::<mole_per_liter>())
}

fn concentration(amount: AmountOfSubstance, volume: Volume) -> MolarConcentration {
    MolarConcentration::new::<mole_per_liter>(amount.get::<mole>() / volume.get::<liter>())
}

fn log10(value: f64, region: Region) -> Result<f64, PhError> {
    if value > 0.0 {
        Ok(value.log10())
    } else {
        Err(PhError::NonPositiveConcentration { region, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::volume::milliliter;

    use crate::models::chemistry::titration::core::ExperimentConfig;

    fn experiment(species: AcidSpecies) -> Experiment {
        ExperimentConfig {
            species,
            ..ExperimentConfig::default()
        }
        .validate()
        .unwrap()
    }

    fn ml(value: f64) -> Volume {
        Volume::new::<milliliter>(value)
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn strong_acid_curve() {
        let hcl = experiment(AcidSpecies::HYDROCHLORIC);

        let start = evaluate(&hcl, ml(0.0)).unwrap();
        assert_relative_eq!(start.ph, 1.0, epsilon = 1e-9);
        assert_eq!(start.region, Region::Initial);

        let before = evaluate(&hcl, ml(25.0)).unwrap();
        assert_eq!(before.region, Region::ExcessAcid);
        // 2.5 mmol H+ left in 75 mL.
        assert_relative_eq!(before.ph, -(2.5e-3_f64 / 0.075).log10(), epsilon = 1e-9);

        let equivalence = evaluate(&hcl, ml(50.0)).unwrap();
        assert_eq!(equivalence.ph, 7.0);
        assert_eq!(equivalence.region, Region::Equivalence);

        let after = evaluate(&hcl, ml(100.0)).unwrap();
        assert_eq!(after.region, Region::ExcessBase);
        assert_relative_eq!(after.ph, 14.0 + (5.0_f64 / 150.0).log10(), epsilon = 1e-9);
        assert_relative_eq!(after.ph, 12.52, epsilon = 5e-3);
    }

    #[test]
    fn strong_acid_initial_ph_is_negative_log_concentration() {
        for ca in [0.001, 0.05, 0.1, 0.5, 1.0] {
            let config = ExperimentConfig {
                acid_concentration: MolarConcentration::new::<mole_per_liter>(ca),
                ..ExperimentConfig::default()
            };
            let sample = evaluate(&config.validate().unwrap(), ml(0.0)).unwrap();
            assert_relative_eq!(sample.ph, -ca.log10(), epsilon = 1e-9);
        }
    }

    #[test]
    fn strong_acid_curve_is_monotone() {
        let hcl = experiment(AcidSpecies::HYDROCHLORIC);

        let mut previous = f64::NEG_INFINITY;
        for step in 0..=300 {
            let ph = evaluate(&hcl, ml(f64::from(step) * 0.5)).unwrap().ph;
            assert!(ph >= previous, "pH dropped at step {step}: {ph} < {previous}");
            previous = ph;
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn accumulated_steps_hit_equivalence() {
        let hcl = experiment(AcidSpecies::HYDROCHLORIC);

        let added = (0..500).fold(ml(0.0), |acc, _| acc + ml(0.1));
        let sample = evaluate(&hcl, added).unwrap();

        assert_eq!(sample.region, Region::Equivalence);
        assert_eq!(sample.ph, 7.0);
    }

    #[test]
    fn weak_acid_curve() {
        let acetic = experiment(AcidSpecies::ACETIC);
        let pka = AcidSpecies::ACETIC.pka().unwrap();

        let start = evaluate(&acetic, ml(0.0)).unwrap();
        assert_eq!(start.region, Region::Initial);
        assert_relative_eq!(start.ph, 0.5 * (pka + 1.0), epsilon = 1e-9);
        assert_relative_eq!(start.ph, 2.87, epsilon = 5e-3);

        let half = evaluate(&acetic, ml(25.0)).unwrap();
        assert_eq!(half.region, Region::Buffer);
        assert_relative_eq!(half.ph, pka, epsilon = 1e-9);
        assert_relative_eq!(half.ph, 4.74, epsilon = 5e-3);

        let equivalence = evaluate(&acetic, ml(50.0)).unwrap();
        assert_eq!(equivalence.region, Region::Equivalence);
        assert_relative_eq!(equivalence.ph, 8.72, epsilon = 5e-3);

        let after = evaluate(&acetic, ml(100.0)).unwrap();
        assert_eq!(after.region, Region::ExcessBase);
        assert_relative_eq!(after.ph, 14.0 + (5.0_f64 / 150.0).log10(), epsilon = 1e-9);
    }

    #[test]
    fn weak_acid_buffer_rises_toward_equivalence() {
        let acetic = experiment(AcidSpecies::ACETIC);
        let equivalence = evaluate(&acetic, ml(50.0)).unwrap().ph;

        let mut previous = f64::NEG_INFINITY;
        for added in [1.0, 10.0, 25.0, 40.0, 49.0, 49.9, 49.99] {
            let sample = evaluate(&acetic, ml(added)).unwrap();
            assert_eq!(sample.region, Region::Buffer);
            assert!(sample.ph.is_finite());
            assert!(sample.ph > previous);
            previous = sample.ph;
        }

        // Just before equivalence the buffer branch sits within a couple of pH
        // units of the hydrolysis value.
        let near = evaluate(&acetic, ml(49.99)).unwrap().ph;
        assert!((near - equivalence).abs() < 2.0, "{near} vs {equivalence}");
    }

    #[test]
    fn weak_acid_tolerance_window_wins_over_buffer() {
        let acetic = experiment(AcidSpecies::ACETIC);
        let equivalence = evaluate(&acetic, ml(50.0)).unwrap().ph;

        // 5e-6 mL short of equivalence leaves 5e-10 mol of acid, inside the window.
        let short = evaluate(&acetic, ml(50.0 - 5e-6)).unwrap();
        assert_eq!(short.region, Region::Equivalence);
        assert_relative_eq!(short.ph, equivalence, epsilon = 1e-6);

        // Fine steps accumulate float error but still land on equivalence.
        let stepped = (0..500).fold(0.0, |total, _| total + 0.1);
        let sample = evaluate(&acetic, ml(stepped)).unwrap();
        assert_eq!(sample.region, Region::Equivalence);
        assert!(sample.ph.is_finite() && sample.ph < 9.0, "{}", sample.ph);
    }

    #[test]
    fn negative_volume_is_rejected() {
        let acetic = experiment(AcidSpecies::ACETIC);
        assert!(matches!(
            evaluate(&acetic, ml(-1.0)),
            Err(PhError::NonPositiveConcentration {
                region: Region::Buffer,
                ..
            })
        ));

        let hcl = experiment(AcidSpecies::HYDROCHLORIC);
        assert!(matches!(
            evaluate(&hcl, ml(-100.0)),
            Err(PhError::NonPositiveConcentration { .. })
        ));
    }

    #[test]
    fn unusable_ka_is_unsupported() {
        let config = ExperimentConfig {
            species: AcidSpecies::Weak { ka: f64::INFINITY },
            ..ExperimentConfig::default()
        };
        let experiment = config.validate().unwrap();
        assert!(matches!(
            evaluate(&experiment, ml(10.0)),
            Err(PhError::UnsupportedSpecies { .. })
        ));
    }
}
