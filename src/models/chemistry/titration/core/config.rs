use uom::si::{
    f64::{MolarConcentration, Volume},
    molar_concentration::mole_per_liter,
    volume::milliliter,
};

use crate::support::constraint::{Constrained, StrictlyPositive};

use super::{AcidSpecies, ConfigField, TitrationError};

/// Parameters of a titration experiment, as supplied by the caller.
///
/// Values are unchecked; [`ExperimentConfig::validate`] produces an
/// [`Experiment`] whose parameters are known to be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentConfig {
    /// Acid in the flask.
    pub species: AcidSpecies,

    /// Initial volume of the acid sample.
    pub acid_volume: Volume,

    /// Concentration of the acid sample.
    pub acid_concentration: MolarConcentration,

    /// Concentration of the strong-base titrant.
    pub titrant_concentration: MolarConcentration,
}

impl Default for ExperimentConfig {
    /// 50 mL of 0.1 M hydrochloric acid titrated with 0.1 M base.
    fn default() -> Self {
        Self {
            species: AcidSpecies::HYDROCHLORIC,
            acid_volume: Volume::new::<milliliter>(50.0),
            acid_concentration: MolarConcentration::new::<mole_per_liter>(0.1),
            titrant_concentration: MolarConcentration::new::<mole_per_liter>(0.1),
        }
    }
}

impl ExperimentConfig {
    /// Checks every parameter and returns the validated experiment.
    ///
    /// # Errors
    ///
    /// Returns [`TitrationError::InvalidConfiguration`] naming the first
    /// parameter that is zero, negative, or NaN. A weak acid's `Ka` is
    /// checked as well.
    pub fn validate(&self) -> Result<Experiment, TitrationError> {
        if let Some(ka) = self.species.ka() {
            StrictlyPositive::new(ka)
                .map_err(TitrationError::invalid_config(ConfigField::DissociationConstant))?;
        }

        Ok(Experiment {
            species: self.species,
            acid_volume: StrictlyPositive::new(self.acid_volume)
                .map_err(TitrationError::invalid_config(ConfigField::AcidVolume))?,
            acid_concentration: StrictlyPositive::new(self.acid_concentration)
                .map_err(TitrationError::invalid_config(ConfigField::AcidConcentration))?,
            titrant_concentration: StrictlyPositive::new(self.titrant_concentration)
                .map_err(TitrationError::invalid_config(ConfigField::TitrantConcentration))?,
        })
    }
}

/// A validated titration experiment.
///
/// Immutable for its lifetime; a new configuration means a new experiment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Experiment {
    species: AcidSpecies,
    acid_volume: Constrained<Volume, StrictlyPositive>,
    acid_concentration: Constrained<MolarConcentration, StrictlyPositive>,
    titrant_concentration: Constrained<MolarConcentration, StrictlyPositive>,
}

impl Experiment {
    #[must_use]
    pub fn species(&self) -> AcidSpecies {
        self.species
    }

    #[must_use]
    pub fn acid_volume(&self) -> Volume {
        self.acid_volume.into_inner()
    }

    #[must_use]
    pub fn acid_concentration(&self) -> MolarConcentration {
        self.acid_concentration.into_inner()
    }

    #[must_use]
    pub fn titrant_concentration(&self) -> MolarConcentration {
        self.titrant_concentration.into_inner()
    }

    /// Titrant volume at which moles of base equal moles of acid.
    #[must_use]
    pub fn equivalence_volume(&self) -> Volume {
        let va = self.acid_volume().get::<milliliter>();
        let ca = self.acid_concentration().get::<mole_per_liter>();
        let cb = self.titrant_concentration().get::<mole_per_liter>();
        Volume::new::<milliliter>(va * ca / cb)
    }

    /// Titrant volume at which auto-titration stops.
    ///
    /// Twice the equivalence volume, rounded up to the next multiple of 10 mL
    /// so it lines up with the chart's volume axis.
    #[must_use]
    pub fn stop_bound(&self) -> Volume {
        // Slack keeps unit-conversion noise from bumping an exact multiple up a step.
        const SLACK: f64 = 1e-9;
        let twice = 2.0 * self.equivalence_volume().get::<milliliter>();
        Volume::new::<milliliter>((twice / 10.0 - SLACK).ceil() * 10.0)
    }
}
