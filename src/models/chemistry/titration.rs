//! Acid-base titration models.
//!
//! [`TitrationModel`] holds one experiment and its progress. Its
//! [`twine_core::Model`] implementation evaluates the titration curve at a
//! titrant volume without touching the recorded progress.

mod core;

pub use self::core::{
    ACETIC_ACID_KA, AcidSpecies, Color, ConfigField, EQUIVALENCE_TOLERANCE, EndpointConfig,
    EndpointError, Experiment, ExperimentConfig, Indicator, PKW, PhError, Reading, Region, Sample,
    TitrationError, TitrationModel, liquid_fill_fraction,
};

use twine_core::Model;
use uom::si::f64::Volume;

impl Model for TitrationModel {
    type Input = Volume;
    type Output = Sample;
    type Error = PhError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.sample_at(*input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::volume::milliliter;

    #[test]
    fn model_call_evaluates_curve() {
        let model = TitrationModel::new(&ExperimentConfig {
            species: AcidSpecies::ACETIC,
            ..ExperimentConfig::default()
        })
        .unwrap();

        let sample = model.call(&Volume::new::<milliliter>(50.0)).unwrap();

        assert_eq!(sample.region, Region::Equivalence);
        assert_relative_eq!(sample.ph, 8.72, epsilon = 5e-3);
        assert_eq!(model.samples().len(), 1);
    }
}
