//! Acid-base titration of a monoprotic acid with a strong base.
//!
//! A [`TitrationModel`] owns one validated [`Experiment`], the titrant
//! delivered so far, and the curve of [`Sample`]s recorded since the
//! experiment was configured.

mod config;
mod endpoint;
mod error;
mod indicator;
mod ph;
mod sample;
mod species;

pub use config::{Experiment, ExperimentConfig};
pub use endpoint::{EndpointConfig, EndpointError};
pub use error::{ConfigField, PhError, TitrationError};
pub use indicator::{Color, Indicator, liquid_fill_fraction};
pub use ph::{EQUIVALENCE_TOLERANCE, Region};
pub use sample::{Reading, Sample};
pub use species::{ACETIC_ACID_KA, AcidSpecies, PKW};

use tracing::debug;
use uom::si::{
    f64::{Ratio, Volume},
    volume::milliliter,
};

use crate::support::constraint::{Constrained, NonNegative, StrictlyPositive, UnitInterval};

/// Titration chemistry and the progress of one experiment.
#[derive(Debug, Clone)]
pub struct TitrationModel {
    experiment: Experiment,
    volume_added: Constrained<Volume, NonNegative>,
    current: Sample,
    samples: Vec<Sample>,
}

impl TitrationModel {
    /// Creates a model for a new experiment with no titrant added.
    ///
    /// # Errors
    ///
    /// Returns [`TitrationError::InvalidConfiguration`] if a parameter is not
    /// strictly positive, or [`TitrationError::Ph`] if the initial pH cannot
    /// be computed.
    pub fn new(config: &ExperimentConfig) -> Result<Self, TitrationError> {
        let (experiment, initial) = Self::prepare(config)?;
        Ok(Self {
            experiment,
            volume_added: NonNegative::zero(),
            current: initial,
            samples: vec![initial],
        })
    }

    /// Starts a new experiment, discarding all progress.
    ///
    /// The curve is cleared and restarted with the initial sample, which is
    /// also returned. On error the current experiment is left untouched.
    ///
    /// # Errors
    ///
    /// See [`TitrationModel::new`].
    pub fn configure(&mut self, config: &ExperimentConfig) -> Result<Sample, TitrationError> {
        let (experiment, initial) = Self::prepare(config)?;

        debug!(
            species = %experiment.species(),
            equivalence_ml = experiment.equivalence_volume().get::<milliliter>(),
            initial_ph = initial.ph,
            "titration configured"
        );

        self.experiment = experiment;
        self.volume_added = NonNegative::zero();
        self.current = initial;
        self.samples.clear();
        self.samples.push(initial);
        Ok(initial)
    }

    fn prepare(config: &ExperimentConfig) -> Result<(Experiment, Sample), TitrationError> {
        let experiment = config.validate()?;
        let initial = ph::evaluate(&experiment, Volume::new::<milliliter>(0.0))?;
        Ok((experiment, initial))
    }

    /// Computes the pH the mixture would have after `volume_added` of titrant.
    ///
    /// Does not change the model.
    ///
    /// # Errors
    ///
    /// Returns [`PhError`] if the volume falls outside the domain of the
    /// pH formulas (e.g. a negative volume).
    pub fn compute_ph(&self, volume_added: Volume) -> Result<f64, PhError> {
        self.sample_at(volume_added).map(|sample| sample.ph)
    }

    /// Like [`TitrationModel::compute_ph`], but also reports the curve region.
    ///
    /// # Errors
    ///
    /// See [`TitrationModel::compute_ph`].
    pub fn sample_at(&self, volume_added: Volume) -> Result<Sample, PhError> {
        ph::evaluate(&self.experiment, volume_added)
    }

    /// Delivers `amount` of titrant and records the resulting sample.
    ///
    /// # Errors
    ///
    /// Returns [`PhError`] if the new pH cannot be computed, in which case
    /// nothing is recorded and the delivered volume is unchanged.
    pub fn add_titrant(
        &mut self,
        amount: Constrained<Volume, StrictlyPositive>,
    ) -> Result<Sample, PhError> {
        let volume_added = self.volume_added + amount.into();
        let sample = ph::evaluate(&self.experiment, volume_added.into_inner())?;

        self.volume_added = volume_added;
        self.current = sample;
        self.samples.push(sample);
        Ok(sample)
    }

    /// Finds a titrant volume at which the curve reaches `target_ph`.
    ///
    /// The search covers zero to twice the equivalence volume.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] if the target is not reached within that
    /// range or the solver does not converge.
    pub fn volume_at_ph(
        &self,
        target_ph: f64,
        config: EndpointConfig,
    ) -> Result<Sample, EndpointError> {
        endpoint::volume_at_ph(&self.experiment, target_ph, config)
    }

    /// Indicator color at the given pH.
    #[must_use]
    pub fn indicator_color(&self, ph: f64) -> Color {
        Indicator::PHENOLPHTHALEIN.color(ph)
    }

    /// Beaker fill level drawn for the given titrant volume.
    #[must_use]
    pub fn liquid_fill_fraction(&self, volume_added: Volume) -> Constrained<Ratio, UnitInterval> {
        liquid_fill_fraction(volume_added)
    }

    #[must_use]
    pub fn experiment(&self) -> &Experiment {
        &self.experiment
    }

    /// Titrant delivered since the experiment was configured.
    #[must_use]
    pub fn volume_added(&self) -> Volume {
        self.volume_added.into_inner()
    }

    /// Most recently recorded sample.
    #[must_use]
    pub fn current(&self) -> Sample {
        self.current
    }

    /// Recorded curve, in the order the samples were taken.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Current sample with its indicator color and fill level.
    #[must_use]
    pub fn reading(&self) -> Reading {
        Reading {
            sample: self.current,
            color: self.indicator_color(self.current.ph),
            fill: self.liquid_fill_fraction(self.current.volume_added),
        }
    }
}
