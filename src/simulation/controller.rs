use tracing::{debug, trace, warn};
use uom::si::{f64::Volume, volume::milliliter};

use crate::{
    models::chemistry::titration::{
        Color, ExperimentConfig, Reading, Sample, TitrationError, TitrationModel,
    },
    support::constraint::{Constrained, StrictlyPositive},
};

use super::AutoRunConfig;

/// Whether auto-titration is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Outcome of one auto-titration tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Auto-titration is not running; nothing happened.
    Idle,

    /// Titrant was added and a sample recorded.
    Advanced(Sample),

    /// The stop bound was reached and auto-titration stopped.
    Finished {
        /// Titrant delivered when the run stopped.
        volume_added: Volume,
    },
}

/// Auto-titration bookkeeping for the current experiment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoRunState {
    running: bool,
    step: Constrained<Volume, StrictlyPositive>,
    stop_bound: Volume,
}

impl AutoRunState {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Titrant added per auto-titration tick.
    #[must_use]
    pub fn step(&self) -> Volume {
        self.step.into_inner()
    }

    /// Delivered volume at which auto-titration stops.
    #[must_use]
    pub fn stop_bound(&self) -> Volume {
        self.stop_bound
    }
}

/// Drives a [`TitrationModel`] by manual steps or auto-titration ticks.
///
/// The controller is synchronous; each call to [`SimulationController::tick`]
/// performs one auto-titration advancement. [`super::AutoTitrator`] calls it
/// on a timer.
#[derive(Debug, Clone)]
pub struct SimulationController {
    model: TitrationModel,
    auto: AutoRunState,
}

impl SimulationController {
    /// Creates an idle controller for a new experiment.
    ///
    /// # Errors
    ///
    /// Returns [`TitrationError`] if the configuration is invalid.
    pub fn new(config: &ExperimentConfig) -> Result<Self, TitrationError> {
        let model = TitrationModel::new(config)?;
        let stop_bound = model.experiment().stop_bound();
        Ok(Self {
            model,
            auto: AutoRunState {
                running: false,
                step: AutoRunConfig::default().validated_step()?,
                stop_bound,
            },
        })
    }

    /// Adds `amount` of titrant and records the resulting sample.
    ///
    /// Valid whether or not auto-titration is running. No upper bound is
    /// enforced; manual steps may go past the stop bound.
    ///
    /// # Errors
    ///
    /// - [`TitrationError::InvalidArgument`] if `amount` is not strictly positive.
    /// - [`TitrationError::Ph`] if the new pH cannot be computed.
    pub fn step(&mut self, amount: Volume) -> Result<Sample, TitrationError> {
        let amount = StrictlyPositive::new(amount)
            .map_err(|source| TitrationError::InvalidArgument { source })?;
        self.advance(amount)
    }

    fn advance(
        &mut self,
        amount: Constrained<Volume, StrictlyPositive>,
    ) -> Result<Sample, TitrationError> {
        let sample = self.model.add_titrant(amount)?;
        trace!(
            volume_ml = sample.volume_added.get::<milliliter>(),
            ph = sample.ph,
            region = %sample.region,
            "titrant added"
        );
        Ok(sample)
    }

    /// Begins auto-titration with the given step size.
    ///
    /// Returns `false` without changing anything if already running.
    ///
    /// # Errors
    ///
    /// Returns [`TitrationError::InvalidArgument`] if `step` is not strictly positive.
    pub fn start_auto(&mut self, step: Volume) -> Result<bool, TitrationError> {
        if self.auto.running {
            return Ok(false);
        }

        self.auto.step = StrictlyPositive::new(step)
            .map_err(|source| TitrationError::InvalidArgument { source })?;
        self.auto.running = true;

        debug!(
            step_ml = step.get::<milliliter>(),
            stop_bound_ml = self.auto.stop_bound.get::<milliliter>(),
            "auto-titration started"
        );
        Ok(true)
    }

    /// Stops auto-titration. Returns whether it was running.
    pub fn stop_auto(&mut self) -> bool {
        let was_running = self.auto.running;
        self.auto.running = false;
        if was_running {
            debug!(
                volume_ml = self.model.volume_added().get::<milliliter>(),
                "auto-titration stopped"
            );
        }
        was_running
    }

    /// Performs one auto-titration advancement.
    ///
    /// Stops the run once the delivered volume reaches the stop bound.
    ///
    /// # Errors
    ///
    /// Returns [`TitrationError`] if the step fails; the run is stopped and
    /// the model keeps its last consistent state.
    pub fn tick(&mut self) -> Result<Tick, TitrationError> {
        if !self.auto.running {
            return Ok(Tick::Idle);
        }

        let volume_added = self.model.volume_added();
        if volume_added >= self.auto.stop_bound {
            self.auto.running = false;
            debug!(
                volume_ml = volume_added.get::<milliliter>(),
                "auto-titration finished"
            );
            return Ok(Tick::Finished { volume_added });
        }

        match self.advance(self.auto.step) {
            Ok(sample) => Ok(Tick::Advanced(sample)),
            Err(err) => {
                self.auto.running = false;
                warn!(error = %err, "auto-titration step failed");
                Err(err)
            }
        }
    }

    /// Stops auto-titration and starts a new experiment.
    ///
    /// Returns the initial sample of the new experiment.
    ///
    /// # Errors
    ///
    /// Returns [`TitrationError`] if the configuration is invalid, in which
    /// case the previous experiment is kept (but auto-titration stays stopped).
    pub fn reset(&mut self, config: &ExperimentConfig) -> Result<Sample, TitrationError> {
        self.stop_auto();
        let initial = self.model.configure(config)?;
        self.auto.stop_bound = self.model.experiment().stop_bound();
        debug!(
            stop_bound_ml = self.auto.stop_bound.get::<milliliter>(),
            "experiment reset"
        );
        Ok(initial)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.auto.running
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        if self.auto.running {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    #[must_use]
    pub fn auto_run(&self) -> &AutoRunState {
        &self.auto
    }

    #[must_use]
    pub fn current_volume_added(&self) -> Volume {
        self.model.volume_added()
    }

    #[must_use]
    pub fn current_ph(&self) -> f64 {
        self.model.current().ph
    }

    /// Recorded curve, oldest first.
    #[must_use]
    pub fn sample_history(&self) -> &[Sample] {
        self.model.samples()
    }

    #[must_use]
    pub fn indicator_color_at(&self, ph: f64) -> Color {
        self.model.indicator_color(ph)
    }

    #[must_use]
    pub fn stop_bound(&self) -> Volume {
        self.auto.stop_bound
    }

    #[must_use]
    pub fn reading(&self) -> Reading {
        self.model.reading()
    }

    #[must_use]
    pub fn model(&self) -> &TitrationModel {
        &self.model
    }
}
