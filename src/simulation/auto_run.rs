//! Timed auto-titration on a Tokio runtime.
//!
//! [`AutoTitrator`] shares a [`SimulationController`] between the caller and
//! a background task that calls [`SimulationController::tick`] once per
//! [`AutoRunConfig::tick_interval`].
//!
//! Every start, stop and reset advances a run epoch under the same lock the
//! task takes before ticking. A task whose epoch is stale exits without
//! touching the controller, so once [`AutoTitrator::stop`] or
//! [`AutoTitrator::reset`] returns no further titrant is added.

mod config;

pub use config::{AutoRunConfig, COARSE_STEP_ML, FINE_STEP_ML};

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{
    runtime::Handle,
    sync::broadcast,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, warn};
use uom::si::{f64::Volume, volume::milliliter};

use crate::models::chemistry::titration::{ExperimentConfig, Sample, TitrationError};

use super::{SimulationController, Tick, TitrationEvent};

const EVENT_CAPACITY: usize = 1024;

struct Shared {
    controller: SimulationController,
    epoch: u64,
}

/// Runs a [`SimulationController`] on a timer.
pub struct AutoTitrator {
    shared: Arc<Mutex<Shared>>,
    task: Mutex<Option<JoinHandle<()>>>,
    events: broadcast::Sender<TitrationEvent>,
}

impl AutoTitrator {
    #[must_use]
    pub fn new(controller: SimulationController) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Mutex::new(Shared {
                controller,
                epoch: 0,
            })),
            task: Mutex::new(None),
            events,
        }
    }

    /// Subscribes to titration events.
    ///
    /// Events published before subscribing are not replayed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TitrationEvent> {
        self.events.subscribe()
    }

    /// Starts auto-titration.
    ///
    /// Returns `false` without changing anything if a run is already in
    /// progress. The first tick fires one interval after this call.
    ///
    /// # Errors
    ///
    /// Returns [`TitrationError::InvalidArgument`] if the configured step is
    /// not strictly positive or the tick interval is zero. Nothing changes
    /// on error.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime, before any state changes.
    pub fn start(&self, config: AutoRunConfig) -> Result<bool, TitrationError> {
        let runtime = Handle::current();
        let interval = config.validated_interval()?;

        let mut task = lock(&self.task);

        let epoch = {
            let mut shared = lock(&self.shared);
            if !shared.controller.start_auto(config.step)? {
                return Ok(false);
            }
            shared.epoch += 1;
            shared.epoch
        };

        debug!(
            epoch,
            interval_ms = interval.as_millis(),
            "spawning auto-titration task"
        );

        let handle = runtime.spawn(run(
            Arc::clone(&self.shared),
            self.events.clone(),
            epoch,
            interval,
        ));
        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }
        Ok(true)
    }

    /// Stops auto-titration. Returns whether a run was in progress.
    ///
    /// No titrant is added by the timer after this returns.
    pub fn stop(&self) -> bool {
        let mut task = lock(&self.task);
        let was_running = {
            let mut shared = lock(&self.shared);
            shared.epoch += 1;
            shared.controller.stop_auto()
        };
        if let Some(handle) = task.take() {
            handle.abort();
        }
        was_running
    }

    /// Stops any run and starts a new experiment.
    ///
    /// Publishes [`TitrationEvent::Reset`] on success.
    ///
    /// # Errors
    ///
    /// Returns [`TitrationError`] if the configuration is invalid; the
    /// previous experiment is kept, stopped.
    pub fn reset(&self, config: &ExperimentConfig) -> Result<Sample, TitrationError> {
        let mut task = lock(&self.task);
        let (initial, reading) = {
            let mut shared = lock(&self.shared);
            shared.epoch += 1;
            let initial = shared.controller.reset(config)?;
            (initial, shared.controller.reading())
        };
        if let Some(handle) = task.take() {
            handle.abort();
        }
        let _ = self.events.send(TitrationEvent::Reset(reading));
        Ok(initial)
    }

    /// Adds titrant manually and publishes [`TitrationEvent::Advanced`].
    ///
    /// Does not affect a run in progress.
    ///
    /// # Errors
    ///
    /// See [`SimulationController::step`].
    pub fn step(&self, amount: Volume) -> Result<Sample, TitrationError> {
        let (sample, reading) = {
            let mut shared = lock(&self.shared);
            let sample = shared.controller.step(amount)?;
            (sample, shared.controller.reading())
        };
        let _ = self.events.send(TitrationEvent::Advanced(reading));
        Ok(sample)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        lock(&self.shared).controller.is_running()
    }

    /// Runs `f` with read access to the controller.
    ///
    /// The timer is held off while `f` runs, so keep it short.
    pub fn with_controller<R>(&self, f: impl FnOnce(&SimulationController) -> R) -> R {
        f(&lock(&self.shared).controller)
    }
}

impl Drop for AutoTitrator {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.task).take() {
            handle.abort();
        }
    }
}

async fn run(
    shared: Arc<Mutex<Shared>>,
    events: broadcast::Sender<TitrationEvent>,
    epoch: u64,
    period: Duration,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let outcome = {
            let mut shared = lock(&shared);
            if shared.epoch != epoch {
                return;
            }
            match shared.controller.tick() {
                Ok(tick) => Ok((tick, shared.controller.reading())),
                Err(err) => Err(err),
            }
        };

        let event = match outcome {
            Ok((Tick::Advanced(_), reading)) => TitrationEvent::Advanced(reading),
            Ok((Tick::Finished { volume_added }, _)) => {
                debug!(
                    epoch,
                    volume_ml = volume_added.get::<milliliter>(),
                    "auto-titration task finished"
                );
                let _ = events.send(TitrationEvent::Finished { volume_added });
                return;
            }
            Ok((Tick::Idle, _)) => return,
            Err(err) => {
                warn!(epoch, error = %err, "auto-titration task stopped on error");
                let _ = events.send(TitrationEvent::Failed(err));
                return;
            }
        };
        let _ = events.send(event);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
