use std::time::Duration;

use uom::si::{f64::Volume, volume::milliliter};

use crate::{
    models::chemistry::titration::TitrationError,
    support::constraint::{Constrained, ConstraintError, StrictlyPositive},
};

/// Titrant added by the fine manual-step control, in millilitres.
pub const FINE_STEP_ML: f64 = 0.1;

/// Titrant added by the coarse manual-step control, in millilitres.
pub const COARSE_STEP_ML: f64 = 1.0;

/// Auto-titration settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoRunConfig {
    /// Titrant added on every tick.
    pub step: Volume,

    /// Time between ticks. Must be non-zero.
    pub tick_interval: Duration,
}

impl Default for AutoRunConfig {
    fn default() -> Self {
        Self {
            step: Volume::new::<milliliter>(0.5),
            tick_interval: Duration::from_millis(100),
        }
    }
}

impl AutoRunConfig {
    /// Returns the step size checked for strict positivity.
    ///
    /// # Errors
    ///
    /// Returns [`TitrationError::InvalidArgument`] if the step is not strictly positive.
    pub fn validated_step(&self) -> Result<Constrained<Volume, StrictlyPositive>, TitrationError> {
        StrictlyPositive::new(self.step).map_err(|source| TitrationError::InvalidArgument { source })
    }

    /// Returns the tick interval checked to be non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`TitrationError::InvalidArgument`] if the interval is zero.
    pub fn validated_interval(&self) -> Result<Duration, TitrationError> {
        if self.tick_interval.is_zero() {
            return Err(TitrationError::InvalidArgument {
                source: ConstraintError::Zero,
            });
        }
        Ok(self.tick_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = AutoRunConfig::default();

        assert!(config.validated_step().is_ok());
        assert_eq!(
            config.validated_interval(),
            Ok(Duration::from_millis(100))
        );
    }

    #[test]
    fn rejects_zero_interval() {
        let config = AutoRunConfig {
            tick_interval: Duration::ZERO,
            ..AutoRunConfig::default()
        };

        assert_eq!(
            config.validated_interval(),
            Err(TitrationError::InvalidArgument {
                source: ConstraintError::Zero
            })
        );
    }

    #[test]
    fn rejects_non_positive_step() {
        let config = AutoRunConfig {
            step: Volume::new::<milliliter>(-0.5),
            ..AutoRunConfig::default()
        };

        assert_eq!(
            config.validated_step(),
            Err(TitrationError::InvalidArgument {
                source: ConstraintError::Negative
            })
        );
    }
}
