//! Iterative search for the titrant volume at a target pH.
//!
//! Bisects the titrant volume over `[0, 2 × equivalence volume]` until the
//! computed pH matches the target. Useful for locating where an indicator
//! starts to change color.

mod config;
mod error;
mod problem;

pub use config::EndpointConfig;
pub use error::EndpointError;

use twine_solvers::equation::bisection;
use uom::si::{f64::Volume, volume::milliliter};

use super::{Experiment, Sample, ph};

use problem::{CurveModel, TargetPhProblem};

/// Finds a titrant volume at which the curve crosses `target_ph`.
///
/// The weak-acid curve jumps at the equivalence branch switch, so a target
/// inside that jump converges onto the switch itself.
///
/// # Errors
///
/// Returns [`EndpointError`] if the target lies outside the bracket's pH
/// range, the curve cannot be evaluated, or the solver fails to converge.
pub(super) fn volume_at_ph(
    experiment: &Experiment,
    target_ph: f64,
    config: EndpointConfig,
) -> Result<Sample, EndpointError> {
    let upper = 2.0 * experiment.equivalence_volume().get::<milliliter>();

    let low = ph::evaluate(experiment, Volume::new::<milliliter>(0.0))?.ph;
    let high = ph::evaluate(experiment, Volume::new::<milliliter>(upper))?.ph;
    if !(low..=high).contains(&target_ph) {
        return Err(EndpointError::OutOfRange {
            target: target_ph,
            low,
            high,
        });
    }

    let model = CurveModel::new(experiment);
    let problem = TargetPhProblem::new(target_ph);

    let solution = bisection::solve(
        &model,
        &problem,
        [0.0, upper],
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // Treat a volume the curve cannot be evaluated at as overshooting.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(EndpointError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::chemistry::titration::core::{AcidSpecies, ExperimentConfig, Region};

    fn experiment(species: AcidSpecies) -> Experiment {
        ExperimentConfig {
            species,
            ..ExperimentConfig::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn half_equivalence_of_weak_acid_is_pka() {
        let acetic = experiment(AcidSpecies::ACETIC);
        let pka = AcidSpecies::ACETIC.pka().unwrap();

        let sample = volume_at_ph(&acetic, pka, EndpointConfig::default())
            .expect("pKa lies in the buffer region");

        assert_eq!(sample.region, Region::Buffer);
        assert_relative_eq!(sample.volume_added.get::<milliliter>(), 25.0, epsilon = 1e-6);
    }

    #[test]
    fn strong_acid_target_before_equivalence() {
        let hcl = experiment(AcidSpecies::HYDROCHLORIC);

        // pH 2 means 0.01 M H+: (5 - 0.1 v) mmol / (50 + v) mL = 0.01 -> v = 450/11 mL.
        let sample = volume_at_ph(&hcl, 2.0, EndpointConfig::default())
            .expect("pH 2 is on the curve");

        assert_relative_eq!(sample.ph, 2.0, epsilon = 1e-6);
        assert_relative_eq!(
            sample.volume_added.get::<milliliter>(),
            450.0 / 11.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn target_outside_curve() {
        let hcl = experiment(AcidSpecies::HYDROCHLORIC);

        assert!(matches!(
            volume_at_ph(&hcl, 0.5, EndpointConfig::default()),
            Err(EndpointError::OutOfRange { .. })
        ));
        assert!(matches!(
            volume_at_ph(&hcl, 13.5, EndpointConfig::default()),
            Err(EndpointError::OutOfRange { .. })
        ));
    }
}
