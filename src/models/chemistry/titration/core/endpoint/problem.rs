//! Problem formulation for the target-pH search.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{f64::Volume, volume::milliliter};

use crate::models::chemistry::titration::core::{Experiment, PhError, Sample, ph};

/// Model adapter evaluating the curve of one experiment at a titrant volume.
pub(super) struct CurveModel<'a> {
    experiment: &'a Experiment,
}

impl<'a> CurveModel<'a> {
    pub(super) fn new(experiment: &'a Experiment) -> Self {
        Self { experiment }
    }
}

impl Model for CurveModel<'_> {
    type Input = Volume;
    type Output = Sample;
    type Error = PhError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        ph::evaluate(self.experiment, *input)
    }
}

/// Equation problem definition for the target-pH search.
///
/// Computes the residual as `achieved_ph - target_ph`.
pub(super) struct TargetPhProblem {
    target: f64,
}

impl TargetPhProblem {
    pub(super) fn new(target: f64) -> Self {
        Self { target }
    }
}

impl EquationProblem<1> for TargetPhProblem {
    type Input = Volume;
    type Output = Sample;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Volume::new::<milliliter>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.ph - self.target])
    }
}
