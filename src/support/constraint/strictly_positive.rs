use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// Sample volumes, concentrations and step amounts all carry this constraint.
///
/// # Examples
///
/// ```
/// use titration_models::support::constraint::StrictlyPositive;
/// use uom::si::{f64::MolarConcentration, molar_concentration::mole_per_liter};
///
/// let c = StrictlyPositive::new(MolarConcentration::new::<mole_per_liter>(0.1)).unwrap();
/// assert_eq!(c.into_inner().get::<mole_per_liter>(), 0.1);
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-1.0).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{MolarConcentration, Volume},
        molar_concentration::mole_per_liter,
        volume::milliliter,
    };

    #[test]
    fn floats() {
        assert!(Constrained::<f64, StrictlyPositive>::new(1.8e-5).is_ok());
        assert!(StrictlyPositive::new(0.0).is_err());
        assert!(StrictlyPositive::new(-0.5).is_err());
        assert!(matches!(
            StrictlyPositive::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        ));
    }

    #[test]
    fn volumes() {
        let step = StrictlyPositive::new(Volume::new::<milliliter>(0.5)).unwrap();
        assert!(step.into_inner().get::<milliliter>() > 0.49);

        assert!(matches!(
            StrictlyPositive::new(Volume::new::<milliliter>(0.0)),
            Err(ConstraintError::Zero)
        ));
        assert!(matches!(
            StrictlyPositive::new(Volume::new::<milliliter>(-0.1)),
            Err(ConstraintError::Negative)
        ));
    }

    #[test]
    fn concentrations() {
        let c = MolarConcentration::new::<mole_per_liter>(0.1);
        assert!(StrictlyPositive::new(c).is_ok());

        let c = MolarConcentration::new::<mole_per_liter>(0.0);
        assert!(StrictlyPositive::new(c).is_err());
    }
}
