use std::{cmp::Ordering, marker::PhantomData};

use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constrained, Constraint, ConstraintError};

/// Supplies 0 and 1 for types used in the closed unit interval [0, 1].
///
/// Implementations should ensure that `zero() ≤ one()` under the type's
/// `PartialOrd` so the interval is well-formed.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }
    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// Marker type enforcing that a value lies in the closed unit interval: `0 ≤ x ≤ 1`.
///
/// Indicator opacity and the beaker fill level are expressed this way.
///
/// # Examples
///
/// ```
/// use titration_models::support::constraint::UnitInterval;
/// use uom::si::{f64::Ratio, ratio::{percent, ratio}};
///
/// let alpha = UnitInterval::new(0.4).unwrap();
/// assert_eq!(alpha.into_inner(), 0.4);
///
/// let fill = UnitInterval::saturating(Ratio::new::<percent>(120.0));
/// assert_eq!(fill.into_inner().get::<ratio>(), 1.0);
///
/// assert!(UnitInterval::new(1.0001).is_err());
/// assert!(UnitInterval::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs `Constrained<T, UnitInterval>` if 0 ≤ value ≤ 1.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: UnitBounds>(value: T) -> Result<Constrained<T, UnitInterval>, ConstraintError> {
        Constrained::<T, UnitInterval>::new(value)
    }

    /// Clamps a value into `[0, 1]`.
    ///
    /// Values that cannot be compared (NaN) map to zero.
    #[must_use]
    pub fn saturating<T: UnitBounds>(value: T) -> Constrained<T, UnitInterval> {
        let value = match Self::check(&value) {
            Ok(()) => value,
            Err(ConstraintError::AboveMaximum) => T::one(),
            Err(_) => T::zero(),
        };
        Constrained::<T, UnitInterval> {
            value,
            _marker: PhantomData,
        }
    }

    /// Returns the lower bound (zero) as a constrained value.
    #[must_use]
    pub fn zero<T: UnitBounds>() -> Constrained<T, UnitInterval> {
        Self::saturating(T::zero())
    }

    /// Returns the upper bound (one) as a constrained value.
    #[must_use]
    pub fn one<T: UnitBounds>() -> Constrained<T, UnitInterval> {
        Self::saturating(T::one())
    }
}

impl<T: UnitBounds> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::ratio::percent;

    #[test]
    #[allow(clippy::float_cmp)]
    fn floats() {
        assert!(UnitInterval::new(0.0).is_ok());
        assert!(UnitInterval::new(1.0).is_ok());
        assert!(matches!(
            UnitInterval::new(-1e-15),
            Err(ConstraintError::BelowMinimum)
        ));
        assert!(matches!(
            UnitInterval::new(f64::INFINITY),
            Err(ConstraintError::AboveMaximum)
        ));
        assert_eq!(UnitInterval::zero::<f64>().into_inner(), 0.0);
        assert_eq!(UnitInterval::one::<f64>().into_inner(), 1.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn saturating_clamps() {
        assert_eq!(UnitInterval::saturating(-0.3).into_inner(), 0.0);
        assert_eq!(UnitInterval::saturating(0.3).into_inner(), 0.3);
        assert_eq!(UnitInterval::saturating(7.0).into_inner(), 1.0);
        assert_eq!(UnitInterval::saturating(f64::NAN).into_inner(), 0.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn ratios() {
        let fill = UnitInterval::new(Ratio::new::<percent>(30.0)).unwrap();
        assert!((fill.into_inner().get::<ratio>() - 0.3).abs() < 1e-12);

        assert!(matches!(
            UnitInterval::new(Ratio::new::<percent>(101.0)),
            Err(ConstraintError::AboveMaximum)
        ));
        assert_eq!(
            UnitInterval::saturating(Ratio::new::<percent>(-5.0))
                .into_inner()
                .get::<ratio>(),
            0.0
        );
    }
}
