use std::{cmp::Ordering, marker::PhantomData, ops::Add};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError, StrictlyPositive};

/// Marker type enforcing that a value is non-negative (zero or greater).
///
/// The running total of delivered titrant carries this constraint: it starts
/// at zero and only grows by strictly positive steps.
///
/// # Examples
///
/// ```
/// use titration_models::support::constraint::{NonNegative, StrictlyPositive};
/// use uom::si::{f64::Volume, volume::milliliter};
///
/// let mut added = NonNegative::zero::<Volume>();
/// let step = StrictlyPositive::new(Volume::new::<milliliter>(0.5)).unwrap();
/// added = added + step.into();
/// assert_eq!(added.into_inner().get::<milliliter>(), 0.5);
///
/// assert!(NonNegative::new(-7.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Returns zero as a non-negative constrained value.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, NonNegative> {
        Constrained::<T, NonNegative>::zero()
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Adds two `Constrained<T, NonNegative>` values.
///
/// # Panics
///
/// Panics in debug builds if the sum is unexpectedly negative.
impl<T> Add for Constrained<T, NonNegative>
where
    T: Add<Output = T> + PartialOrd + Zero,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let value = self.value + rhs.value;
        debug_assert!(
            value >= T::zero(),
            "Addition produced a negative value, violating NonNegative bound invariant"
        );
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

impl<T> Zero for Constrained<T, NonNegative>
where
    T: Add<Output = T> + PartialOrd + Zero,
{
    fn zero() -> Self {
        Self {
            value: T::zero(),
            _marker: PhantomData,
        }
    }

    fn is_zero(&self) -> bool {
        self.value == T::zero()
    }
}

/// Every strictly positive value is also non-negative.
impl<T: PartialOrd + Zero> From<Constrained<T, StrictlyPositive>> for Constrained<T, NonNegative> {
    fn from(value: Constrained<T, StrictlyPositive>) -> Self {
        Self {
            value: value.into_inner(),
            _marker: PhantomData,
        }
    }
}
