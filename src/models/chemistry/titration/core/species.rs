use std::fmt;

/// Acid dissociation constant of acetic acid at 25 °C.
pub const ACETIC_ACID_KA: f64 = 1.8e-5;

/// Negative log10 of the ion product of water at 25 °C (`Kw = 1e-14`).
pub const PKW: f64 = 14.0;

/// The acid being titrated.
///
/// A strong acid dissociates completely; a weak acid is characterised by its
/// dissociation constant `Ka`. Only monoprotic acids are modeled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AcidSpecies {
    /// A fully dissociating monoprotic acid.
    Strong,

    /// A partially dissociating monoprotic acid.
    Weak {
        /// Acid dissociation constant.
        ka: f64,
    },
}

impl AcidSpecies {
    /// Hydrochloric acid, HCl.
    pub const HYDROCHLORIC: Self = Self::Strong;

    /// Acetic acid, CH3COOH.
    pub const ACETIC: Self = Self::Weak { ka: ACETIC_ACID_KA };

    /// Returns the dissociation constant, or `None` for a strong acid.
    #[must_use]
    pub fn ka(&self) -> Option<f64> {
        match self {
            Self::Strong => None,
            Self::Weak { ka } => Some(*ka),
        }
    }

    /// Returns `pKa = -log10(Ka)`, or `None` for a strong acid.
    #[must_use]
    pub fn pka(&self) -> Option<f64> {
        self.ka().map(|ka| -ka.log10())
    }
}

impl fmt::Display for AcidSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strong => write!(f, "strong acid"),
            Self::Weak { ka } => write!(f, "weak acid (Ka={ka:e})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn acetic_pka() {
        let pka = AcidSpecies::ACETIC.pka().unwrap();
        assert_relative_eq!(pka, 4.744_727_5, epsilon = 1e-6);
    }

    #[test]
    fn strong_acid_has_no_ka() {
        assert_eq!(AcidSpecies::HYDROCHLORIC.ka(), None);
        assert_eq!(AcidSpecies::HYDROCHLORIC.pka(), None);
    }
}
