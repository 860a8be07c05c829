use std::fmt;

use thiserror::Error;

use crate::support::constraint::ConstraintError;

use super::Region;

/// Identifies an experiment parameter in configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    AcidVolume,
    AcidConcentration,
    TitrantConcentration,
    DissociationConstant,
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AcidVolume => "acid volume",
            Self::AcidConcentration => "acid concentration",
            Self::TitrantConcentration => "titrant concentration",
            Self::DissociationConstant => "dissociation constant",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while evaluating the pH of the titration mixture.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhError {
    /// A logarithm would have been taken of a zero or negative quantity.
    ///
    /// Indicates a volume outside the physical range or a point that fell
    /// just outside the equivalence tolerance window.
    #[error("non-positive concentration in {region} region: {value:e}")]
    NonPositiveConcentration {
        /// Curve region whose formula hit the domain violation.
        region: Region,

        /// Offending log operand, in mol/L (or mol for mole ratios).
        value: f64,
    },

    /// The acid species cannot be evaluated.
    #[error("unsupported acid species: Ka={ka}")]
    UnsupportedSpecies {
        /// The rejected dissociation constant.
        ka: f64,
    },
}

/// Errors reported by the titration model and simulation controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TitrationError {
    /// An experiment parameter is not strictly positive.
    #[error("invalid configuration: {field}")]
    InvalidConfiguration {
        field: ConfigField,
        #[source]
        source: ConstraintError,
    },

    /// A titrant step amount or auto-titration tick interval is not
    /// strictly positive.
    #[error("invalid argument")]
    InvalidArgument {
        #[source]
        source: ConstraintError,
    },

    /// The pH of the mixture could not be computed.
    #[error("pH computation failed")]
    Ph(#[from] PhError),
}

impl TitrationError {
    pub(super) fn invalid_config(field: ConfigField) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::InvalidConfiguration { field, source }
    }
}
