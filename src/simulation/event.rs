use uom::si::f64::Volume;

use crate::models::chemistry::titration::{Reading, TitrationError};

/// Notifications published by [`super::AutoTitrator`] for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TitrationEvent {
    /// A new experiment started; carries its initial reading.
    Reset(Reading),

    /// Titrant was added, manually or by an auto-titration tick.
    Advanced(Reading),

    /// Auto-titration reached its stop bound.
    Finished {
        /// Titrant delivered when the run stopped.
        volume_added: Volume,
    },

    /// An auto-titration step failed and the run was stopped.
    Failed(TitrationError),
}
