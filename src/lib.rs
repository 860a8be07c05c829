//! # Titration Models
//!
//! Acid-base titration of a monoprotic acid with a strong base, built on
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Titration chemistry, exposed as a [`twine_core::Model`].
//! - [`simulation`]: Manual and timed auto-titration of an experiment.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once more than one module needs it. Only [`support`] is part
//! of the public API; model-specific helpers remain private.

pub mod models;
pub mod simulation;
pub mod support;
