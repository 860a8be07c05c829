//! Public models.
//!
//! Models are organized into domain-specific submodules (e.g., `chemistry`).
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the actual computation and domain logic lives. The `core` module is an
//! implementation detail; the parent module re-exports the types callers need
//! and provides the [`twine_core::Model`] adapter.

pub mod chemistry;
