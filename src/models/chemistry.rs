//! Solution chemistry models.

pub mod titration;
