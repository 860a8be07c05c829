//! Supporting utilities used by models.
//!
//! - [`constraint`]: Type-level numeric constraints such as [`constraint::StrictlyPositive`].

pub mod constraint;
