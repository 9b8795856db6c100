//! Utility modules.

pub mod numeric;
