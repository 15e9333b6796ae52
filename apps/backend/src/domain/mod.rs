//! Domain layer: pure pricing rules.

pub mod price;
