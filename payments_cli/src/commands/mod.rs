//! CLI subcommand implementations.

pub mod cards;
pub mod orders;
pub mod pay;
pub mod payments;
