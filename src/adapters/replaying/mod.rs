//! Replaying adapters that serve recorded interactions.

pub mod names;

pub use names::ReplayingNameGenerator;
