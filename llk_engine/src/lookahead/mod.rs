//! Look-ahead sets used to choose between alternatives

pub mod set;

pub use set::LookAheadSet;
