//! Shared primitive types used by tokens, parse trees and diagnostics

pub mod position;

pub use position::Position;
