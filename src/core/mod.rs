//! Core valuation logic and its ambient configuration

pub mod compare;
pub mod config;
pub mod currency;
pub mod error;
pub mod guard;
pub mod index;
pub mod inflation;
pub mod log;
pub mod resolver;
pub mod valuation;

// Re-export main types for cleaner imports
pub use error::{DatasetError, ValuationError};
pub use valuation::{EngineHandle, ValuationEngine, ValuationRequest, ValuationResult};
