//! # Arcana Core
//!
//! Core types for Arcana Resources: the unified error type, the pagination
//! abstraction resource collections are built from, and logging setup.

pub mod error;
pub mod logging;
pub mod pagination;
pub mod result;

pub use error::*;
pub use logging::*;
pub use pagination::*;
pub use result::*;
