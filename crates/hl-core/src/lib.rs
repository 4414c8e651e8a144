//! hl-core: shared foundation for hydroloop.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - water (fixed material properties of the working fluid)
//! - numeric (Real + input guards + quantization)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;
pub mod water;

pub use error::{HlError, HlResult};
pub use numeric::*;
pub use units::*;
