//! Crab cavity noise physics for Crab Noise Core.
//!
//! Bunch-length correction factor, emittance growth from phase and
//! amplitude noise, cavity kicks, optics helpers and unit conversions.

pub mod conversions;
pub mod correction;
pub mod emittance;
pub mod kick;
pub mod optics;
