//! Mathematical primitives for Crab Noise Core.

pub mod bessel;
