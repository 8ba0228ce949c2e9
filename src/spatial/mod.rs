//! Spatial indexing for the warehouse floor

pub mod grid;

pub use grid::{Grid, Neighborhood};
