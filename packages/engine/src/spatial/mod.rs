//! Spatial - grid layout shared by both renderers

pub mod grid;

pub use grid::{Cell, CellGrid};
