//! # tulle-material
//!
//! Material parameterization for the spring network.
//!
//! ## Design
//!
//! [`ClothProperties`] carries the measurable physical inputs (thickness,
//! density, Young's modulus, viscosity). Together with the mesh
//! [`GridSpacing`] they yield a [`MaterialParameters`] set: node mass,
//! spring stiffness, damping, and the critical and simulation time steps.
//! The derivation runs once before the frame loop.
//!
//! The [`MaterialDatabase`] stores named presets.

pub mod database;
pub mod parameters;
pub mod properties;
pub mod spacing;

pub use database::MaterialDatabase;
pub use parameters::MaterialParameters;
pub use properties::ClothProperties;
pub use spacing::GridSpacing;
