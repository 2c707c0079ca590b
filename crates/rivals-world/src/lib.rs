//! Grid and transition engine for the Rivals automaton.
//!
//! A torus of cells, each dead or held by one of several competing species,
//! advanced one generation at a time by [`TransitionEngine`].

pub mod engine;
pub mod grid;
pub mod random;
pub mod seeding;
pub mod simulation;

pub use engine::TransitionEngine;
pub use grid::Grid;
pub use random::{seeded, UniformSource};
pub use seeding::{initialize, seed_region};
pub use simulation::Simulation;
