// src/core/mod.rs - Refinement engine

pub mod random;
pub mod refine_loop;
pub mod types;
