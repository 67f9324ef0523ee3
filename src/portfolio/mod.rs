// src/portfolio/mod.rs
pub mod vol;
pub mod weights;
