pub mod config;
pub mod distance;
pub mod domain;
pub mod evaluation;
pub mod fixtures;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod setup;
pub mod solver;
