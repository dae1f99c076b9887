pub mod capacity;
pub mod fitness;
