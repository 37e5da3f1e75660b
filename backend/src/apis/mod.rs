pub mod audit;
pub mod config;
pub mod input;
pub mod snapshot;
