pub mod config;
pub mod runner;
