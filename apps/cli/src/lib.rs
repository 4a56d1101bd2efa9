pub mod cli;
pub mod config;
pub mod main_lib;
pub mod render;

pub use main_lib::{build_store, init_tracing, run};
