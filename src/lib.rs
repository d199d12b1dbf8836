pub mod config;
pub mod core_types;
pub mod error;
pub mod event;
pub mod form;
pub mod gate;
pub mod random;
pub mod scoring;
pub mod simulator;
pub mod start_list;
pub mod weekend;
pub mod wind;
// cmd and reports belong to the binary (src/main.rs).
