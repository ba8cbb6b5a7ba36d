pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod normalize;
pub mod paths;
