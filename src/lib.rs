pub mod compute;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod logger;
pub mod render;
pub mod resources;
