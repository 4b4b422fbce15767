mod config;
mod engine;
mod properties;
