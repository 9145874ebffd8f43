// Pipeline stages
pub mod alert_generator;
pub mod scoring;

// Dashboard state and user commands
pub mod commands;
pub mod state;

// Event loop and bootstrap
pub mod engine;
pub mod system;
