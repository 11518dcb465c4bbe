pub mod cli;
pub mod config;
pub mod debounce;
pub mod render;
pub mod session;
pub mod shell;
