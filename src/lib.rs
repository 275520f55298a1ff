pub mod app;
pub mod cli;
pub mod config;
pub mod loader;
pub mod output;
pub mod roster;
pub mod session;
pub mod view;

#[cfg(test)]
mod tests;
