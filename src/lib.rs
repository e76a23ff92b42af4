/// Jarbis - random superhero identity cards
///
/// Core library: power record stores (remote list, file, cache), the random
/// hero generator and the card controller behind the terminal view.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
