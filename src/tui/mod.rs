//! Terminal presentation of the hero card.

pub mod app;
pub mod theme;
pub mod views;
