pub mod hero;
pub mod logging;
pub mod power_store;
