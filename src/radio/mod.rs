//! A module to encapsulate all things related to radio operation.
pub mod prelude;

pub mod rf24;
pub use rf24::{Nrf24, Nrf24Error};

mod config;
pub use config::RadioConfig;
