//! Turns warehouse and retail sales data into an animated four-slide chart presentation.

mod aggregate;
pub mod args;
pub mod chart;
pub mod commands;
mod config;
pub mod deck;
mod error;
pub mod model;
pub mod nav;
pub mod slides;
pub mod source;
mod utils;


pub use aggregate::{ChannelTotals, Dataset, TimePoint};
pub use config::Config;
pub use error::Error;
pub use error::Result;
