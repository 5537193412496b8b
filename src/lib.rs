pub mod analysis;
pub mod comparison;
pub mod config;
pub mod error;
pub mod indicator;
pub mod loader;
pub mod model;
pub mod sentiment;
pub mod symbol;
pub mod utils;
pub mod watchlist;
