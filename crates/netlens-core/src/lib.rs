pub mod analysis;
pub mod comparison;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod model;
pub mod store;
pub mod view;

pub use error::{Error, Result};
