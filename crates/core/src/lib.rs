pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod query;
pub mod time;

pub use error::{ProdlineError, Result};
