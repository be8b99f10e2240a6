//! Products

pub mod data;
pub mod errors;
pub mod merge;
pub mod query;
pub mod records;
pub mod search;
pub mod service;
pub mod store;

pub use errors::ProductsServiceError;
pub use service::*;
