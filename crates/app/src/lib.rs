//! Price-list catalog: snapshot ingestion, persistence and keyset pagination.

pub mod context;
pub mod database;
pub mod domain;
pub mod ids;

#[cfg(test)]
mod test;
