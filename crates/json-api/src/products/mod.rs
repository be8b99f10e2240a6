//! Products

pub(crate) mod index;
