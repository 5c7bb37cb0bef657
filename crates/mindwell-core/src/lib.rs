//! mindwell-core
//!
//! Pure domain types shared by the screening and intervention crates.
//! No rendering, storage or delivery: this is the vocabulary the
//! presentation layer reads results and alerts in.

pub mod models;
