//! Incremental mirror of dated flat files from an S3-compatible bucket.
//!
//! Remote objects are named `<YYYY-MM-DD>.csv.gz`. Each run scans the
//! local download directory for the newest date already present, then
//! lists the bucket under a fixed prefix and fetches every object
//! stamped with a strictly newer date. The directory itself is the only
//! state; nothing is persisted between runs.

pub mod config;
pub mod naming;
pub mod scanner;
pub mod sync;
