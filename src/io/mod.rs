//! File export for load tables and result snapshots.

pub mod export;
