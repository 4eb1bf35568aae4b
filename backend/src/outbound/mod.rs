//! Outbound adapters implementing the driven forum ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel and bb8
//! - **memory**: a mutex-guarded in-process store for database-less runs and
//!   tests
//!
//! Adapters translate between storage representations and domain types and
//! contain no forum rules.

pub mod memory;
pub mod persistence;
