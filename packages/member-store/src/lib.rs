// Member read-store
//
// A read-oriented data-access layer over a single `member` table: one record
// type, a composable filter, offset/range pagination values, and a repository
// contract implemented by a Postgres adapter and an in-memory adapter.
//
// The hosting process owns bootstrap (subscriber init, pool wiring); this
// crate only exposes the query contract and its adapters.

pub mod common;
pub mod config;
pub mod domains;

pub use config::*;
