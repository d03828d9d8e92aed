//! Member domain - read-side access to the `member` table

pub mod data;
pub mod filter;
pub mod models;

// Re-export commonly used types
pub use data::{InMemoryMemberRepository, MemberRepository, PgMemberRepository, StoreError};
pub use filter::MemberFilter;
pub use models::member::Member;
