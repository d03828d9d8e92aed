pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryMemberRepository;
pub use postgres::PgMemberRepository;
pub use repository::{MemberRepository, StoreError};
