// Service exports
pub mod cache;
pub mod github;
pub mod postgres;
pub mod store;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use github::{GitHubClient, GitHubError, GitHubUser};
pub use postgres::PostgresDevStore;
pub use store::{DevRepository, InMemoryDevStore, StoreError};
