pub mod config_repo;
pub mod error;

pub use config_repo::{ConfigStore, PgConfigStore};
pub use error::RepoError;
