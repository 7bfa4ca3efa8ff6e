//! Participation Hub domain layer.
//!
//! * [`session`]: explicit [`AuthState`] and access gates
//! * [`repo`]: one narrow async repository trait per entity
//! * [`forms`]: field validation for every form, built on [`hub_tags::Rule`]
//! * [`memory`]: in-memory backend implementing every repository

pub mod error;
pub mod forms;
pub mod ids;
pub mod memory;
pub mod model;
pub mod repo;
pub mod session;

pub use error::{RepoError, Result};
pub use ids::{CollectionId, ImageId, PaperId, ProfileId, UserId};
pub use memory::MemoryBackend;
pub use session::{AccessError, AuthState, Landing, Role, Session};
