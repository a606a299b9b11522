pub mod inmemory;

pub use inmemory::{InMemorySchoolRepository, InMemorySessionStore};
