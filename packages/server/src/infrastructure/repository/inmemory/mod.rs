pub mod school;
pub mod session;

pub use school::InMemorySchoolRepository;
pub use session::InMemorySessionStore;
