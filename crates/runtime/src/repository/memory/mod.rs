//! In-memory repositories for tests and local runs.

mod character;
mod world;

pub use character::InMemoryCharacterRepo;
pub use world::InMemoryWorldRepo;
