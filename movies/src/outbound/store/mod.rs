//! Local store adapters implementing the `LocalMovieStore` port.

mod atomic_io;
mod file_store;
mod memory_store;

pub use file_store::{DEFAULT_SNAPSHOT_FILE, FileMovieStore};
pub use memory_store::InMemoryMovieStore;
