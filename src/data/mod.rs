//! File-backed stores: the question bank and the result log.

mod loader;
mod results;

pub use loader::{LoadError, load_bank};
pub use results::{ResultStore, StoreError};
