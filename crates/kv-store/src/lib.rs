pub mod api;
pub mod errors;
pub mod file;
pub mod memory;
pub mod model;

pub use api::KvStore;
pub use errors::StoreError;
pub use file::FileKvStore;
pub use memory::InMemoryKvStore;
pub use model::{ListOptions, Record};

#[cfg(test)]
mod tests;
