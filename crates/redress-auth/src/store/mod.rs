//! Persistent session store implementations and the typed record codec.

pub mod file;
pub mod keys;
pub mod memory;
pub mod records;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
