//! Record source implementations

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryRecordSource;
pub use json_file::JsonFileRecordSource;
