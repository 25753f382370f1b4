//! Event infrastructure - repository implementations

mod repository;

pub use repository::StorageEventRepository;
