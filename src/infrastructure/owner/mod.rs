//! Owner infrastructure - repository implementations

mod repository;

pub use repository::StorageOwnerRepository;
