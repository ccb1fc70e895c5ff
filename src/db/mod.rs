pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryPhotoStore;
pub use pool::create_pool;
pub use postgres::PgPhotoStore;
pub use store::{tally_votes, PhotoListKind, PhotoPage, PhotoStore};
