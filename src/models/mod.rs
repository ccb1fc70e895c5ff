pub mod cursor;
pub mod photo;

pub use cursor::*;
pub use photo::*;
