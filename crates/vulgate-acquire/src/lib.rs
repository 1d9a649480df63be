pub mod newadvent;
pub mod normalize;
pub mod output;

pub use newadvent::{acquire_book, acquire_book_from};
