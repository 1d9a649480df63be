pub mod book;
pub mod error;
pub mod language;

pub use book::*;
pub use error::*;
pub use language::*;
