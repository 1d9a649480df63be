pub mod compose;
pub mod roman;
pub mod transform;

pub use compose::{compose, TemplateVariant};
pub use roman::to_roman;
