mod template;

pub use template::{IndexTemplate, DEFAULT_TEMPLATE};
