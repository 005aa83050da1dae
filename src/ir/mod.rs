pub mod expr;
pub mod plan;
pub mod pretty;
pub mod validate;
