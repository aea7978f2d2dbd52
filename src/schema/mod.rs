pub mod error;
pub mod field_model;
pub mod normalize;
pub mod schema_model;
