pub mod error;
pub mod machine;
pub mod value_model;
