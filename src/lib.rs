pub mod builder;
pub mod cli;
pub mod form;
pub mod persist;
pub mod render;
pub mod report;
pub mod schema;
pub mod session;
pub mod trace;
pub mod validate;
