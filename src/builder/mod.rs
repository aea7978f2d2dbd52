pub mod draft;
pub mod group_builder;
