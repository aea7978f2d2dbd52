pub mod group;
pub mod input;
pub mod text;
pub mod view;
