pub mod console;
pub mod formatting;
pub mod view_models;
