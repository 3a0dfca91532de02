pub mod orders;
pub mod settings;
