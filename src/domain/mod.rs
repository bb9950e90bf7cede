pub mod settings;
pub mod subject;
