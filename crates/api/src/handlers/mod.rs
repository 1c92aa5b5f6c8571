pub mod chat;
pub mod resource;
pub mod settings;
pub mod stats;
