pub mod error;
pub mod layout;
pub mod loading;
pub mod models;
pub mod predictor;
pub mod settings;
