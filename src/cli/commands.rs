pub mod health;
pub mod models;
pub mod predict;

pub use health::health;
pub use models::{delete_model, list_models};
pub use predict::predict;
