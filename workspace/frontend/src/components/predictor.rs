mod form;
mod metrics;
mod view;

pub use view::Predictor;
