mod view;

pub use view::Models;
