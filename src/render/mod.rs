pub mod renderer;

pub use renderer::{Renderer, fit_grid};
