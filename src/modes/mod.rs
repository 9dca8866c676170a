pub mod menu;
pub mod play;

pub use menu::{Menu, MenuItem, MenuKind};
pub use play::{PlayMode, Screen};
