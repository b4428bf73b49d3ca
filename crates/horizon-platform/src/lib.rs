pub mod input;
pub mod mouse;
pub mod winit_keys;

pub use input::{InputAdapter, InputCommand, InputEvent, PointerButton};
pub use mouse::pointer_to_world;
pub use winit_keys::normalize_winit_key;
