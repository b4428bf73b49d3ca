//! wgpu resource helpers: context, buffers, shaders, programs, textures.

mod buffer;
mod context;
mod probe;
mod program;
mod shader;
mod texture;
mod types;

pub use buffer::*;
pub use context::*;
pub use probe::*;
pub use program::*;
pub use shader::*;
pub use texture::*;
pub use types::*;
