//! Glue around the external vertex/pixel shader assemblers.

mod assemble;
mod compile_path;
mod patch_header;
mod shader_type;

pub use assemble::*;
pub use compile_path::*;
pub use patch_header::*;
pub use shader_type::*;
