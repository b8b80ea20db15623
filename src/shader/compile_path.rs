use super::shader_type::ShaderType;
use crate::error::PrepError;

use std::path::{Path, PathBuf};

/// File the preprocessed source is written to and assembled in place.
///
/// It lives in the current directory and is named after the input, with the
/// extension replaced by the object extension, or by `h` when assembling to a
/// C header.
pub fn compile_path(input: &Path, shader_type: ShaderType, header: bool) -> Result<PathBuf, PrepError> {
    let file_name = input.file_name().ok_or_else(|| {
        PrepError::error(&format!(
            "Unable to create temporary file: \"{}\" has no file name.",
            input.display()
        ))
    })?;
    let extension = if header {
        "h"
    } else {
        shader_type.object_extension()
    };
    return Ok(PathBuf::from(file_name).with_extension(extension));
}
