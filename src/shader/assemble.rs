use super::shader_type::ShaderType;
use crate::error::PrepError;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run the assembler for `shader_type` on the preprocessed file.
pub fn assemble(compile_path: &Path, shader_type: ShaderType, header: bool) -> Result<(), PrepError> {
    assemble_with(OsStr::new(shader_type.assembler()), compile_path, header)
}

pub fn assemble_with(program: &OsStr, compile_path: &Path, header: bool) -> Result<(), PrepError> {
    let mut command = Command::new(program);
    if header {
        command.arg("-h");
    }
    command.arg(compile_path);
    log::info!("Running {:?}", command);

    let status = command.status().map_err(|e| {
        PrepError::error(&format!(
            "Unable to run {}: {}",
            program.to_string_lossy(),
            e
        ))
    })?;
    if !status.success() {
        return Err(PrepError::error("Shader compilation failed."));
    }
    Ok(())
}

/// Move the assembled file to `output_path`, creating its directory.
///
/// Falls back to leaving the file at `compile_path` if the move fails.
pub fn move_output(compile_path: &Path, output_path: &Path) -> PathBuf {
    if let Some(dir) = output_path.parent() {
        if !dir.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(dir) {
                log::warn!("Failed to create output directory \"{}\": {}", dir.display(), e);
            }
        }
    }
    match fs::rename(compile_path, output_path) {
        Ok(()) => output_path.to_path_buf(),
        Err(e) => {
            log::warn!(
                "Failed to rename output file ({}). Using default output file \"{}\".",
                e,
                compile_path.display()
            );
            compile_path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_assembler() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("light.vso");
        let result = assemble_with(OsStr::new("shader-prep-no-such-assembler"), &path, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_move_output_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let compiled = temp_dir.path().join("light.vso");
        fs::write(&compiled, "binary").unwrap();
        let target = temp_dir.path().join("out").join("bin").join("light.vso");

        let moved = move_output(&compiled, &target);
        assert_eq!(moved, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "binary");
        assert!(!compiled.exists());
    }

    #[test]
    fn test_move_output_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let compiled = temp_dir.path().join("missing.vso");
        let target = temp_dir.path().join("light.vso");
        assert_eq!(move_output(&compiled, &target), compiled);
    }
}
