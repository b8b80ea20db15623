use crate::error::PrepError;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderType {
    Vertex,
    Pixel,
}

impl ShaderType {
    /// Type given by the first line starting with `vs` or `ps`.
    pub fn detect(path: &Path) -> Result<Option<ShaderType>, PrepError> {
        let file = File::open(path).map_err(|e| {
            PrepError::error(&format!(
                "Could not open input file at \"{}\": {}",
                path.display(),
                e
            ))
        })?;
        for line in BufReader::new(file).split(b'\n') {
            let line = line?;
            if line.starts_with(b"vs") {
                return Ok(Some(ShaderType::Vertex));
            }
            if line.starts_with(b"ps") {
                return Ok(Some(ShaderType::Pixel));
            }
        }
        Ok(None)
    }

    pub fn assembler(&self) -> &'static str {
        match self {
            ShaderType::Vertex => "vsa.exe",
            ShaderType::Pixel => "psa.exe",
        }
    }

    /// Extension of the assembled binary.
    pub fn object_extension(&self) -> &'static str {
        match self {
            ShaderType::Vertex => "vso",
            ShaderType::Pixel => "pso",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShaderType::Vertex => "Vertex",
            ShaderType::Pixel => "Pixel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detect_vertex_after_comments() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("light.vsh");
        fs::write(&path, "; diffuse lighting\n#include \"consts.h\"\nvs.1.1\nps.1.1\n").unwrap();
        assert_eq!(ShaderType::detect(&path).unwrap(), Some(ShaderType::Vertex));
    }

    #[test]
    fn test_detect_pixel() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tex.psh");
        fs::write(&path, "ps.1.1\r\ntex t0\r\n").unwrap();
        assert_eq!(ShaderType::detect(&path).unwrap(), Some(ShaderType::Pixel));
    }

    #[test]
    fn test_detect_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");
        fs::write(&path, "  vs.1.1\nmov r0, v0\n").unwrap();
        assert_eq!(ShaderType::detect(&path).unwrap(), None);
    }

    #[test]
    fn test_detect_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(ShaderType::detect(&temp_dir.path().join("missing.vsh")).is_err());
    }
}
