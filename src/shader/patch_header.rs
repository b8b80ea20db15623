use super::shader_type::ShaderType;
use crate::error::PrepError;

use std::fs;
use std::path::Path;

/// Array declaration that replaces the assembler's generic first header line.
///
/// `shaders/light.vsh` as a vertex shader gives
/// `DWORD dwLightVertexShader[] = {\r\n`.
pub fn header_declaration(input: &Path, shader_type: ShaderType) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut chars = stem.chars();
    let name = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    };
    return format!(
        "DWORD dw{}{}Shader[] = {{\r\n",
        name,
        shader_type.display_name()
    );
}

/// Rename the array in a generated header so every shader gets its own symbol.
pub fn patch_header(input: &Path, output_path: &Path, shader_type: ShaderType) -> Result<(), PrepError> {
    let data = fs::read(output_path).map_err(|e| {
        PrepError::error(&format!(
            "Could not open output file at \"{}\": {}",
            output_path.display(),
            e
        ))
    })?;
    let body = match data.iter().position(|&b| b == b'\n') {
        Some(pos) => &data[pos + 1..],
        None => &[][..],
    };

    let declaration = header_declaration(input, shader_type);
    let mut patched = Vec::with_capacity(declaration.len() + body.len());
    patched.extend_from_slice(declaration.as_bytes());
    patched.extend_from_slice(body);
    fs::write(output_path, patched)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_declaration() {
        assert_eq!(
            header_declaration(Path::new("shaders/light.vsh"), ShaderType::Vertex),
            "DWORD dwLightVertexShader[] = {\r\n"
        );
        assert_eq!(
            header_declaration(Path::new("bump.map.psh"), ShaderType::Pixel),
            "DWORD dwBump.mapPixelShader[] = {\r\n"
        );
    }

    #[test]
    fn test_patch_replaces_first_line_only() {
        let temp_dir = TempDir::new().unwrap();
        let header = temp_dir.path().join("light.h");
        fs::write(&header, "DWORD dwShader[] = {\r\n0xfffe0101,\r\n};\r\n").unwrap();

        patch_header(Path::new("light.vsh"), &header, ShaderType::Vertex).unwrap();
        assert_eq!(
            fs::read_to_string(&header).unwrap(),
            "DWORD dwLightVertexShader[] = {\r\n0xfffe0101,\r\n};\r\n"
        );
    }

    #[test]
    fn test_patch_missing_output() {
        let temp_dir = TempDir::new().unwrap();
        let result = patch_header(
            Path::new("light.vsh"),
            &temp_dir.path().join("light.h"),
            ShaderType::Vertex,
        );
        assert!(result.is_err());
    }
}
