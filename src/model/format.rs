//! Supported model formats and the rejection decision table

use crate::error::AerosuiteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// 3D model formats accepted for upload
///
/// The file extension is the only signal used to pick a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedFormat {
    /// Binary glTF container
    Glb,
    /// JSON glTF (buffers must be embedded as data URIs)
    Gltf,
    /// Wavefront OBJ
    Obj,
}

impl SupportedFormat {
    /// All accepted formats, in display order
    pub const ALL: [SupportedFormat; 3] = [Self::Glb, Self::Gltf, Self::Obj];

    /// Determine the format of an uploaded file from its name
    ///
    /// # Errors
    ///
    /// Returns `AerosuiteError::UnsupportedFormat` carrying the static
    /// remediation hint when the extension is not allow-listed.
    ///
    /// # Examples
    ///
    /// ```
    /// use aerosuite::model::SupportedFormat;
    ///
    /// assert_eq!(SupportedFormat::from_file_name("Coupe.GLB").unwrap(), SupportedFormat::Glb);
    /// assert!(SupportedFormat::from_file_name("coupe.blend").is_err());
    /// ```
    pub fn from_file_name(file_name: &str) -> Result<Self, AerosuiteError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        extension
            .parse()
            .map_err(|_| AerosuiteError::UnsupportedFormat {
                hint: rejection_hint(&extension).to_string(),
                extension,
            })
    }

    /// Map a stored MIME type back to a format
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.mime_type() == mime)
    }

    /// Lowercase extension without the dot
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Glb => "glb",
            Self::Gltf => "gltf",
            Self::Obj => "obj",
        }
    }

    /// MIME type used in the persisted data URL
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Glb => "model/gltf-binary",
            Self::Gltf => "model/gltf+json",
            Self::Obj => "model/obj",
        }
    }

    /// Whether the glTF decoder handles this format
    pub fn is_gltf_family(&self) -> bool {
        matches!(self, Self::Glb | Self::Gltf)
    }
}

impl fmt::Display for SupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

impl FromStr for SupportedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "glb" => Ok(Self::Glb),
            "gltf" => Ok(Self::Gltf),
            "obj" => Ok(Self::Obj),
            other => Err(format!("Unsupported model format: {}", other)),
        }
    }
}

/// Static remediation hint for a rejected extension
///
/// This is a fixed lookup, not a converter.
pub fn rejection_hint(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "blend" => "BLEND files must be exported to GLB/OBJ first (File > Export > glTF 2.0 in Blender)",
        "catpart" | "catproduct" | "cgr" => {
            "CATIA files must be exported to a mesh format first; export as OBJ or convert to GLB"
        }
        "step" | "stp" | "iges" | "igs" => {
            "CAD exchange files must be tessellated first; export the body as GLB or OBJ"
        }
        "stl" | "fbx" | "3ds" | "dae" => {
            "Convert this mesh to GLB (recommended) or OBJ before uploading"
        }
        _ => "Supported formats are GLB, GLTF and OBJ; GLB is recommended for best compatibility",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_name_accepts_allow_list_case_insensitive() {
        assert_eq!(
            SupportedFormat::from_file_name("car.glb").unwrap(),
            SupportedFormat::Glb
        );
        assert_eq!(
            SupportedFormat::from_file_name("CAR.GLTF").unwrap(),
            SupportedFormat::Gltf
        );
        assert_eq!(
            SupportedFormat::from_file_name("body.v2.Obj").unwrap(),
            SupportedFormat::Obj
        );
    }

    #[test]
    fn test_from_file_name_rejects_blend_with_hint() {
        let err = SupportedFormat::from_file_name("concept.blend").unwrap_err();
        match err {
            AerosuiteError::UnsupportedFormat { extension, hint } => {
                assert_eq!(extension, "blend");
                assert!(hint.contains("BLEND files must be exported"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_file_name_rejects_catia_native() {
        let err = SupportedFormat::from_file_name("door.CATPart").unwrap_err();
        assert!(err.to_string().contains("CATIA files"));
    }

    #[test]
    fn test_from_file_name_without_extension() {
        let err = SupportedFormat::from_file_name("README").unwrap_err();
        match err {
            AerosuiteError::UnsupportedFormat { extension, hint } => {
                assert!(extension.is_empty());
                assert!(hint.contains("GLB is recommended"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extension_only_name_is_rejected() {
        // ".glb" is a hidden file with no extension, not a GLB upload
        assert!(SupportedFormat::from_file_name(".glb").is_err());
    }

    #[test]
    fn test_mime_type_lookup() {
        for format in SupportedFormat::ALL {
            assert_eq!(
                SupportedFormat::from_mime_type(format.mime_type()),
                Some(format)
            );
        }
        assert_eq!(SupportedFormat::from_mime_type("image/png"), None);
    }

    #[test]
    fn test_from_str_tolerates_dot_prefix() {
        assert_eq!(".OBJ".parse::<SupportedFormat>(), Ok(SupportedFormat::Obj));
        assert!("stl".parse::<SupportedFormat>().is_err());
    }

    #[test]
    fn test_display_is_uppercase() {
        assert_eq!(SupportedFormat::Gltf.to_string(), "GLTF");
    }
}
