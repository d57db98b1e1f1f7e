//! Image formats and the autosave format choice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::AutosaveError;

/// Output formats as the host names them (`scene.render.image_settings.file_format`).
// More context: https://docs.blender.org/api/current/bpy_types_enum_items/image_type_items.html
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageFormat {
    Bmp,
    Iris,
    #[default]
    Png,
    Jpeg,
    Jpeg2000,
    Targa,
    TargaRaw,
    Cineon,
    Dpx,
    OpenExrMultilayer,
    OpenExr,
    Hdr,
    Tiff,
    Webp,
    AviJpeg,
    AviRaw,
    Ffmpeg,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 17] = [
        ImageFormat::Bmp,
        ImageFormat::Iris,
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Jpeg2000,
        ImageFormat::Targa,
        ImageFormat::TargaRaw,
        ImageFormat::Cineon,
        ImageFormat::Dpx,
        ImageFormat::OpenExrMultilayer,
        ImageFormat::OpenExr,
        ImageFormat::Hdr,
        ImageFormat::Tiff,
        ImageFormat::Webp,
        ImageFormat::AviJpeg,
        ImageFormat::AviRaw,
        ImageFormat::Ffmpeg,
    ];

    /// File extension including the leading dot, `None` for movie formats.
    #[must_use]
    pub const fn extension(self) -> Option<&'static str> {
        match self {
            ImageFormat::Bmp => Some(".bmp"),
            ImageFormat::Iris => Some(".rgb"),
            ImageFormat::Png => Some(".png"),
            ImageFormat::Jpeg => Some(".jpg"),
            ImageFormat::Jpeg2000 => Some(".jp2"),
            ImageFormat::Targa | ImageFormat::TargaRaw => Some(".tga"),
            ImageFormat::Cineon => Some(".cin"),
            ImageFormat::Dpx => Some(".dpx"),
            ImageFormat::OpenExrMultilayer | ImageFormat::OpenExr => Some(".exr"),
            ImageFormat::Hdr => Some(".hdr"),
            ImageFormat::Tiff => Some(".tif"),
            ImageFormat::Webp => Some(".webp"),
            ImageFormat::AviJpeg | ImageFormat::AviRaw | ImageFormat::Ffmpeg => None,
        }
    }

    /// Whether a single render result can be saved in this format.
    #[must_use]
    pub const fn is_image(self) -> bool {
        self.extension().is_some()
    }

    const fn identifier(self) -> &'static str {
        match self {
            ImageFormat::Bmp => "BMP",
            ImageFormat::Iris => "IRIS",
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Jpeg2000 => "JPEG2000",
            ImageFormat::Targa => "TARGA",
            ImageFormat::TargaRaw => "TARGA_RAW",
            ImageFormat::Cineon => "CINEON",
            ImageFormat::Dpx => "DPX",
            ImageFormat::OpenExrMultilayer => "OPEN_EXR_MULTILAYER",
            ImageFormat::OpenExr => "OPEN_EXR",
            ImageFormat::Hdr => "HDR",
            ImageFormat::Tiff => "TIFF",
            ImageFormat::Webp => "WEBP",
            ImageFormat::AviJpeg => "AVI_JPEG",
            ImageFormat::AviRaw => "AVI_RAW",
            ImageFormat::Ffmpeg => "FFMPEG",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for ImageFormat {
    type Err = AutosaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s.to_uppercase().as_str() {
            "BMP" => ImageFormat::Bmp,
            "IRIS" => ImageFormat::Iris,
            "PNG" => ImageFormat::Png,
            "JPEG" | "JPG" => ImageFormat::Jpeg,
            "JPEG2000" => ImageFormat::Jpeg2000,
            "TARGA" => ImageFormat::Targa,
            "TARGA_RAW" => ImageFormat::TargaRaw,
            "CINEON" => ImageFormat::Cineon,
            "DPX" => ImageFormat::Dpx,
            "OPEN_EXR_MULTILAYER" => ImageFormat::OpenExrMultilayer,
            "OPEN_EXR" | "EXR" => ImageFormat::OpenExr,
            "HDR" => ImageFormat::Hdr,
            "TIFF" => ImageFormat::Tiff,
            "WEBP" => ImageFormat::Webp,
            "AVI_JPEG" => ImageFormat::AviJpeg,
            "AVI_RAW" => ImageFormat::AviRaw,
            "FFMPEG" => ImageFormat::Ffmpeg,
            _ => {
                return Err(AutosaveError::Other {
                    message: format!("Unknown image format '{s}'"),
                });
            }
        };
        Ok(format)
    }
}

/// Format used for autosaved images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileFormatChoice {
    /// Same format as the scene output settings
    Scene,
    Png,
    #[default]
    Jpeg,
    OpenExr,
}

impl FileFormatChoice {
    /// Resolve the concrete format. `None` when `Scene` points at a movie format.
    #[must_use]
    pub fn resolve(self, scene_format: ImageFormat) -> Option<ImageFormat> {
        match self {
            FileFormatChoice::Scene => scene_format.is_image().then_some(scene_format),
            FileFormatChoice::Png => Some(ImageFormat::Png),
            FileFormatChoice::Jpeg => Some(ImageFormat::Jpeg),
            FileFormatChoice::OpenExr => Some(ImageFormat::OpenExr),
        }
    }
}

impl FromStr for FileFormatChoice {
    type Err = AutosaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SCENE" => Ok(FileFormatChoice::Scene),
            "PNG" => Ok(FileFormatChoice::Png),
            "JPEG" | "JPG" => Ok(FileFormatChoice::Jpeg),
            "OPEN_EXR" | "EXR" => Ok(FileFormatChoice::OpenExr),
            _ => Err(AutosaveError::Other {
                message: format!("Unknown autosave format '{s}' (expected SCENE, PNG, JPEG or OPEN_EXR)"),
            }),
        }
    }
}
