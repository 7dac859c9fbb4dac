use crate::AssetError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Which material slot a texture feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureRole {
    Color,
    Roughness,
    Normal,
    Height,
}

impl TextureRole {
    /// Every role, in the order the material binds them.
    pub const ALL: [TextureRole; 4] = [
        TextureRole::Color,
        TextureRole::Roughness,
        TextureRole::Normal,
        TextureRole::Height,
    ];

    /// File name inside the texture directory.
    pub fn file_name(self) -> &'static str {
        match self {
            TextureRole::Color => "color.jpg",
            TextureRole::Roughness => "roughness.jpg",
            TextureRole::Normal => "normal.png",
            TextureRole::Height => "height.png",
        }
    }

    /// Pixel used when the map is missing: it leaves shading unchanged.
    pub fn neutral_pixel(self) -> [u8; 4] {
        match self {
            TextureRole::Color | TextureRole::Roughness => [255, 255, 255, 255],
            TextureRole::Normal => [128, 128, 255, 255],
            TextureRole::Height => [0, 0, 0, 255],
        }
    }

    /// Only albedo is authored in sRGB; the other maps hold linear data.
    pub fn is_srgb(self) -> bool {
        matches!(self, TextureRole::Color)
    }
}

impl fmt::Display for TextureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextureRole::Color => "color",
            TextureRole::Roughness => "roughness",
            TextureRole::Normal => "normal",
            TextureRole::Height => "height",
        };
        f.write_str(name)
    }
}

/// Decoded RGBA8 image ready for GPU upload.
#[derive(Clone, PartialEq, Eq)]
pub struct TextureData {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl fmt::Debug for TextureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureData")
            .field("label", &self.label)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

impl TextureData {
    /// Wrap tightly packed RGBA8 pixels. Fails if `pixels` does not hold
    /// exactly `width * height * 4` bytes or either side is zero.
    pub fn from_rgba8(
        label: impl Into<String>,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, AssetError> {
        let label = label.into();
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(AssetError::SizeMismatch {
                label,
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            label,
            width,
            height,
            pixels,
        })
    }

    /// 1x1 texture of a single color.
    pub fn solid(label: impl Into<String>, rgba: [u8; 4]) -> Self {
        Self {
            label: label.into(),
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }

    /// Decode any supported image format (PNG, JPEG) from memory.
    pub fn decode(label: impl Into<String>, bytes: &[u8]) -> Result<Self, AssetError> {
        let label = label.into();
        let img = image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
            label: label.clone(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(label, width, height, rgba.into_raw())
    }

    /// Read and decode an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::decode(path.display().to_string(), &bytes)?;
        tracing::debug!(
            "decoded {} ({}x{}, {} bytes)",
            data.label,
            data.width,
            data.height,
            data.pixels.len()
        );
        Ok(data)
    }

    /// Row pitch of the packed pixel buffer.
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

/// The four maps of the cube's standard material.
#[derive(Debug, Clone)]
pub struct TextureSet {
    pub color: Arc<TextureData>,
    pub roughness: Arc<TextureData>,
    pub normal: Arc<TextureData>,
    pub height: Arc<TextureData>,
}

impl TextureSet {
    /// A set made only of neutral fallbacks.
    pub fn neutral() -> Self {
        let solid = |role: TextureRole| {
            Arc::new(TextureData::solid(
                format!("{role}_fallback"),
                role.neutral_pixel(),
            ))
        };
        Self {
            color: solid(TextureRole::Color),
            roughness: solid(TextureRole::Roughness),
            normal: solid(TextureRole::Normal),
            height: solid(TextureRole::Height),
        }
    }

    /// Load every map from `dir`. A map that cannot be read or decoded is
    /// logged and replaced by its neutral fallback.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut set = Self::neutral();
        let mut loaded = 0;
        for role in TextureRole::ALL {
            match TextureData::load(dir.join(role.file_name())) {
                Ok(data) => {
                    *set.slot_mut(role) = Arc::new(data);
                    loaded += 1;
                }
                Err(e) => tracing::warn!("{role} map unavailable, using fallback: {e}"),
            }
        }
        tracing::info!("loaded {loaded}/4 textures from {}", dir.display());
        set
    }

    /// Map bound to `role`.
    pub fn get(&self, role: TextureRole) -> &Arc<TextureData> {
        match role {
            TextureRole::Color => &self.color,
            TextureRole::Roughness => &self.roughness,
            TextureRole::Normal => &self.normal,
            TextureRole::Height => &self.height,
        }
    }

    fn slot_mut(&mut self, role: TextureRole) -> &mut Arc<TextureData> {
        match role {
            TextureRole::Color => &mut self.color,
            TextureRole::Roughness => &mut self.roughness,
            TextureRole::Normal => &mut self.normal,
            TextureRole::Height => &mut self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn from_rgba8_checks_length() {
        assert!(TextureData::from_rgba8("ok", 2, 1, vec![0; 8]).is_ok());
        let err = TextureData::from_rgba8("bad", 2, 2, vec![0; 8]).unwrap_err();
        assert!(matches!(err, AssetError::SizeMismatch { len: 8, .. }));
        assert!(TextureData::from_rgba8("empty", 0, 0, Vec::new()).is_err());
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = TextureData::decode("noise", b"not an image").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn load_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("normal.png");
        RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let tex = TextureData::load(&path).unwrap();
        assert_eq!((tex.width, tex.height), (4, 2));
        assert_eq!(tex.bytes_per_row(), 16);
        assert_eq!(&tex.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextureData::load(dir.path().join("color.jpg")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn load_dir_falls_back_per_map() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 255]))
            .save(dir.path().join("height.png"))
            .unwrap();

        let set = TextureSet::load_dir(dir.path());
        assert_eq!((set.height.width, set.height.height), (2, 2));
        assert_eq!(set.color.pixels, TextureRole::Color.neutral_pixel().to_vec());
        assert_eq!(set.normal.pixels, vec![128, 128, 255, 255]);
        assert_eq!(set.roughness.width, 1);
    }

    #[test]
    fn neutral_set_matches_roles() {
        let set = TextureSet::neutral();
        for role in TextureRole::ALL {
            assert_eq!(set.get(role).pixels, role.neutral_pixel().to_vec());
        }
    }

    #[test]
    fn file_names_follow_material_layout() {
        let names: Vec<_> = TextureRole::ALL.iter().map(|r| r.file_name()).collect();
        assert_eq!(
            names,
            ["color.jpg", "roughness.jpg", "normal.png", "height.png"]
        );
        assert!(TextureRole::Color.is_srgb());
        assert!(!TextureRole::Normal.is_srgb());
    }
}
