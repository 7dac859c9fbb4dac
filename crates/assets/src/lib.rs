//! Texture assets for the cube material.
//!
//! Images are decoded to tightly packed RGBA8 on the CPU. The renderer uploads
//! [`TextureData`] as-is and never touches the filesystem.
//!
//! # Invariants
//! - `pixels.len() == width * height * 4` for every `TextureData`.
//! - A [`TextureSet`] always holds all four maps; unreadable files are replaced
//!   by neutral 1x1 textures.

mod texture;

pub use texture::{TextureData, TextureRole, TextureSet};

use std::path::PathBuf;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {label}: {source}")]
    Decode {
        label: String,
        #[source]
        source: image::ImageError,
    },
    #[error("texture {label} is {width}x{height} but has {len} bytes of RGBA8 data")]
    SizeMismatch {
        label: String,
        width: u32,
        height: u32,
        len: usize,
    },
}
