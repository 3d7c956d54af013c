// SPDX-License-Identifier: MIT OR Apache-2.0
//! Image assets used by image texture nodes.

use crate::settings::ImportSettings;
use indexmap::IndexMap;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use studio_material_graph::ImageHandle;

/// Width and height of the placeholder image
pub const PLACEHOLDER_SIZE: u32 = 1;

/// Error loading an image
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssetError {
    /// No candidate path exists
    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but is not a readable image
    #[error("Failed to read image {}: {message}", path.display())]
    Decode {
        /// File that failed
        path: PathBuf,
        /// Decoder message
        message: String,
    },
}

impl AssetError {
    /// Path the error refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) => path,
            Self::Decode { path, .. } => path,
        }
    }
}

/// Source of images for image texture nodes
pub trait AssetLoader {
    /// Load an image by the path written in the document
    fn load_image(&self, path: &Path) -> Result<ImageHandle, AssetError>;
}

/// Blank stand-in for an image that could not be loaded
pub fn placeholder_image(path: &Path) -> ImageHandle {
    ImageHandle {
        path: path.to_path_buf(),
        width: PLACEHOLDER_SIZE,
        height: PLACEHOLDER_SIZE,
        placeholder: true,
    }
}

/// Loads images from the filesystem.
///
/// A path that exists as written is used directly; otherwise it is tried
/// relative to each search directory in order.
#[derive(Debug, Clone, Default)]
pub struct FsAssetLoader {
    search_dirs: Vec<PathBuf>,
}

impl FsAssetLoader {
    /// Create a loader with explicit search directories
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Create a loader searching the directories the settings describe
    pub fn from_settings(settings: &ImportSettings, document_dir: Option<&Path>) -> Self {
        Self::new(settings.search_dirs(document_dir))
    }

    /// Search directories in order
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// First existing file for a document path.
    ///
    /// Either `/` or `\` may separate components in the document path.
    pub fn locate(&self, path: &Path) -> Option<PathBuf> {
        let path = native_separators(path);
        if path.is_file() {
            return Some(path);
        }
        self.search_dirs
            .iter()
            .map(|dir| dir.join(&path))
            .find(|candidate| candidate.is_file())
    }
}

/// Rewrite both separator styles to the platform separator
fn native_separators(path: &Path) -> PathBuf {
    path.to_string_lossy()
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect::<String>()
        .into()
}

impl AssetLoader for FsAssetLoader {
    fn load_image(&self, path: &Path) -> Result<ImageHandle, AssetError> {
        let found = self
            .locate(path)
            .ok_or_else(|| AssetError::NotFound(path.to_path_buf()))?;
        let (width, height) = image::image_dimensions(&found).map_err(|e| AssetError::Decode {
            path: found.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!("Loaded image {} ({}x{})", found.display(), width, height);
        Ok(ImageHandle {
            path: found,
            width,
            height,
            placeholder: false,
        })
    }
}

/// In-memory images, keyed by document path
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetLoader {
    images: IndexMap<PathBuf, (u32, u32)>,
}

impl MemoryAssetLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image
    pub fn with_image(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.images.insert(path.into(), (width, height));
        self
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn load_image(&self, path: &Path) -> Result<ImageHandle, AssetError> {
        let (width, height) = self
            .images
            .get(path)
            .copied()
            .ok_or_else(|| AssetError::NotFound(path.to_path_buf()))?;
        Ok(ImageHandle {
            path: path.to_path_buf(),
            width,
            height,
            placeholder: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let handle = placeholder_image(Path::new("textures/missing.png"));
        assert!(handle.placeholder);
        assert_eq!((handle.width, handle.height), (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
        assert_eq!(handle.path, PathBuf::from("textures/missing.png"));
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryAssetLoader::new().with_image("decal.png", 64, 32);
        let handle = loader.load_image(Path::new("decal.png")).unwrap();
        assert_eq!((handle.width, handle.height), (64, 32));
        assert_eq!(
            loader.load_image(Path::new("other.png")),
            Err(AssetError::NotFound(PathBuf::from("other.png")))
        );
    }

    #[test]
    fn test_locate_accepts_either_separator() {
        let root = tempfile::tempdir().unwrap();
        let textures = root.path().join("parts").join("textures");
        std::fs::create_dir_all(&textures).unwrap();
        std::fs::write(textures.join("decal.png"), b"").unwrap();

        let loader = FsAssetLoader::new(vec![root.path().to_path_buf()]);
        let expected = Some(textures.join("decal.png"));
        assert_eq!(loader.locate(Path::new("parts\\textures\\decal.png")), expected);
        assert_eq!(loader.locate(Path::new("parts/textures/decal.png")), expected);
    }

    #[test]
    fn test_fs_loader_missing_file() {
        let loader = FsAssetLoader::new(vec![PathBuf::from("/nonexistent-studio-dir")]);
        let err = loader.load_image(Path::new("nothing-here.png")).unwrap_err();
        assert_eq!(err.path(), Path::new("nothing-here.png"));
    }
}
