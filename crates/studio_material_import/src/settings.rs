// SPDX-License-Identifier: MIT OR Apache-2.0
//! Import settings.
//!
//! Settings are read once before a batch and passed to the import session by
//! reference. They are stored as RON; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use studio_material_graph::LayoutConfig;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "import_settings.ron";

/// Primitive resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    /// 8-segment primitives (`p/8`)
    Low,
    /// Standard primitives
    #[default]
    Standard,
    /// 48-segment primitives (`p/48`)
    High,
}

/// Error loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed settings file
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Settings could not be serialized
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),

    /// Written by a newer version
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest supported version
        supported: u32,
    },
}

/// Settings snapshot for one import batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Settings format version
    pub version: u32,
    /// LDraw library root
    pub ldraw_path: PathBuf,
    /// Studio's bundled LDraw library root
    pub studio_ldraw_path: PathBuf,
    /// Search the Studio library before the LDraw library
    pub prefer_studio: bool,
    /// Search `unofficial` folders before the official ones
    pub prefer_unofficial: bool,
    /// Primitive resolution
    pub resolution: Resolution,
    /// Position nodes after import; otherwise only report unreached nodes
    pub arrange_nodes: bool,
    /// Layout parameters
    pub layout: LayoutConfig,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            ldraw_path: PathBuf::new(),
            studio_ldraw_path: PathBuf::new(),
            prefer_studio: false,
            prefer_unofficial: false,
            resolution: Resolution::default(),
            arrange_nodes: true,
            layout: LayoutConfig::default(),
        }
    }
}

impl ImportSettings {
    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let settings: ImportSettings = ron::from_str(&content)?;

        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(SettingsError::UnsupportedVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }

        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to load settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Library roots in search order
    pub fn library_roots(&self) -> Vec<PathBuf> {
        let ldraw = &self.ldraw_path;
        let studio = &self.studio_ldraw_path;
        let (first, second) = if self.prefer_studio { (studio, ldraw) } else { (ldraw, studio) };

        let official = [first.clone(), second.clone()];
        let unofficial = [first.join("unofficial"), second.join("unofficial")];
        if self.prefer_unofficial {
            unofficial.into_iter().chain(official).collect()
        } else {
            official.into_iter().chain(unofficial).collect()
        }
    }

    /// Directories searched for assets, in order.
    ///
    /// `document_dir` is the directory of the top-level file being imported
    /// and is searched first.
    pub fn search_dirs(&self, document_dir: Option<&Path>) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        let roots = document_dir.map(Path::to_path_buf).into_iter().chain(self.library_roots());

        for root in roots {
            let primitives = root.join("p");
            dirs.push(root.clone());
            dirs.push(primitives.clone());
            match self.resolution {
                Resolution::High => dirs.push(primitives.join("48")),
                Resolution::Low => dirs.push(primitives.join("8")),
                Resolution::Standard => {}
            }
            dirs.push(root.join("parts"));
            dirs.push(root.join("parts").join("textures"));
            dirs.push(root.join("models"));
        }
        dirs
    }
}
