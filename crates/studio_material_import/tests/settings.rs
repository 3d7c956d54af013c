// SPDX-License-Identifier: MIT OR Apache-2.0
//! Settings files and filesystem assets.

use std::path::Path;
use studio_material_graph::RankDirection;
use studio_material_import::{
    AssetError, AssetLoader, Document, FsAssetLoader, ImportSettings, Resolution, SettingsError,
};

#[test]
fn test_settings_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("import_settings.ron");

    let mut settings = ImportSettings {
        prefer_studio: true,
        resolution: Resolution::High,
        arrange_nodes: false,
        ..Default::default()
    };
    settings.layout.direction = RankDirection::TopDown;
    settings.save(&path).unwrap();

    let loaded = ImportSettings::load(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_newer_settings_version_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("import_settings.ron");
    std::fs::write(&path, "(version: 99)").unwrap();

    assert!(matches!(
        ImportSettings::load(&path),
        Err(SettingsError::UnsupportedVersion { found: 99, .. })
    ));
    assert_eq!(ImportSettings::load_or_default(&path), ImportSettings::default());
    assert_eq!(
        ImportSettings::load_or_default(&dir.path().join("missing.ron")),
        ImportSettings::default()
    );
}

#[test]
fn test_fs_loader_searches_textures_folder() {
    let library = tempfile::tempdir().unwrap();
    let textures = library.path().join("parts").join("textures");
    std::fs::create_dir_all(&textures).unwrap();
    image::RgbaImage::new(8, 4).save(textures.join("decal.png")).unwrap();

    let settings = ImportSettings {
        ldraw_path: library.path().to_path_buf(),
        ..Default::default()
    };
    let loader = FsAssetLoader::from_settings(&settings, None);

    let handle = loader.load_image(Path::new("decal.png")).unwrap();
    assert_eq!((handle.width, handle.height), (8, 4));
    assert!(!handle.placeholder);
    assert_eq!(handle.path, textures.join("decal.png"));

    assert!(matches!(
        loader.load_image(Path::new("other.png")),
        Err(AssetError::NotFound(_))
    ));
}

#[test]
fn test_unreadable_image_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.png"), b"not an image").unwrap();

    let loader = FsAssetLoader::new(vec![dir.path().to_path_buf()]);
    assert!(matches!(
        loader.load_image(Path::new("broken.png")),
        Err(AssetError::Decode { .. })
    ));
}

#[test]
fn test_document_load_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let xml = dir.path().join("red.xml");
    std::fs::write(
        &xml,
        r#"<materials><material name="Red"><shader><value name="V" value="1"/></shader></material></materials>"#,
    )
    .unwrap();
    let document = Document::load(&xml).unwrap();
    assert_eq!(document.units[0].name, "Red");

    let ron_path = dir.path().join("red.ron");
    std::fs::write(&ron_path, ron::to_string(&document).unwrap()).unwrap();
    assert_eq!(Document::load(&ron_path).unwrap(), document);

    let other = dir.path().join("red.txt");
    std::fs::write(&other, "").unwrap();
    assert!(Document::load(&other).is_err());
}
