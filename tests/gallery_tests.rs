// SPDX-License-Identifier: PMPL-1.0-or-later

//! Photo discovery and processing on real files

use image::{ImageFormat, Rgb, RgbImage};
use phogg::gallery::{self, find_photos, process_photos};
use phogg::types::{OutputFormat, ProcessingOptions, TARGET_RESOLUTIONS};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_jpeg(path: &Path, width: u32, height: u32) {
    let image = RgbImage::from_fn(width, height, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 128]));
    image.save_with_format(path, ImageFormat::Jpeg).unwrap();
}

fn options(languages: &[&str]) -> ProcessingOptions {
    ProcessingOptions {
        languages: languages.iter().map(|code| code.to_string()).collect(),
        ..ProcessingOptions::default()
    }
}

#[test]
fn find_photos_detects_jpeg_by_content() {
    let source = TempDir::new().unwrap();
    write_jpeg(&source.path().join("b.jpg"), 8, 6);
    write_jpeg(&source.path().join("a_without_extension"), 8, 6);
    fs::write(source.path().join("fake.jpg"), "not a photo").unwrap();
    fs::write(source.path().join("b.txt"), "Title\n").unwrap();

    let photos = find_photos(source.path()).unwrap();
    let names: Vec<String> = photos
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a_without_extension", "b.jpg"]);
}

#[test]
fn find_photos_does_not_descend() {
    let source = TempDir::new().unwrap();
    let nested = source.path().join("nested");
    fs::create_dir(&nested).unwrap();
    write_jpeg(&nested.join("deep.jpg"), 8, 6);

    assert!(find_photos(source.path()).unwrap().is_empty());
}

#[test]
fn find_photos_rejects_missing_directory() {
    let source = TempDir::new().unwrap();
    assert!(find_photos(&source.path().join("missing")).is_err());
}

#[test]
fn processing_writes_every_resolution() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    write_jpeg(&source.path().join("dunes.jpg"), 64, 48);

    let processed = process_photos(source.path(), destination.path(), &options(&["en", "de"])).unwrap();
    assert_eq!(processed.photos.len(), 1);

    let photo = &processed.photos[0];
    assert_eq!(photo.file_name, "dunes.jpeg");
    assert_eq!(photo.sizes, vec![320, 640, 1280, 1920]);
    assert_eq!((photo.width, photo.height), (1920, 1440));

    for (max_width, _) in TARGET_RESOLUTIONS {
        let copy = destination
            .path()
            .join("img")
            .join(max_width.to_string())
            .join("dunes.jpeg");
        let (width, _) = image::image_dimensions(&copy).unwrap();
        assert_eq!(width, max_width);
    }
    assert!(!destination.path().join("img/320/dunes.jpeg.tmp").exists());
}

#[test]
fn portrait_photos_are_bound_by_height() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    write_jpeg(&source.path().join("tower.jpg"), 30, 60);

    process_photos(source.path(), destination.path(), &options(&["en", "de"])).unwrap();
    let dims = image::image_dimensions(destination.path().join("img/320/tower.jpeg")).unwrap();
    assert_eq!(dims, (90, 180));
}

#[test]
fn webp_output_uses_webp_names() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    write_jpeg(&source.path().join("lake.jpg"), 16, 9);

    let opts = ProcessingOptions {
        format: OutputFormat::Webp,
        ..options(&["en", "de"])
    };
    let processed = process_photos(source.path(), destination.path(), &opts).unwrap();
    assert_eq!(processed.photos[0].file_name, "lake.webp");

    let copy = destination.path().join("img/640/lake.webp");
    assert_eq!(
        image::ImageFormat::from_path(&copy).unwrap(),
        image::ImageFormat::WebP
    );
    assert_eq!(image::image_dimensions(&copy).unwrap().0, 640);
}

#[test]
fn description_files_and_translations_are_read() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    write_jpeg(&source.path().join("harbour.jpg"), 16, 9);
    write_jpeg(&source.path().join("market.jpg"), 16, 9);
    fs::write(source.path().join("harbour.txt"), "Harbour\nBoats at dawn\n").unwrap();
    fs::write(source.path().join("harbour.de.txt"), "Hafen\nBoote im Morgengrauen\n").unwrap();
    // Windows-1252 encoded "Marché"
    fs::write(source.path().join("market.txt"), b"March\xe9\n").unwrap();

    let processed = process_photos(source.path(), destination.path(), &options(&["en", "de"])).unwrap();
    let harbour = &processed.photos[0];
    let market = &processed.photos[1];

    assert_eq!(harbour.title(), Some("Harbour"));
    assert_eq!(harbour.description(), Some("Boats at dawn"));
    assert_eq!(harbour.text_for("de").title.as_deref(), Some("Hafen"));
    assert_eq!(harbour.text_for("en").title.as_deref(), Some("Harbour"));

    assert_eq!(market.title(), Some("Marché"));
    assert_eq!(market.description(), None);

    let stats = &processed.statistics;
    assert_eq!(stats.photo_count, 2);
    assert_eq!(stats.title_count, 2);
    assert_eq!(stats.description_count, 1);
}

#[test]
fn colliding_output_names_abort_processing() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    write_jpeg(&source.path().join("beach.jpg"), 8, 6);
    write_jpeg(&source.path().join("beach.JPG"), 8, 6);

    let err = process_photos(source.path(), destination.path(), &options(&["en", "de"])).unwrap_err();
    assert!(err.to_string().contains("beach.jpeg"));
}

#[test]
fn empty_source_produces_empty_gallery() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();

    let processed = process_photos(source.path(), destination.path(), &options(&["en", "de"])).unwrap();
    assert!(processed.photos.is_empty());
    assert_eq!(processed.statistics.photo_count, 0);
    assert!(destination.path().join("img/1920").is_dir());
}

#[test]
fn image_detection_ignores_unreadable_paths() {
    let dir = TempDir::new().unwrap();
    assert!(!gallery::is_image(&dir.path().join("missing.jpg")));
    assert!(!gallery::is_image(dir.path()));
}

#[test]
fn missing_source_leaves_destination_untouched() {
    let root = TempDir::new().unwrap();
    let destination = root.path().join("site");
    fs::create_dir(&destination).unwrap();

    assert!(process_photos(&root.path().join("missing"), &destination, &options(&["en", "de"])).is_err());
    assert!(!destination.join("img").exists());
}
