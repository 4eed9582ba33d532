// SPDX-License-Identifier: PMPL-1.0-or-later

//! Photo discovery and processing
//!
//! Finds the JPEG files of a source directory, reads their metadata and
//! writes one resized copy per target resolution into the site's `img/`
//! directory. Photos are processed in parallel; the resulting list is sorted
//! by file name.

pub mod metadata;
pub mod resize;

use crate::types::{Photo, ProcessingOptions, TARGET_RESOLUTIONS};
use anyhow::{bail, Context, Result};
use image::ImageFormat;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

pub use metadata::{read_description_file, read_exif, ExifSummary};
pub use resize::{limited_size, resize_image};

/// Result of one processing run
#[derive(Debug, Clone)]
pub struct ProcessedGallery {
    pub photos: Vec<Photo>,
    pub statistics: GalleryStatistics,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryStatistics {
    pub photo_count: usize,
    pub title_count: usize,
    pub description_count: usize,
    pub duration: Duration,
    /// Every EXIF tag seen on at least one photo
    pub exif_tags: BTreeSet<String>,
}

impl GalleryStatistics {
    pub fn collect(photos: &[Photo], duration: Duration) -> Self {
        Self {
            photo_count: photos.len(),
            title_count: photos.iter().filter(|p| p.title().is_some()).count(),
            description_count: photos.iter().filter(|p| p.description().is_some()).count(),
            duration,
            exif_tags: photos
                .iter()
                .flat_map(|p| p.exif.keys().cloned())
                .collect(),
        }
    }
}

/// Whether the file content is a supported input image.
///
/// Detection is by magic bytes, so the extension does not matter.
pub fn is_image(path: &Path) -> bool {
    let mut header = [0u8; 16];
    let read = match File::open(path).and_then(|mut file| file.read(&mut header)) {
        Ok(read) => read,
        Err(_) => return false,
    };
    matches!(image::guess_format(&header[..read]), Ok(ImageFormat::Jpeg))
}

/// Fail unless `source_dir` is an existing directory
pub fn check_source_directory(source_dir: &Path) -> Result<()> {
    if !source_dir.is_dir() {
        bail!("Not a directory: {}", source_dir.display());
    }
    Ok(())
}

/// All supported photos directly inside `source_dir`, sorted by path
pub fn find_photos(source_dir: &Path) -> Result<Vec<PathBuf>> {
    check_source_directory(source_dir)?;
    let name = source_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| source_dir.display().to_string());
    println!("Searching for photos in {}", name);

    let mut photos: Vec<PathBuf> = WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_image(path))
        .collect();

    photos.sort();
    Ok(photos)
}

/// Create `img/<width>` for every target resolution.
///
/// Returns the directories keyed by max width.
pub fn create_image_directories(destination_dir: &Path) -> Result<BTreeMap<u32, PathBuf>> {
    let image_dir = destination_dir.join("img");
    let mut dirs = BTreeMap::new();
    for (max_width, _) in TARGET_RESOLUTIONS {
        let target = image_dir.join(max_width.to_string());
        fs::create_dir_all(&target).with_context(|| format!("creating {}", target.display()))?;
        dirs.insert(max_width, target);
    }
    Ok(dirs)
}

/// Name every size directory uses for the copies of `source`
pub fn output_file_name(source: &Path, options: &ProcessingOptions) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "photo".to_string());
    format!("{}.{}", stem, options.format.extension())
}

/// Read, resize and describe one photo
pub fn process_photo(
    source: &Path,
    destination_dirs: &BTreeMap<u32, PathBuf>,
    options: &ProcessingOptions,
) -> Result<Photo> {
    let bytes = fs::read(source).with_context(|| format!("reading {}", source.display()))?;
    let exif = read_exif(&bytes, source);
    let text = read_description_file(source)?;
    let translations = metadata::read_translations(source, &options.languages)?;

    let decoded = image::load_from_memory(&bytes)
        .with_context(|| format!("decoding {}", source.display()))?;
    let image = resize::apply_orientation(decoded, exif.orientation);

    let file_name = output_file_name(source, options);
    let mut largest = (0, 0);
    for (max_width, max_height) in TARGET_RESOLUTIONS {
        let dir = destination_dirs
            .get(&max_width)
            .with_context(|| format!("no image directory for width {}", max_width))?;
        let size = resize_image(
            &image,
            &dir.join(&file_name),
            (max_width, max_height),
            options.format,
            options.quality,
        )?;
        if size.0 > largest.0 {
            largest = size;
        }
    }

    let mut sizes: Vec<u32> = destination_dirs.keys().copied().collect();
    sizes.sort_unstable();
    println!("Created {} resized copies of {}", sizes.len(), file_name);

    Ok(Photo {
        file_name,
        sizes,
        width: largest.0,
        height: largest.1,
        format: options.format,
        text,
        translations,
        exif: exif.fields,
        taken_at: exif.taken_at,
    })
}

/// Scan `source_dir`, then convert and resize every photo into
/// `destination_dir`.
pub fn process_photos(
    source_dir: &Path,
    destination_dir: &Path,
    options: &ProcessingOptions,
) -> Result<ProcessedGallery> {
    let start = Instant::now();
    let sources = find_photos(source_dir)?;
    check_unique_names(&sources, options)?;
    let destination_dirs = create_image_directories(destination_dir)?;

    for source in &sources {
        if let Some(name) = source.file_name() {
            println!("Found {}", name.to_string_lossy());
        }
    }

    let mut photos = sources
        .par_iter()
        .map(|source| process_photo(source, &destination_dirs, options))
        .collect::<Result<Vec<Photo>>>()?;

    photos.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    let statistics = GalleryStatistics::collect(&photos, start.elapsed());
    Ok(ProcessedGallery { photos, statistics })
}

/// `beach.jpg` and `beach.JPEG` would overwrite each other's copies
fn check_unique_names(sources: &[PathBuf], options: &ProcessingOptions) -> Result<()> {
    let mut seen: BTreeMap<String, &Path> = BTreeMap::new();
    for source in sources {
        let name = output_file_name(source, options);
        if let Some(previous) = seen.insert(name.clone(), source.as_path()) {
            bail!(
                "{} and {} would both be written as {}",
                previous.display(),
                source.display(),
                name
            );
        }
    }
    Ok(())
}
