// SPDX-License-Identifier: PMPL-1.0-or-later

//! Site directory handling, theme loading and page generation

use image::{ImageFormat, Rgb, RgbImage};
use phogg::config::SiteConfig;
use phogg::gallery::process_photos;
use phogg::site::{self, copy_web_bundle, create_site_directory, generate_site, SiteOptions, Theme};
use phogg::types::ProcessingOptions;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the `phogg` binary from `workdir`, so no stray `site.toml` is picked up
fn run_phogg(workdir: &Path, args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_phogg"))
        .current_dir(workdir)
        .args(args)
        .output()
        .unwrap()
}

fn previous_site(root: &Path) -> std::path::PathBuf {
    let destination = root.join("site");
    fs::create_dir(&destination).unwrap();
    fs::write(destination.join("index.html"), "previous site").unwrap();
    destination
}

#[test]
fn existing_destination_requires_force() {
    let root = TempDir::new().unwrap();
    let destination = root.path().join("site");
    fs::create_dir(&destination).unwrap();
    fs::write(destination.join("old.html"), "stale").unwrap();

    let err = create_site_directory(&destination, false).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert!(destination.join("old.html").exists());

    create_site_directory(&destination, true).unwrap();
    assert!(destination.is_dir());
    assert!(!destination.join("old.html").exists());
}

#[test]
fn missing_destination_is_created() {
    let root = TempDir::new().unwrap();
    let destination = root.path().join("out").join("site");
    let created = create_site_directory(&destination, false).unwrap();
    assert_eq!(created, destination);
    assert!(destination.is_dir());
}

#[test]
fn builtin_theme_writes_page_and_stylesheet() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    let image = RgbImage::from_pixel(16, 9, Rgb([40, 90, 160]));
    image
        .save_with_format(source.path().join("sea.jpg"), ImageFormat::Jpeg)
        .unwrap();
    fs::write(source.path().join("sea.txt"), "Sea\nWaves\n").unwrap();
    fs::write(source.path().join("sea.de.txt"), "Meer\nWellen\n").unwrap();

    let config = SiteConfig::parse("title = \"Coast\"\nlanguages = [\"en\", \"de\"]\n").unwrap();
    let options = ProcessingOptions {
        languages: config.languages.clone(),
        ..ProcessingOptions::default()
    };
    let processed = process_photos(source.path(), destination.path(), &options).unwrap();

    let index = generate_site(
        &config,
        &processed.photos,
        destination.path(),
        &SiteOptions::default(),
    )
    .unwrap();

    assert_eq!(index, destination.path().join("index.html"));
    assert!(destination.path().join("style.css").is_file());

    let html = fs::read_to_string(index).unwrap();
    assert!(html.contains("<title>Coast</title>"));
    assert!(html.contains(r#"data-primary="en" data-secondary="de""#));
    assert!(html.contains("Waves"));
    assert!(html.contains("Wellen"));
    assert!(html.contains("sea.jpeg 1280w"));
}

#[test]
fn custom_theme_renders_and_copies_static_files() {
    let theme_dir = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    fs::write(
        theme_dir.path().join("index.jinja"),
        "<h1>{{ title }}</h1><p>{{ photographer }}</p><p>{{ photos|length }}</p>",
    )
    .unwrap();
    fs::create_dir_all(theme_dir.path().join("static/fonts")).unwrap();
    fs::write(theme_dir.path().join("static/site.css"), "body {}").unwrap();
    fs::write(theme_dir.path().join("static/fonts/serif.woff2"), [0u8; 4]).unwrap();

    let config = SiteConfig::parse("title = \"Night & Day\"\nphotographer = \"Ada\"\n").unwrap();
    let options = SiteOptions {
        theme: Theme::Directory(theme_dir.path().to_path_buf()),
        web_bundle: None,
    };
    generate_site(&config, &[], destination.path(), &options).unwrap();

    let html = fs::read_to_string(destination.path().join("index.html")).unwrap();
    assert_eq!(html, "<h1>Night &amp; Day</h1><p>Ada</p><p>0</p>");
    assert!(destination.path().join("site.css").is_file());
    assert!(destination.path().join("fonts/serif.woff2").is_file());
}

#[test]
fn theme_without_index_is_rejected() {
    let theme_dir = TempDir::new().unwrap();
    let theme = Theme::Directory(theme_dir.path().to_path_buf());
    let env = theme.environment().unwrap();

    let err = site::load_template(&env, &theme).unwrap_err();
    assert!(err.to_string().contains("no index.jinja found"));
}

#[test]
fn missing_theme_directory_is_rejected() {
    let root = TempDir::new().unwrap();
    let theme = Theme::Directory(root.path().join("absent"));
    assert!(theme.environment().is_err());
}

#[test]
fn web_bundle_is_published_as_pkg() {
    let bundle = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    fs::write(bundle.path().join("phogg.js"), "export default function init() {}").unwrap();
    fs::write(bundle.path().join("phogg_bg.wasm"), b"\0asm").unwrap();

    let copied = copy_web_bundle(bundle.path(), destination.path()).unwrap();
    assert_eq!(copied.len(), 2);
    assert!(destination.path().join("pkg/phogg.js").is_file());
    assert!(destination.path().join("pkg/phogg_bg.wasm").is_file());
}

#[test]
fn web_bundle_without_module_is_rejected() {
    let bundle = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    fs::write(bundle.path().join("phogg.js"), "").unwrap();

    let err = copy_web_bundle(bundle.path(), destination.path()).unwrap_err();
    assert!(err.to_string().contains("no .wasm module"));
}

#[test]
fn page_loads_bundle_when_published() {
    let bundle = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    fs::write(bundle.path().join("phogg_bg.wasm"), b"\0asm").unwrap();

    let options = SiteOptions {
        theme: Theme::Builtin,
        web_bundle: Some(bundle.path().to_path_buf()),
    };
    generate_site(&SiteConfig::default(), &[], destination.path(), &options).unwrap();

    let html = fs::read_to_string(destination.path().join("index.html")).unwrap();
    assert!(html.contains("./pkg/phogg.js"));
    assert!(destination.path().join("pkg/phogg_bg.wasm").is_file());
}

#[test]
fn bad_web_bundle_keeps_previous_site() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("photos");
    fs::create_dir(&source).unwrap();
    let destination = previous_site(root.path());
    let bundle = root.path().join("missing-pkg");

    let output = run_phogg(
        root.path(),
        &[
            OsStr::new("--source"),
            source.as_os_str(),
            OsStr::new("--destination"),
            destination.as_os_str(),
            OsStr::new("--force"),
            OsStr::new("--web-bundle"),
            bundle.as_os_str(),
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("web bundle directory not found"));
    assert_eq!(
        fs::read_to_string(destination.join("index.html")).unwrap(),
        "previous site"
    );
    assert!(!destination.join("img").exists());
}

#[test]
fn bundle_without_module_keeps_previous_site() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("photos");
    fs::create_dir(&source).unwrap();
    let destination = previous_site(root.path());
    let bundle = root.path().join("pkg");
    fs::create_dir(&bundle).unwrap();
    fs::write(bundle.join("phogg.js"), "").unwrap();

    let output = run_phogg(
        root.path(),
        &[
            OsStr::new("--source"),
            source.as_os_str(),
            OsStr::new("--destination"),
            destination.as_os_str(),
            OsStr::new("--force"),
            OsStr::new("--web-bundle"),
            bundle.as_os_str(),
        ],
    );

    assert!(!output.status.success());
    assert_eq!(
        fs::read_to_string(destination.join("index.html")).unwrap(),
        "previous site"
    );
}

#[test]
fn missing_source_keeps_previous_site() {
    let root = TempDir::new().unwrap();
    let destination = previous_site(root.path());
    let source = root.path().join("no-such-photos");

    let output = run_phogg(
        root.path(),
        &[
            OsStr::new("--source"),
            source.as_os_str(),
            OsStr::new("--destination"),
            destination.as_os_str(),
            OsStr::new("--force"),
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not a directory"));
    assert!(stderr.contains("Aborted"));
    assert_eq!(
        fs::read_to_string(destination.join("index.html")).unwrap(),
        "previous site"
    );
    assert!(!destination.join("style.css").exists());
}

#[test]
fn forced_rebuild_replaces_previous_site() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("photos");
    fs::create_dir(&source).unwrap();
    let destination = previous_site(root.path());

    let output = run_phogg(
        root.path(),
        &[
            OsStr::new("--source"),
            source.as_os_str(),
            OsStr::new("--destination"),
            destination.as_os_str(),
            OsStr::new("--force"),
        ],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let html = fs::read_to_string(destination.join("index.html")).unwrap();
    assert_ne!(html, "previous site");
    assert!(destination.join("style.css").is_file());
}
