#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// Path resolution
// =============================================================

#[test]
fn absolute_urls_pass_through() {
    let mut catalog = AssetCatalog::new();
    catalog.set_cdn("https://cdn.example/");
    assert_eq!(catalog.resolve("https://other.example/a.png"), "https://other.example/a.png");
    assert_eq!(catalog.resolve("//other.example/a.png"), "//other.example/a.png");
}

#[test]
fn relative_paths_get_the_cdn_prefix() {
    let mut catalog = AssetCatalog::new();
    catalog.set_cdn("cdn.example/");
    assert_eq!(catalog.resolve("assets/a.png"), "cdn.example/assets/a.png");
}

#[test]
fn cdn_prefix_is_applied_at_most_once() {
    let mut catalog = AssetCatalog::new();
    catalog.set_cdn("cdn.example/");
    assert_eq!(catalog.resolve("cdn.example/assets/a.png"), "cdn.example/assets/a.png");
}

#[test]
fn empty_cdn_leaves_paths_untouched() {
    let catalog = AssetCatalog::new();
    assert_eq!(catalog.resolve("assets/a.png"), "assets/a.png");
}

// =============================================================
// Stores
// =============================================================

#[test]
fn stored_images_are_retrievable_by_path() {
    let mut catalog = AssetCatalog::new();
    catalog.store_image("assets/a.png", ImageHandle(3));
    assert_eq!(catalog.image("assets/a.png"), Some(ImageHandle(3)));
    assert_eq!(catalog.image("assets/b.png"), None);
}

#[test]
fn stored_data_is_retrievable_by_name() {
    let mut catalog = AssetCatalog::new();
    catalog.store_data("config", json!({ "ui_color": "white" }));
    assert_eq!(catalog.data("config"), Some(&json!({ "ui_color": "white" })));
    assert_eq!(catalog.data("missing"), None);
}

#[test]
fn storing_again_overwrites() {
    let mut catalog = AssetCatalog::new();
    catalog.store_image("a.png", ImageHandle(1));
    catalog.store_image("a.png", ImageHandle(2));
    assert_eq!(catalog.image("a.png"), Some(ImageHandle(2)));
}

// =============================================================
// LoaderState
// =============================================================

fn loader(paths: &[&str]) -> LoaderState {
    LoaderState::new(paths.iter().map(|p| (*p).to_owned()).collect())
}

#[test]
fn marks_report_running_percentages() {
    let mut state = loader(&["a", "b", "c", "d"]);
    assert_eq!(state.mark_loaded("a"), Some(25.0));
    assert_eq!(state.mark_loaded("b"), Some(50.0));
    assert_eq!(state.mark_loaded("c"), Some(75.0));
    assert_eq!(state.mark_loaded("d"), Some(100.0));
    assert!(state.is_complete());
}

#[test]
fn report_order_does_not_matter() {
    let mut state = loader(&["a", "b"]);
    assert_eq!(state.mark_loaded("b"), Some(50.0));
    assert_eq!(state.mark_loaded("a"), Some(100.0));
}

#[test]
fn duplicate_marks_are_rejected() {
    let mut state = loader(&["a", "b"]);
    state.mark_loaded("a");
    assert_eq!(state.mark_loaded("a"), None);
    assert!(!state.is_complete());
}

#[test]
fn unknown_paths_are_rejected() {
    let mut state = loader(&["a"]);
    assert_eq!(state.mark_loaded("zzz"), None);
    assert!(!state.is_complete());
}
