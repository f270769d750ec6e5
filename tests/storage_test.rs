//! Local media storage and upload validation helpers.
//!
//! Run with: `cargo test --test storage_test`
use std::path::PathBuf;

use studio_backend::models::media::MediaType;
use studio_backend::storage::local::LocalStorage;
use studio_backend::storage::{
    MAX_IMAGE_BYTES, MAX_VIDEO_BYTES, MediaStorage, file_extension, max_bytes_for, media_type_for,
    unique_object_name,
};

#[tokio::test]
async fn test_store_writes_file_and_returns_public_url() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(PathBuf::from(dir.path()));

    let url = storage.store("cover.png", b"fake png bytes").await.unwrap();

    assert_eq!(url, "/static/uploads/cover.png");
    let on_disk = tokio::fs::read(dir.path().join("cover.png")).await.unwrap();
    assert_eq!(on_disk, b"fake png bytes");
}

#[tokio::test]
async fn test_delete_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(PathBuf::from(dir.path()));

    let url = storage.store("gone.jpg", b"bytes").await.unwrap();
    storage.delete(&url).await.unwrap();

    assert!(!dir.path().join("gone.jpg").exists());
}

#[tokio::test]
async fn test_delete_of_missing_file_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(PathBuf::from(dir.path()));

    storage
        .delete("/static/uploads/never-existed.png")
        .await
        .expect("missing files should not be an error");
}

#[tokio::test]
async fn test_delete_ignores_path_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let outside = dir.path().join("outside.txt");
    tokio::fs::write(&outside, b"keep me").await.unwrap();

    let uploads = dir.path().join("uploads");
    let storage = LocalStorage::new(uploads);

    // Only the final component counts, so this cannot reach outside.txt.
    storage
        .delete("/static/uploads/../outside.txt")
        .await
        .unwrap();

    assert!(outside.exists());
}

#[test]
fn test_extension_is_lowercased() {
    assert_eq!(file_extension("PHOTO.JPG").as_deref(), Some("jpg"));
    assert_eq!(file_extension("clip.Mp4").as_deref(), Some("mp4"));
    assert_eq!(file_extension("no_extension"), None);
}

#[test]
fn test_media_type_follows_the_allow_list() {
    assert_eq!(media_type_for("a.png"), Some(MediaType::Image));
    assert_eq!(media_type_for("b.webm"), Some(MediaType::Video));
    assert_eq!(media_type_for("ARCHIVE.ZIP"), None);
    assert_eq!(media_type_for("noext"), None);
}

#[test]
fn test_size_caps_per_media_type() {
    assert_eq!(max_bytes_for(MediaType::Image), MAX_IMAGE_BYTES);
    assert_eq!(max_bytes_for(MediaType::Video), MAX_VIDEO_BYTES);
    assert!(MAX_VIDEO_BYTES > MAX_IMAGE_BYTES);
}

#[test]
fn test_object_names_are_unique_but_keep_the_extension() {
    let a = unique_object_name("Original Photo.PNG");
    let b = unique_object_name("Original Photo.PNG");

    assert_ne!(a, b);
    assert!(a.ends_with(".png"));
    assert!(b.ends_with(".png"));
}
