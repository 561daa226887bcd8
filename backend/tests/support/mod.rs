#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Write;
use std::sync::Mutex;

use pilates_viz::db::repositories::LocalRepository;
use pilates_viz::models::{PoseDocument, VideoDocument};
use tempfile::NamedTempFile;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on drop (including on unwind) and serializes
/// access to the process environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs: `Some(v)` sets the variable,
/// `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Seed file with a handful of poses and videos.
pub const SAMPLE_SEED: &str = r#"{
  "poses": [
    { "nama_gerakan": "Hundred" },
    { "nama_gerakan": "Roll Up" },
    { "nama_gerakan": "Hundred" },
    { "nama_gerakan": "Teaser" },
    { "other_field": 1 }
  ],
  "pilates_videos": [
    { "title": "Pilates for Beginners", "channelTitle": "Core Studio", "publishedAt": "2021-01-15T10:00:00Z" },
    { "title": "Morning Pilates Flow", "channelTitle": "Core Studio", "publishedAt": "2023-02-01T07:30:00Z" },
    { "title": "Wall Pilates", "channelTitle": "Mat Club", "publishedAt": "2023-01-20T18:00:00Z" },
    { "title": "Missing channel", "publishedAt": "2023-03-01T00:00:00Z" }
  ]
}"#;

/// Write `contents` to a temporary file that lives as long as the handle.
pub fn temp_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

/// Repository holding the pose names and `(title, channel, published_at)` triples.
pub fn repository_with(poses: &[&str], videos: &[(&str, &str, &str)]) -> LocalRepository {
    let repo = LocalRepository::new();
    repo.insert_poses(poses.iter().map(|p| PoseDocument::new(*p)));
    repo.insert_videos(
        videos
            .iter()
            .map(|(t, c, p)| VideoDocument::new(*t, *c, *p)),
    );
    repo
}
