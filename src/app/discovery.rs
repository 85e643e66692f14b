use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// How many discovered files a preview section lists, regardless of how many
/// exist on disk.
pub const PREVIEW_CAP: usize = 20;

/// Recursively collects files under `root` whose name ends with one of the
/// given suffixes, compared case-insensitively. Suffixes include the dot,
/// e.g. `".jpg"`.
///
/// A missing root yields an empty list, not an error. Order is directory
/// traversal order and is not guaranteed sorted; with more matches than the
/// preview cap, which files make the preview depends on that order.
pub fn discover_files(root: &Path, suffixes: &[&str]) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            suffixes.iter().any(|suffix| name.ends_with(suffix))
        })
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const IMAGE_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg", ".bmp", ".gif"];

    #[test]
    fn missing_root_yields_empty_list() {
        let found = discover_files(Path::new("/nonexistent/media/root"), IMAGE_SUFFIXES);
        assert!(found.is_empty());
    }

    #[test]
    fn matches_suffixes_case_insensitively_and_recursively() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("DCIM").join("Camera");
        fs::create_dir_all(&nested).expect("mkdir");
        fs::write(dir.path().join("a.PNG"), b"x").expect("write");
        fs::write(nested.join("b.jpeg"), b"x").expect("write");
        fs::write(nested.join("notes.txt"), b"x").expect("write");

        let mut names: Vec<String> = discover_files(dir.path(), IMAGE_SUFFIXES)
            .into_iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.PNG", "b.jpeg"]);
    }

    #[test]
    fn discovery_is_not_capped_even_when_previews_are() {
        let dir = tempfile::tempdir().expect("tempdir");
        for i in 0..(PREVIEW_CAP + 5) {
            fs::write(dir.path().join(format!("img_{i:03}.jpg")), b"x").expect("write");
        }
        let found = discover_files(dir.path(), IMAGE_SUFFIXES);
        assert_eq!(found.len(), PREVIEW_CAP + 5);
        assert_eq!(found.iter().take(PREVIEW_CAP).count(), PREVIEW_CAP);
    }
}
