//! File system utilities.

use crate::Result;
use std::path::Path;

/// Recognized video extensions (compared case-insensitively).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "ts", "m2ts",
];

/// Check if a path exists, is a directory and can be listed.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    if let Err(e) = std::fs::read_dir(path) {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            return Err(crate::Error::PermissionDenied(path.display().to_string()));
        }
        return Err(e.into());
    }
    Ok(())
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Check if an extension (without the dot) is a recognized video format.
pub fn is_video_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    VIDEO_EXTENSIONS.contains(&ext_lower.as_str())
}

/// Check if a file is a video file based on extension.
pub fn is_video_file(path: &Path) -> bool {
    get_extension(path)
        .map(|ext| is_video_extension(&ext))
        .unwrap_or(false)
}

/// Check if a filename indicates a sample file.
/// Matches filenames containing "sample" (case-insensitive) but not "sampler".
pub fn is_sample_filename(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    lower.contains("sample") && !lower.contains("sampler")
}

/// Check if a directory name holds extras rather than episodes.
pub fn is_extras_dir_name(name: &str) -> bool {
    const EXTRAS_NAMES: &[&str] = &[
        "extras",
        "extra",
        "featurettes",
        "featurette",
        "behind the scenes",
        "deleted scenes",
        "bonus",
        "special features",
        "sample",
        "samples",
    ];

    let lower = name.trim().to_lowercase();
    EXTRAS_NAMES.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(&PathBuf::from("episode.mkv")));
        assert!(is_video_file(&PathBuf::from("episode.MP4")));
        assert!(is_video_file(&PathBuf::from("episode.M2TS")));
        assert!(!is_video_file(&PathBuf::from("episode.srt")));
        assert!(!is_video_file(&PathBuf::from("episode.nfo")));
        assert!(!is_video_file(&PathBuf::from("mkv")));
    }

    #[test]
    fn test_all_registered_extensions() {
        for ext in ["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "ts", "m2ts"] {
            assert!(is_video_extension(ext), "{ext} should be recognized");
            assert!(is_video_extension(&ext.to_uppercase()));
        }
        assert!(!is_video_extension("mpg"));
    }

    #[test]
    fn test_is_sample_filename() {
        assert!(is_sample_filename("sample.mkv"));
        assert!(is_sample_filename("Show.S01E01-Sample.mkv"));
        assert!(!is_sample_filename("Show.S01E01.mkv"));
        assert!(!is_sample_filename("The.Sampler.E01.mkv"));
    }

    #[test]
    fn test_is_extras_dir_name() {
        assert!(is_extras_dir_name("Extras"));
        assert!(is_extras_dir_name("Sample"));
        assert!(!is_extras_dir_name("Season 1"));
    }

    #[test]
    fn test_ensure_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        assert!(ensure_directory(temp_dir.path()).is_ok());

        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            ensure_directory(&file),
            Err(crate::Error::NotADirectory(_))
        ));
        assert!(matches!(
            ensure_directory(&temp_dir.path().join("missing")),
            Err(crate::Error::PathNotFound(_))
        ));
    }
}
