//! Audio file discovery
//!
//! Describes each supported file the way an uploading client would: the
//! name it is sent under, the MIME type it declares and its size. The size
//! comes from directory metadata, so files over the upload ceiling are
//! turned away without being read.

use crate::api::{Upload, UploadLimits};
use crate::error::{Result, TuneprobeError};
use crate::types::AudioFormat;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// A supported audio file found on disk
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub format: AudioFormat,
    pub size_bytes: u64,
}

impl DiscoveredFile {
    fn from_entry(entry: &DirEntry) -> Option<Self> {
        if !entry.file_type().is_file() {
            return None;
        }

        let format = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(AudioFormat::from_extension)?;

        let size_bytes = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                warn!("Skipping {}: {}", entry.path().display(), e);
                return None;
            }
        };

        Some(Self {
            path: entry.path().to_path_buf(),
            format,
            size_bytes,
        })
    }

    /// Name the file is uploaded under
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// MIME type a client would declare for this file
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn exceeds(&self, limits: &UploadLimits) -> bool {
        self.size_bytes > limits.max_bytes
    }

    /// Read the file into an upload
    ///
    /// Oversized files fail with `FileTooLarge` before any bytes are read.
    pub fn read_upload(&self, limits: &UploadLimits) -> Result<Upload> {
        if self.exceeds(limits) {
            return Err(TuneprobeError::FileTooLarge {
                size: self.size_bytes,
                limit: limits.max_bytes,
            });
        }

        let bytes = std::fs::read(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TuneprobeError::FileNotFound(self.path.clone()),
            _ => TuneprobeError::Io(e),
        })?;

        Ok(Upload::new(self.file_name(), self.mime_type(), bytes))
    }
}

/// Find supported audio files under `input` (a file or a directory)
///
/// Entries come back in path order so reports are stable between runs.
/// Naming a single file with an unsupported extension is an error; inside
/// a directory such files are skipped.
pub fn scan(input: &Path, recursive: bool) -> Result<Vec<DiscoveredFile>> {
    if !input.exists() {
        return Err(TuneprobeError::FileNotFound(input.to_path_buf()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let files: Vec<DiscoveredFile> = WalkDir::new(input)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| {
            entry
                .map_err(|e| debug!("Skipping unreadable entry: {}", e))
                .ok()
        })
        .filter_map(|entry| DiscoveredFile::from_entry(&entry))
        .inspect(|file| debug!("Discovered: {} ({})", file.path.display(), file.mime_type()))
        .collect();

    if input.is_file() && files.is_empty() {
        return Err(TuneprobeError::UnsupportedFormat {
            path: input.to_path_buf(),
            format: input
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        });
    }

    info!("Discovered {} audio files", files.len());
    if files.is_empty() {
        warn!("No supported audio files found in {}", input.display());
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.wav"), b"x").unwrap();
        fs::write(dir.path().join("a.mp3"), b"xy").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let files = scan(dir.path(), true).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].path.ends_with("a.mp3"));
        assert_eq!(files[0].mime_type(), "audio/mpeg");
        assert_eq!(files[0].size_bytes, 2);
        assert!(files[1].path.ends_with("b.wav"));
    }

    #[test]
    fn test_scan_orders_nested_files_by_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("m")).unwrap();
        fs::write(dir.path().join("z.wav"), b"x").unwrap();
        fs::write(dir.path().join("m").join("inner.flac"), b"x").unwrap();
        fs::write(dir.path().join("a.ogg"), b"x").unwrap();

        let names: Vec<String> = scan(dir.path(), true)
            .unwrap()
            .iter()
            .map(|f| f.file_name())
            .collect();
        assert_eq!(names, ["a.ogg", "inner.flac", "z.wav"]);
    }

    #[test]
    fn test_scan_respects_recursion_flag() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.flac"), b"x").unwrap();

        assert_eq!(scan(dir.path(), true).unwrap().len(), 1);
        assert!(scan(dir.path(), false).unwrap().is_empty());
    }

    #[test]
    fn test_scan_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Track.AIFF");
        fs::write(&path, b"abc").unwrap();

        let files = scan(&path, false).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].format, AudioFormat::Aiff);
        assert_eq!(files[0].file_name(), "Track.AIFF");
    }

    #[test]
    fn test_scan_single_unsupported_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cover.jpg");
        fs::write(&path, b"x").unwrap();

        let err = scan(&path, false).unwrap_err();
        assert!(matches!(err, TuneprobeError::UnsupportedFormat { ref format, .. } if format == "jpg"));
    }

    #[test]
    fn test_scan_missing_path() {
        let err = scan(Path::new("/does/not/exist"), true).unwrap_err();
        assert!(matches!(err, TuneprobeError::FileNotFound(_)));
    }

    #[test]
    fn test_read_upload_uses_discovered_metadata() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("song.m4a"), b"payload").unwrap();

        let file = &scan(dir.path(), true).unwrap()[0];
        let upload = file.read_upload(&UploadLimits::default()).unwrap();
        assert_eq!(upload.file_name, "song.m4a");
        assert_eq!(upload.mime_type, "audio/mp4");
        assert_eq!(upload.field_name, "audio");
        assert_eq!(upload.bytes, b"payload");
    }

    #[test]
    fn test_read_upload_refuses_oversized_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("big.wav"), vec![0u8; 64]).unwrap();

        let file = &scan(dir.path(), true).unwrap()[0];
        let limits = UploadLimits {
            max_bytes: 63,
            ..UploadLimits::default()
        };
        assert!(file.exceeds(&limits));
        let err = file.read_upload(&limits).unwrap_err();
        assert!(matches!(err, TuneprobeError::FileTooLarge { size: 64, limit: 63 }));
    }

    #[test]
    fn test_read_upload_after_file_removed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.wav");
        fs::write(&path, b"x").unwrap();

        let file = scan(&path, false).unwrap().remove(0);
        fs::remove_file(&path).unwrap();
        let err = file.read_upload(&UploadLimits::default()).unwrap_err();
        assert!(matches!(err, TuneprobeError::FileNotFound(_)));
    }
}
