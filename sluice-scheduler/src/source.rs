//! File job source
//!
//! Turns command-line inputs into the ordered job list of a run.

use anyhow::{Context, Result};
use sluice_core::domain::job::{Job, Parameters};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions the remote parser accepts
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "doc", "docx", "ppt", "pptx"];

/// Produces jobs from files and directories
///
/// Files are used as given. A directory contributes its direct children
/// with a supported extension, sorted by path.
#[derive(Debug, Clone, Default)]
pub struct FileJobSource {
    inputs: Vec<PathBuf>,
    parameters: Parameters,
}

impl FileJobSource {
    pub fn new<I, P>(inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            parameters: Parameters::new(),
        }
    }

    /// Sets the parser options attached to every job
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Resolves the inputs into jobs
    ///
    /// # Errors
    /// Fails if an input does not exist or a directory cannot be read.
    pub fn jobs(&self) -> Result<Vec<Job>> {
        let mut files = Vec::new();

        for input in &self.inputs {
            let metadata = std::fs::metadata(input)
                .with_context(|| format!("Cannot access input {}", input.display()))?;

            if metadata.is_dir() {
                let found = list_directory(input)?;
                debug!("Found {} file(s) in {}", found.len(), input.display());
                files.extend(found);
            } else {
                files.push(input.clone());
            }
        }

        Ok(Job::batch(files, &self.parameters))
    }
}

fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", dir.display()))?
            .path();
        if path.is_file() && is_supported(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Whether the parser accepts this file, judged by extension
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sluice_core::domain::job::JobId;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sluice-source-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("a/report.PDF")));
        assert!(is_supported(Path::new("scan.jpeg")));
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("Makefile")));
    }

    #[test]
    fn test_directory_expansion_is_sorted_and_filtered() {
        let dir = temp_dir();
        for name in ["b.pdf", "a.png", "skip.txt"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.join("nested.pdf")).unwrap();

        let jobs = FileJobSource::new([&dir]).jobs().unwrap();
        let names: Vec<String> = jobs
            .iter()
            .map(|j| j.file_path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.png", "b.pdf"]);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_explicit_files_keep_order_and_parameters() {
        let dir = temp_dir();
        let notes = dir.join("notes.txt");
        let scan = dir.join("scan.pdf");
        std::fs::write(&notes, b"x").unwrap();
        std::fs::write(&scan, b"x").unwrap();

        let mut params = Parameters::new();
        params.insert("lang".to_string(), json!("en"));

        let jobs = FileJobSource::new([&scan, &notes])
            .with_parameters(params)
            .jobs()
            .unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, JobId(0));
        assert_eq!(jobs[0].file_path, scan);
        assert_eq!(jobs[1].file_path, notes);
        assert_eq!(jobs[1].parameters["lang"], json!("en"));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_input_is_error() {
        let err = FileJobSource::new(["/no/such/input.pdf"]).jobs().unwrap_err();
        assert!(err.to_string().contains("/no/such/input.pdf"));
    }
}
