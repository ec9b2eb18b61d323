//! Utility functions for error handling
//!
//! File helpers that turn bare `io::Error`s into errors naming the path and
//! what the file was needed for.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{BiomarkerError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(BiomarkerError::io_error("File not found")
            .with_path(path)
            .context(format!("Needed for: {purpose}")));
    }

    if !path.is_file() {
        return Err(BiomarkerError::io_error("Path is not a file")
            .with_path(path)
            .context(format!("Expected a file for: {purpose}")));
    }

    match fs::File::open(path) {
        Ok(file) => Ok(file),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Permission denied - check file permissions".to_string()
                }
                _ => format!("Failed to open file for: {purpose}"),
            };

            Err(BiomarkerError::io_error_with_source(context, e).with_path(path))
        }
    }
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::InvalidData => {
                    "File contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("Failed to read file content for: {purpose}"),
            };

            Err(BiomarkerError::io_error_with_source(context, e).with_path(path))
        }
    }
}

/// Create (or truncate) an output file, creating missing parent directories
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                BiomarkerError::io_error_with_source(
                    format!("Failed to create output directory for: {purpose}"),
                    e,
                )
                .with_path(parent)
            })?;
        } else if !parent.is_dir() {
            return Err(BiomarkerError::io_error("Parent path is not a directory")
                .with_path(parent)
                .context(format!("Expected a directory for: {purpose}")));
        }
    }

    fs::File::create(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check directory permissions".to_string()
            }
            _ => format!("Failed to create file for: {purpose}"),
        };
        BiomarkerError::io_error_with_source(context, e).with_path(path)
    })
}
