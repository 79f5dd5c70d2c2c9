//! Staging and extraction of downloaded report archives.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

/// Errors that can occur while handling report archives.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Failed to list a directory.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        /// The directory that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Failed to copy an archive into the archive store.
    #[error("Failed to copy '{from}' to '{to}': {source}")]
    Copy {
        /// Source path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Failed to open an archive file.
    #[error("Failed to open archive '{path}': {source}")]
    Open {
        /// The archive path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The archive is not a readable zip file.
    #[error("Invalid archive '{path}': {source}")]
    Zip {
        /// The archive path.
        path: PathBuf,
        /// The underlying zip error.
        source: ZipError,
    },

    /// Failed to write an extracted entry.
    #[error("Failed to extract '{entry}' to '{path}': {source}")]
    Extract {
        /// The entry name inside the archive.
        entry: String,
        /// The destination path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Lists archive file names in `dir` that start with `prefix` and end in `.zip`.
///
/// Names are returned sorted, which for `Daily_YYYY_MM_DD.zip` is date order.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_archives(dir: &Path, prefix: &str) -> Result<Vec<String>, ArchiveError> {
    let read_dir_err = |e| ArchiveError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with(prefix)
            && name.to_ascii_lowercase().ends_with(".zip")
            && entry.path().is_file()
        {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Writes everything `reader` yields to `path` unless `path` already exists.
///
/// Data goes to a temporary file next to `path` that only takes the final
/// name once fully written, so a failed copy leaves nothing behind.
/// Returns `true` if the file was created.
fn write_new<R: Read + ?Sized>(reader: &mut R, path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    io::copy(reader, &mut temp)?;

    match temp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error),
    }
}

/// Copies archive `name` from `from_dir` into `to_dir` unless it is already there.
///
/// Returns `true` if a copy was made. A failed copy leaves no file in `to_dir`.
///
/// # Errors
///
/// Returns an error if the copy fails.
pub fn stage_archive(name: &str, from_dir: &Path, to_dir: &Path) -> Result<bool, ArchiveError> {
    let to = to_dir.join(name);
    if to.exists() {
        return Ok(false);
    }

    let from = from_dir.join(name);
    File::open(&from)
        .and_then(|mut file| write_new(&mut file, &to))
        .map_err(|e| ArchiveError::Copy {
            from,
            to,
            source: e,
        })
}

/// Extracts every file entry of `archive` into `out_dir`.
///
/// Entries are flattened to their file name. An entry whose destination
/// already exists is left untouched. An entry that fails to extract,
/// including a checksum mismatch, leaves no file behind. Returns the names
/// of all file entries, extracted or not, in archive order.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or an entry cannot be written.
pub fn extract_archive(archive: &Path, out_dir: &Path) -> Result<Vec<String>, ArchiveError> {
    let zip_err = |e| ArchiveError::Zip {
        path: archive.to_path_buf(),
        source: e,
    };

    let file = File::open(archive).map_err(|e| ArchiveError::Open {
        path: archive.to_path_buf(),
        source: e,
    })?;
    let mut zip = ZipArchive::new(BufReader::new(file)).map_err(zip_err)?;

    let mut names = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(zip_err)?;
        if entry.is_dir() {
            continue;
        }
        let Some(name) = entry
            .enclosed_name()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        else {
            continue;
        };

        let path = out_dir.join(&name);
        write_new(&mut entry, &path).map_err(|e| ArchiveError::Extract {
            entry: name.clone(),
            path,
            source: e,
        })?;

        names.push(name);
    }

    Ok(names)
}
