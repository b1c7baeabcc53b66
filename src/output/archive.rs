use crate::ArchiveError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Result of packaging an output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    /// Location of the `.zip` archive
    pub archive_path: PathBuf,

    /// Number of documents stored in the archive
    pub entries: usize,

    /// Whether the source directory was removed afterwards
    pub source_removed: bool,
}

/// Returns the archive path for a directory: the directory path plus `.zip`
pub fn archive_path_for(dir: &Path) -> PathBuf {
    let mut path = OsString::from(dir.as_os_str());
    path.push(".zip");
    PathBuf::from(path)
}

/// Bundles `dir` into `<dir>.zip`, then removes `dir`
///
/// The archive is fully written and synced before the directory is touched.
/// If archiving fails, any partial archive is deleted and `dir` is left as
/// it was. Failing to remove `dir` afterwards only logs a warning: the
/// archive is complete and is still returned.
///
/// # Returns
///
/// * `Ok(ArchiveOutcome)` - The archive exists
/// * `Err(ArchiveError)` - No archive was produced
pub fn archive_directory(dir: &Path) -> Result<ArchiveOutcome, ArchiveError> {
    let archive_path = archive_path_for(dir);

    let entries = match write_archive(dir, &archive_path) {
        Ok(entries) => entries,
        Err(e) => {
            let _ = fs::remove_file(&archive_path);
            return Err(e);
        }
    };

    tracing::debug!(
        "Wrote {} entries to {}",
        entries,
        archive_path.display()
    );

    let source_removed = match fs::remove_dir_all(dir) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                "Archive created but failed to remove {}: {}",
                dir.display(),
                e
            );
            false
        }
    };

    Ok(ArchiveOutcome {
        archive_path,
        entries,
        source_removed,
    })
}

fn write_archive(dir: &Path, archive_path: &Path) -> Result<usize, ArchiveError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    let mut zip = ZipWriter::new(File::create(archive_path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in &files {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "entry without a name"))?;

        zip.start_file(name.as_str(), options)?;
        let mut source = File::open(path)?;
        io::copy(&mut source, &mut zip)?;
    }

    let mut file = zip.finish()?;
    file.flush()?;
    file.sync_all()?;

    Ok(files.len())
}
