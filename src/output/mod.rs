//! Output module for persisting crawl results
//!
//! This module handles:
//! - Naming page documents from their title and URL
//! - Writing documents into the job directory without overwriting
//! - Packaging the job directory into a single zip archive

mod archive;
mod filename;
mod writer;

pub use archive::{archive_directory, archive_path_for, ArchiveOutcome};
pub use filename::{name_for, DOCUMENT_EXTENSION, UNTITLED};
pub use writer::PageWriter;
