use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Writes page documents into a job's output directory
///
/// The writer remembers every name it has handed out. When a page would
/// reuse a name, a sequence number is inserted before the extension
/// (`news.md`, `news_2.md`, `news_3.md`...), so a later page never replaces
/// an earlier one.
#[derive(Debug)]
pub struct PageWriter {
    dir: PathBuf,
    used: HashSet<String>,
}

impl PageWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            used: HashSet::new(),
        }
    }

    /// Number of documents written so far
    pub fn written(&self) -> usize {
        self.used.len()
    }

    /// Writes `content` under `name` (or its next free variant)
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Path of the written document
    /// * `Err(io::Error)` - The document could not be written; the name is not reserved
    pub fn write(&mut self, name: &str, content: &str) -> io::Result<PathBuf> {
        let unique = self.next_free_name(name);
        let path = self.dir.join(&unique);

        fs::write(&path, content)?;
        self.used.insert(unique);

        Ok(path)
    }

    fn next_free_name(&self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut sequence = 1;

        while self.used.contains(&candidate) {
            sequence += 1;
            candidate = with_sequence(name, sequence);
        }

        candidate
    }
}

fn with_sequence(name: &str, sequence: usize) -> String {
    match name.rsplit_once('.') {
        Some((stem, extension)) => format!("{}_{}.{}", stem, sequence, extension),
        None => format!("{}_{}", name, sequence),
    }
}
