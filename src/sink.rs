//! Output sinks for generated pages.
//!
//! The generator addresses outputs by relative path strings (`2024-01/index.md`)
//! and only ever needs to open a path for writing. Each path is opened by
//! exactly one producer; there is no read-back.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

/// A write target addressed by relative paths.
pub trait Sink {
    /// Open `path` for writing, replacing anything written there before.
    fn open(&mut self, path: &str) -> io::Result<Box<dyn Write + '_>>;
}

/// Keeps generated files in memory. Used by `check` and by tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of a written file, if it exists and is UTF-8.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .get(path)
            .and_then(|b| std::str::from_utf8(b).ok())
    }

    /// All written paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Sink for MemorySink {
    fn open(&mut self, path: &str) -> io::Result<Box<dyn Write + '_>> {
        let buf = self.files.entry(path.to_string()).or_default();
        buf.clear();
        Ok(Box::new(buf))
    }
}

/// Writes generated files below a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Sink for DirSink {
    fn open(&mut self, path: &str) -> io::Result<Box<dyn Write + '_>> {
        let rel = Path::new(path);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("output path must stay inside the output directory: {path}"),
            ));
        }
        let target = self.root.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Box::new(BufWriter::new(File::create(target)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_sink_collects_files() {
        let mut sink = MemorySink::new();
        sink.open("a/b.md").unwrap().write_all(b"hello").unwrap();
        sink.open("c.md").unwrap().write_all(b"world").unwrap();
        assert_eq!(sink.get("a/b.md"), Some("hello"));
        assert_eq!(sink.paths().collect::<Vec<_>>(), vec!["a/b.md", "c.md"]);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn memory_sink_reopen_replaces() {
        let mut sink = MemorySink::new();
        sink.open("x.md").unwrap().write_all(b"first").unwrap();
        sink.open("x.md").unwrap().write_all(b"second").unwrap();
        assert_eq!(sink.get("x.md"), Some("second"));
    }

    #[test]
    fn dir_sink_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let mut sink = DirSink::new(tmp.path());
        {
            let mut w = sink.open("2024-01/index.md").unwrap();
            w.write_all(b"# Index\n").unwrap();
            w.flush().unwrap();
        }
        let content = fs::read_to_string(tmp.path().join("2024-01/index.md")).unwrap();
        assert_eq!(content, "# Index\n");
    }

    #[test]
    fn dir_sink_rejects_escaping_paths() {
        let tmp = TempDir::new().unwrap();
        let mut sink = DirSink::new(tmp.path());
        for path in ["../evil.md", "/etc/passwd", "a/../../b.md", ""] {
            let err = sink.open(path).err().unwrap();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{path}");
        }
    }
}
