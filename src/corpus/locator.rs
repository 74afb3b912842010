use std::{
    fmt,
    path::{Path, PathBuf},
};

/// One test input, identified by `directory.join(entry_name)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourcePath(PathBuf);

impl SourcePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Final path component, used to derive baseline file names.
    pub fn basename(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl AsRef<Path> for SourcePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Classifies a directory entry name as a test source.
pub trait SourceFilter {
    fn accepts(&self, file_name: &str) -> bool;
}

impl<F> SourceFilter for F
where
    F: Fn(&str) -> bool,
{
    fn accepts(&self, file_name: &str) -> bool {
        self(file_name)
    }
}

/// Matches names whose text after the final `.` equals the extension exactly.
///
/// A name whose only dot is its first character (`.json`) has no extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extension(pub &'static str);

/// Frame-sequence animation documents.
pub const ANIMATION_DOCUMENTS: Extension = Extension("json");
/// Static vector documents.
pub const VECTOR_DOCUMENTS: Extension = Extension("svg");

impl SourceFilter for Extension {
    fn accepts(&self, file_name: &str) -> bool {
        match file_name.rfind('.') {
            None | Some(0) => false,
            Some(dot) => &file_name[dot + 1..] == self.0,
        }
    }
}

/// List the sources directly inside `dir` accepted by `filter`, sorted by path.
///
/// A directory that cannot be opened yields an empty list.
pub fn list_files(dir: &Path, filter: &dyn SourceFilter) -> Vec<SourcePath> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), %err, "cannot open source directory");
            return Vec::new();
        }
    };

    let mut out: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| !entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter(|entry| filter.accepts(&entry.file_name().to_string_lossy()))
        .map(|entry| dir.join(entry.file_name()))
        .collect();

    out.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    tracing::debug!(dir = %dir.display(), count = out.len(), "listed sources");
    out.into_iter().map(SourcePath).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/corpus/locator.rs"]
mod tests;
