//! Input loading and output writing.
//!
//! Input is one file, every regular file under a directory, or standard input.
//! Output goes to standard output or is committed to a file in one step.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use es_datafile::DataFile;
use log::{debug, info};
use walkdir::WalkDir;

/// Load the data files named by `input`; `None` reads standard input as one file.
///
/// # Errors
/// Errors bubble up from directory traversal, file IO, or parsing.
pub fn load_input(input: Option<&Path>) -> Result<Vec<DataFile>> {
    match input {
        None => {
            let file = DataFile::from_reader(io::stdin().lock()).context("while reading standard input")?;
            info!("data read from standard input");
            Ok(vec![file])
        },
        Some(path) if path.is_dir() => load_directory(path),
        Some(path) => {
            let file = DataFile::from_path(path).with_context(|| format!("while loading '{}'", path.display()))?;
            info!("data file '{}' loaded", path.display());
            Ok(vec![file])
        },
    }
}

/// Every regular file under `dir`, recursively, sorted by name at each level.
///
/// # Errors
/// Fails if any part of the directory tree cannot be read.
pub fn data_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("while walking '{}'", dir.display()))?;
        if entry.file_type().is_file() {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn load_directory(dir: &Path) -> Result<Vec<DataFile>> {
    let mut files = Vec::new();
    for path in data_files_in(dir)? {
        debug!("loading '{}'", path.display());
        files.push(DataFile::from_path(&path).with_context(|| format!("while loading '{}'", path.display()))?);
    }
    info!("{} data files loaded from '{}'", files.len(), dir.display());
    Ok(files)
}

/// Write the finished graph to `output`, or to standard output when `None`.
///
/// A file is written beside the target first and renamed into place, so the
/// target only ever holds a complete graph.
///
/// # Errors
/// Fails if the text cannot be written or the file cannot be moved into place.
pub fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    let Some(path) = output else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes()).context("while writing to standard output")?;
        return stdout.flush().context("while flushing standard output");
    };
    let staging = staging_path(path);
    fs::write(&staging, text).with_context(|| format!("while writing '{}'", staging.display()))?;
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(e).with_context(|| format!("while moving graph into '{}'", path.display()));
    }
    info!("graph written to '{}'", path.display());
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path.file_name().map_or_else(|| "graph".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.partial"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_files_are_sorted_and_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b/inner.txt"), "event Inner\n").unwrap();
        fs::write(dir.path().join("c.txt"), "mission C\n").unwrap();
        fs::write(dir.path().join("a.txt"), "mission A\n").unwrap();
        let names: Vec<_> = data_files_in(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, ["a.txt", "b/inner.txt", "c.txt"]);
    }

    #[test]
    fn load_input_reads_file_or_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.txt"), "mission One\n").unwrap();
        fs::write(dir.path().join("two.txt"), "event Two\n").unwrap();
        assert_eq!(load_input(Some(dir.path())).unwrap().len(), 2);
        let single = load_input(Some(&dir.path().join("one.txt"))).unwrap();
        assert_eq!(single[0].nodes()[0].token(1), Some("One"));
    }

    #[test]
    fn missing_input_is_an_error() {
        let err = load_input(Some(Path::new("/no/such/data.txt"))).unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/data.txt"));
    }

    #[test]
    fn output_file_is_replaced_whole() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("graph.dot");
        fs::write(&target, "old").unwrap();
        write_output(Some(&target), "digraph endlesssky {\n}\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "digraph endlesssky {\n}\n");
        assert!(!staging_path(&target).exists());
    }

    #[test]
    fn failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing/graph.dot");
        assert!(write_output(Some(&target), "x").is_err());
        assert!(!target.exists());
    }
}
