//! Shared filesystem helpers built on `cap-std` and `camino`.
//!
//! Scored review files are rewritten wholesale on every run, so the write
//! path goes through [`write_atomically`]: content lands in a sibling
//! temporary file which is synced and then renamed over the target.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use log::warn;
use std::io::{self, BufWriter, Read, Write};

/// Open a UTF-8 file path using ambient authority.
///
/// # Errors
/// Returns the underlying I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole UTF-8 file into memory.
///
/// # Errors
/// Returns the underlying I/O error when the file cannot be opened or read,
/// including when its contents are not valid UTF-8.
pub fn read_utf8_file(path: &Utf8Path) -> io::Result<String> {
    let mut file = open_utf8_file(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Resolve an ambient directory for the given path and return the directory with the file name.
///
/// # Errors
/// Fails when `path` has no file name or its parent directory cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Ensure the parent directory for `path` exists.
///
/// Missing components are created beneath the nearest ancestor that already
/// exists, opened with ambient authority, so parents reached through `..`
/// or an absolute root work the same as plain relative ones.
///
/// # Errors
/// Returns the I/O error raised while opening an ancestor or creating the
/// missing components.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    if open_ambient_dir(parent)?.is_some() {
        return Ok(());
    }

    for ancestor in parent.ancestors().skip(1) {
        let Some(base) = open_ambient_dir(ancestor)? else {
            continue;
        };
        let relative = parent
            .strip_prefix(ancestor)
            .map_err(|_| io::Error::other("failed to split parent path"))?;
        base.create_dir_all(relative)?;
        return Ok(());
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no existing ancestor for {parent}"),
    ))
}

fn open_ambient_dir(path: &Utf8Path) -> io::Result<Option<fs_utf8::Dir>> {
    let target = if path.as_str().is_empty() {
        Utf8Path::new(".")
    } else {
        path
    };
    match fs_utf8::Dir::open_ambient_dir(target, ambient_authority()) {
        Ok(opened) => Ok(Some(opened)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Return whether a path exists and is a regular file using capability-based IO.
///
/// # Errors
/// Returns [`io::ErrorKind::NotFound`] when the path is missing and other
/// I/O errors when its metadata cannot be read.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Replace the file at `path` with whatever `write` produces.
///
/// The parent directory is created when missing. Bytes go to a temporary
/// file in the same directory, which is flushed, synced and renamed over
/// `path` only once `write` succeeds. On failure the temporary file is
/// removed and any existing file at `path` is left untouched.
///
/// # Errors
/// Propagates errors from `write` and from creating, syncing or renaming the
/// temporary file.
pub fn write_atomically<F>(path: &Utf8Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    ensure_parent_dir(path)?;
    let (dir, file_name) = open_dir_and_file(path)?;
    let temp_name = temp_file_name(&file_name);

    let outcome = write_temp_file(&dir, &temp_name, write)
        .and_then(|()| dir.rename(&temp_name, &dir, &file_name));
    if outcome.is_err()
        && let Err(cleanup) = dir.remove_file(&temp_name)
        && cleanup.kind() != io::ErrorKind::NotFound
    {
        warn!("failed to remove temporary file {temp_name} next to {path}: {cleanup}");
    }
    outcome
}

fn temp_file_name(file_name: &str) -> String {
    format!(".{file_name}.{}.tmp", std::process::id())
}

fn write_temp_file<F>(dir: &fs_utf8::Dir, temp_name: &str, write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let file = dir.create(temp_name)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    let synced = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    synced.sync_all()
}

#[cfg(test)]
mod tests {
    //! Unit coverage for the atomic write helpers.

    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        (dir, root)
    }

    #[rstest]
    fn writes_new_file_and_creates_parents() {
        let (_dir, root) = workspace();
        let target = root.join("nested/out/scores.json");

        write_atomically(&target, |writer| writer.write_all(b"[]")).expect("atomic write");

        assert_eq!(read_utf8_file(&target).expect("read back"), "[]");
    }

    #[rstest]
    fn creates_parents_below_dot_dot_segments() {
        let (_dir, root) = workspace();
        std::fs::create_dir(root.join("work").as_std_path()).expect("create work dir");
        let target = root.join("work/../fresh/deeper/scores.json");

        write_atomically(&target, |writer| writer.write_all(b"[]")).expect("atomic write");

        let written = root.join("fresh/deeper/scores.json");
        assert_eq!(read_utf8_file(&written).expect("read back"), "[]");
    }

    #[rstest]
    fn replaces_existing_file() {
        let (_dir, root) = workspace();
        let target = root.join("scores.json");
        std::fs::write(target.as_std_path(), b"old").expect("seed file");

        write_atomically(&target, |writer| writer.write_all(b"new")).expect("atomic write");

        assert_eq!(read_utf8_file(&target).expect("read back"), "new");
    }

    #[rstest]
    fn failed_write_keeps_original_and_cleans_up() {
        let (_dir, root) = workspace();
        let target = root.join("scores.json");
        std::fs::write(target.as_std_path(), b"original").expect("seed file");

        let err = write_atomically(&target, |writer| {
            writer.write_all(b"partial")?;
            Err(io::Error::other("serialiser gave up"))
        })
        .expect_err("write should fail");

        assert_eq!(err.to_string(), "serialiser gave up");
        assert_eq!(read_utf8_file(&target).expect("read back"), "original");
        let leftovers: Vec<_> = std::fs::read_dir(root.as_std_path())
            .expect("list dir")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temporary file should be removed");
    }

    #[rstest]
    fn file_is_file_reports_directories() {
        let (_dir, root) = workspace();
        std::fs::create_dir(root.join("inputs").as_std_path()).expect("create dir");

        assert!(!file_is_file(&root.join("inputs")).expect("inspect dir"));
    }

    #[rstest]
    fn file_is_file_reports_missing_paths() {
        let (_dir, root) = workspace();

        let err = file_is_file(&root.join("missing.json")).expect_err("missing file");

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
