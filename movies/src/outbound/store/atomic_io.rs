//! Atomic snapshot file replacement.
//!
//! Contents are written to a uniquely named hidden file in the same
//! directory, synced, then renamed over the target. Readers therefore see
//! either the previous file or the complete new one.

use std::io::{self, Write};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};
use uuid::Uuid;

/// Check that `name` is a single normal path component.
pub(super) fn validate_file_name(name: &str) -> io::Result<()> {
    let mut components = Utf8Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(_)), None) => Ok(()),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("snapshot file name must be a bare file name, got '{name}'"),
        )),
    }
}

/// Replace `file_name` inside `dir` with `contents` in one rename.
pub(super) fn write_atomic(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    let tmp_name = format!(".{file_name}.tmp.{}", Uuid::new_v4().simple());

    if let Err(error) = write_temp_file(dir, &tmp_name, contents) {
        drop(dir.remove_file(&tmp_name));
        return Err(error);
    }
    if let Err(error) = rename_over(dir, &tmp_name, file_name) {
        drop(dir.remove_file(&tmp_name));
        return Err(error);
    }
    sync_directory(dir);
    Ok(())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(file_name) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error),
    }
    dir.rename(tmp_name, dir, file_name)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, file_name)
}

fn sync_directory(dir: &Dir) {
    // Best effort; the rename has already landed.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
}
