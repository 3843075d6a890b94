use std::io::Write;
use std::path::Path;

use dockgen_core::Error;

/// File written when no output path is given.
pub const DEFAULT_OUTPUT: &str = "Dockerfile";

/// Replace `path` with `contents` in one step.
///
/// The text goes to a temporary file next to `path` which is then renamed
/// over it, so readers see either the old file or the complete new one. An
/// existing file keeps its permissions.
pub fn write_atomic(path: &Path, contents: &str) -> dockgen_core::Result<()> {
    let write_err = |source: std::io::Error| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    match std::fs::metadata(path) {
        Ok(existing) => tmp
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => set_default_permissions(tmp.as_file())
            .map_err(write_err)?,
        Err(e) => return Err(write_err(e)),
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "output written");
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}
