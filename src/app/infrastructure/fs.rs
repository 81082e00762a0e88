use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Replace the contents of `path` with `contents`, all or nothing.
///
/// The bytes are written to a temporary file next to the target, flushed to
/// disk, then renamed over the target. If anything fails before the rename the
/// previous file is left exactly as it was and the temporary file is removed.
/// An existing target keeps its permissions.
pub fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    if let Ok(meta) = fs::metadata(path)
        && meta.is_file()
    {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}
