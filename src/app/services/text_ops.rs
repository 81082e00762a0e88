use std::path::Path;

/// Extract the file name component of a path for tab titles.
///
/// Returns `None` when the path has no usable name (empty, `.`, `/`), so the
/// caller can substitute a localized placeholder.
pub fn extract_filename(path: &Path) -> Option<String> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .filter(|s| !s.is_empty() && s != ".")
        .map(|s| s.into_owned())
}

/// Shorten a path for the file chip: keep only the last two components.
///
/// Paths with two components or fewer are returned unchanged.
pub fn shorten_path(path: &Path) -> String {
    let full = path.to_string_lossy();
    let parts: Vec<&str> = full
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .collect();

    if parts.len() <= 2 {
        return full.into_owned();
    }
    format!("\u{2026}/{}", parts[parts.len() - 2..].join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filename_from_path() {
        assert_eq!(extract_filename(Path::new("/tmp/x.excalidraw")).as_deref(), Some("x.excalidraw"));
        assert_eq!(extract_filename(Path::new("drawing.json")).as_deref(), Some("drawing.json"));
        assert_eq!(
            extract_filename(Path::new("/path/with/many/levels/board.excalidraw")).as_deref(),
            Some("board.excalidraw")
        );
    }

    #[test]
    fn test_extract_filename_edge_cases() {
        assert_eq!(extract_filename(Path::new("")), None);
        assert_eq!(extract_filename(Path::new(".")), None);
        assert_eq!(extract_filename(Path::new("/")), None);
        assert_eq!(extract_filename(Path::new("..")), None);
    }

    #[test]
    #[cfg(target_os = "windows")]
    fn test_extract_filename_windows_path() {
        assert_eq!(
            extract_filename(Path::new("C:\\Users\\test\\plan.excalidraw")).as_deref(),
            Some("plan.excalidraw")
        );
    }

    #[test]
    fn test_shorten_short_paths_unchanged() {
        assert_eq!(shorten_path(Path::new("/tmp/x.excalidraw")), "/tmp/x.excalidraw");
        assert_eq!(shorten_path(Path::new("x.excalidraw")), "x.excalidraw");
    }

    #[test]
    fn test_shorten_long_paths() {
        assert_eq!(
            shorten_path(Path::new("/home/ana/drawings/plan.excalidraw")),
            "\u{2026}/drawings/plan.excalidraw"
        );
        assert_eq!(
            shorten_path(Path::new("C:\\Users\\ana\\board.excalidraw")),
            "\u{2026}/ana/board.excalidraw"
        );
    }
}
