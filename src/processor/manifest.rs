use crate::error::{AudioError, AudioResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Read an input list: one path per line, `#` comments and blank lines ignored.
///
/// Relative entries resolve against the manifest's own directory.
pub fn read_manifest<P: AsRef<Path>>(path: P) -> AudioResult<Vec<PathBuf>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| AudioError::from(e).at_path(path))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(parse_manifest(&text, base))
}

/// Parse manifest text, resolving relative entries against `base`
pub fn parse_manifest(text: &str, base: &Path) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let entry = Path::new(line);
            if entry.is_absolute() {
                entry.to_path_buf()
            } else {
                base.join(entry)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let text = "# intro first\nintro.mp3\n\n   \n  body.flac  \n#outro.wav\n/abs/end.ogg\n";
        let paths = parse_manifest(text, Path::new("/music"));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/music/intro.mp3"),
                PathBuf::from("/music/body.flac"),
                PathBuf::from("/abs/end.ogg"),
            ]
        );
    }

    #[test]
    fn test_read_manifest_relative_to_file() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("list.txt");
        let mut file = fs::File::create(&manifest).unwrap();
        writeln!(file, "a.wav").unwrap();
        writeln!(file, "sub/b.wav").unwrap();

        let paths = read_manifest(&manifest).unwrap();
        assert_eq!(paths, vec![dir.path().join("a.wav"), dir.path().join("sub/b.wav")]);
    }

    #[test]
    fn test_missing_manifest() {
        let err = read_manifest("/nonexistent/list.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/list.txt"));
    }
}
