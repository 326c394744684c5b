use std::{ffi::OsString, fs, io, path::Path};

use log::{info, warn};

pub const DEFAULT_PREFIX: &str = "downloaded-";

/// Rename every `.png` file in `dir` to `<prefix><name>`.  Files already
/// carrying the prefix get it again, so a second run double-prefixes.
/// Returns the (old, new) file names, lossily decoded.
pub fn prefix_png_files(dir: &Path, prefix: &str) -> io::Result<Vec<(String, String)>> {
    let mut filenames: Vec<OsString> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        // compared on raw bytes so names that aren't UTF-8 still match
        if name.as_encoded_bytes().ends_with(b".png") {
            filenames.push(name);
        }
    }
    filenames.sort();

    let mut renamed = Vec::with_capacity(filenames.len());
    for filename in filenames {
        let mut new_filename = OsString::from(prefix);
        new_filename.push(&filename);
        fs::rename(dir.join(&filename), dir.join(&new_filename))?;
        let (old, new) = (
            filename.to_string_lossy().into_owned(),
            new_filename.to_string_lossy().into_owned(),
        );
        if filename.to_str().is_none() {
            warn!("Renamed non UTF-8 file name {} to {}", old, new);
        } else {
            info!("Renamed {} to {}", old, new);
        }
        renamed.push((old, new));
    }
    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use std::{error::Error, fs, path::Path};

    use super::{prefix_png_files, DEFAULT_PREFIX};

    #[test]
    fn only_png_files_are_renamed() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("a.png"), b"a")?;
        fs::write(dir.path().join("b.jpg"), b"b")?;

        let renamed = prefix_png_files(dir.path(), DEFAULT_PREFIX)?;
        assert_eq!(renamed, vec![("a.png".to_string(), "downloaded-a.png".to_string())]);
        assert!(dir.path().join("downloaded-a.png").exists());
        assert!(!dir.path().join("a.png").exists());
        assert!(dir.path().join("b.jpg").exists());

        // not idempotent: the prefix is added again
        prefix_png_files(dir.path(), DEFAULT_PREFIX)?;
        assert!(dir.path().join("downloaded-downloaded-a.png").exists());
        assert!(dir.path().join("b.jpg").exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_png_is_renamed() -> Result<(), Box<dyn Error>> {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let dir = tempfile::tempdir()?;
        let name = OsStr::from_bytes(b"caf\xe9.png");
        fs::write(dir.path().join(name), b"x")?;

        let renamed = prefix_png_files(dir.path(), DEFAULT_PREFIX)?;
        assert_eq!(renamed.len(), 1);
        assert!(dir.path().join(OsStr::from_bytes(b"downloaded-caf\xe9.png")).exists());
        assert!(!dir.path().join(name).exists());
        Ok(())
    }

    #[test]
    fn missing_directory() {
        let err = prefix_png_files(Path::new("/no/such/photos"), DEFAULT_PREFIX).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
