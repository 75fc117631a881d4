//! Output file naming.
//!
//! The default output sits next to the input with `_framed` inserted before
//! the extension:
//! - `photos/DSC0001.jpg` → `photos/DSC0001_framed.jpg`
//! - `scan.final.tiff` → `scan.final_framed.tiff`
//! - `README` → `README_framed`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const FRAMED_SUFFIX: &str = "_framed";

/// Default output path for `input`.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or(input.as_os_str()));
    name.push(FRAMED_SUFFIX);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_suffix_before_extension() {
        assert_eq!(
            derive_output_path(Path::new("photos/DSC0001.jpg")),
            PathBuf::from("photos/DSC0001_framed.jpg")
        );
    }

    #[test]
    fn keeps_extension_case() {
        assert_eq!(
            derive_output_path(Path::new("IMG_1234.JPG")),
            PathBuf::from("IMG_1234_framed.JPG")
        );
    }

    #[test]
    fn only_last_extension_is_split() {
        assert_eq!(
            derive_output_path(Path::new("/tmp/scan.final.tiff")),
            PathBuf::from("/tmp/scan.final_framed.tiff")
        );
    }

    #[test]
    fn no_extension() {
        assert_eq!(
            derive_output_path(Path::new("raw/README")),
            PathBuf::from("raw/README_framed")
        );
    }

    #[test]
    fn hidden_file_is_all_stem() {
        assert_eq!(
            derive_output_path(Path::new(".photo")),
            PathBuf::from(".photo_framed")
        );
    }
}
