//! Font resolution with a guaranteed fallback.
//!
//! The compositor asks for a weight and a pixel size and always gets a
//! [`FontHandle`] back. [`SystemFontProvider`] walks an ordered list of font
//! file names per weight, loading the first one that exists and parses:
//!
//! ```text
//! [fonts].medium / platform list  →  first file found in the font dirs
//!                                      that ab_glyph can parse
//!                                  →  built-in 8x8 bitmap face
//! ```
//!
//! Font directories are indexed once per provider; parsed faces are cached
//! per weight, so each weight is resolved (and any fallback warning logged)
//! at most once.

use super::params::Weight;
use crate::config::FontConfig;
use ab_glyph::FontArc;
use log::{debug, warn};
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// A loaded typeface, independent of size.
#[derive(Clone)]
pub enum FontFace {
    Outline(FontArc),
    /// The `font8x8` bitmap glyphs, scaled up in whole-pixel blocks.
    Builtin,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontFace::Outline(_) => f.write_str("Outline"),
            FontFace::Builtin => f.write_str("Builtin"),
        }
    }
}

/// A face at a concrete pixel size: what the codec draws and measures with.
#[derive(Debug, Clone)]
pub struct FontHandle {
    pub face: FontFace,
    pub size_px: u32,
}

impl FontHandle {
    pub fn builtin(size_px: u32) -> Self {
        Self {
            face: FontFace::Builtin,
            size_px,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, FontFace::Builtin)
    }
}

/// Supplies fonts to the renderer. Never fails.
pub trait FontProvider {
    fn resolve(&self, weight: Weight, size_px: u32) -> FontHandle;
}

/// Font file names to try, highest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontFamilies {
    pub medium: Vec<String>,
    pub regular: Vec<String>,
}

impl FontFamilies {
    /// The priority lists for the platform this binary was built for.
    ///
    /// Every list ends in widely shipped faces (Arial, DejaVu) so that a
    /// stock install of any of the three desktop systems finds something.
    pub fn platform_default() -> Self {
        let (medium, regular): (&[&str], &[&str]) = if cfg!(target_os = "macos") {
            (
                &[
                    "HelveticaNeue-Medium.ttc",
                    "HelveticaNeue.ttc",
                    "Helvetica.ttc",
                    "SF-Pro-Display-Medium.otf",
                    "Arial Bold.ttf",
                ],
                &[
                    "HelveticaNeue-Light.ttc",
                    "HelveticaNeue.ttc",
                    "Helvetica.ttc",
                    "SF-Pro-Display-Light.otf",
                    "Arial.ttf",
                ],
            )
        } else if cfg!(target_os = "windows") {
            (
                &["segoeuisb.ttf", "Inter-Medium.ttf", "arialbd.ttf"],
                &["segoeuil.ttf", "Inter-Light.ttf", "arial.ttf"],
            )
        } else {
            (
                &[
                    "Roboto-Medium.ttf",
                    "Inter-Medium.ttf",
                    "Lato-Bold.ttf",
                    "DejaVuSans-Bold.ttf",
                    "LiberationSans-Bold.ttf",
                ],
                &[
                    "Roboto-Light.ttf",
                    "Inter-Light.ttf",
                    "Lato-Light.ttf",
                    "DejaVuSans.ttf",
                    "LiberationSans-Regular.ttf",
                ],
            )
        };
        Self {
            medium: medium.iter().map(|s| s.to_string()).collect(),
            regular: regular.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Platform lists, replaced per weight by any non-empty configured list.
    pub fn from_config(config: &FontConfig) -> Self {
        let mut families = Self::platform_default();
        if !config.medium.is_empty() {
            families.medium = config.medium.clone();
        }
        if !config.regular.is_empty() {
            families.regular = config.regular.clone();
        }
        families
    }

    fn for_weight(&self, weight: Weight) -> &[String] {
        match weight {
            Weight::Medium => &self.medium,
            Weight::Regular => &self.regular,
        }
    }
}

/// Conventional font directories for the current platform.
pub fn platform_font_dirs() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let mut dirs = Vec::new();
    if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.extend(home.map(|h| h.join("Library/Fonts")));
    } else if cfg!(target_os = "windows") {
        let windir = std::env::var_os("WINDIR").unwrap_or_else(|| "C:\\Windows".into());
        dirs.push(PathBuf::from(windir).join("Fonts"));
    } else {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = home {
            dirs.push(home.join(".fonts"));
            dirs.push(home.join(".local/share/fonts"));
        }
    }
    dirs
}

/// Map lower-cased font file names to their paths. The first directory wins.
pub fn index_font_dirs(dirs: &[PathBuf]) -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();
    for dir in dirs.iter().filter(|d| d.is_dir()) {
        for entry in WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| FONT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if !is_font {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_lowercase();
            index.entry(name).or_insert_with(|| path.to_path_buf());
        }
    }
    debug!("Indexed {} font files in {} directories", index.len(), dirs.len());
    index
}

fn load_face(path: &Path) -> Option<FontArc> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            debug!("Cannot read font {}: {e}", path.display());
            return None;
        }
    };
    match FontArc::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(e) => {
            debug!("Cannot parse font {}: {e}", path.display());
            None
        }
    }
}

/// Resolves fonts from files on disk.
pub struct SystemFontProvider {
    families: FontFamilies,
    dirs: Vec<PathBuf>,
    index: OnceCell<HashMap<String, PathBuf>>,
    medium: OnceCell<FontFace>,
    regular: OnceCell<FontFace>,
}

impl SystemFontProvider {
    /// Configured directories first, then the platform font directories.
    pub fn new(config: &FontConfig) -> Self {
        let mut dirs = config.dirs.clone();
        dirs.extend(platform_font_dirs());
        Self::with_dirs(FontFamilies::from_config(config), dirs)
    }

    pub fn with_dirs(families: FontFamilies, dirs: Vec<PathBuf>) -> Self {
        Self {
            families,
            dirs,
            index: OnceCell::new(),
            medium: OnceCell::new(),
            regular: OnceCell::new(),
        }
    }

    /// A provider that never touches the filesystem.
    pub fn builtin_only() -> Self {
        Self::with_dirs(FontFamilies::default(), Vec::new())
    }

    fn face_for(&self, weight: Weight) -> &FontFace {
        let cell = match weight {
            Weight::Medium => &self.medium,
            Weight::Regular => &self.regular,
        };
        cell.get_or_init(|| self.search(weight))
    }

    fn search(&self, weight: Weight) -> FontFace {
        let candidates = self.families.for_weight(weight);
        if candidates.is_empty() {
            return FontFace::Builtin;
        }

        let index = self.index.get_or_init(|| index_font_dirs(&self.dirs));
        for name in candidates {
            let Some(path) = index.get(&name.to_lowercase()) else {
                debug!("Font {name} not installed");
                continue;
            };
            if let Some(font) = load_face(path) {
                debug!("Using {} for {weight:?} text", path.display());
                return FontFace::Outline(font);
            }
        }

        warn!("No {weight:?} font found ({} tried), using the built-in face", candidates.len());
        FontFace::Builtin
    }
}

impl FontProvider for SystemFontProvider {
    fn resolve(&self, weight: Weight, size_px: u32) -> FontHandle {
        FontHandle {
            face: self.face_for(weight).clone(),
            size_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn families(medium: &[&str], regular: &[&str]) -> FontFamilies {
        FontFamilies {
            medium: medium.iter().map(|s| s.to_string()).collect(),
            regular: regular.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn builtin_only_always_resolves() {
        let provider = SystemFontProvider::builtin_only();
        let handle = provider.resolve(Weight::Medium, 42);
        assert!(handle.is_builtin());
        assert_eq!(handle.size_px, 42);
        assert!(provider.resolve(Weight::Regular, 10).is_builtin());
    }

    #[test]
    fn missing_families_fall_back_to_builtin() {
        let tmp = TempDir::new().unwrap();
        let provider = SystemFontProvider::with_dirs(
            families(&["NoSuchFont-Medium.ttf"], &["NoSuchFont.ttf"]),
            vec![tmp.path().to_path_buf(), tmp.path().join("missing")],
        );
        assert!(provider.resolve(Weight::Medium, 30).is_builtin());
        assert!(provider.resolve(Weight::Regular, 20).is_builtin());
    }

    #[test]
    fn unparsable_font_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Broken-Medium.ttf"), b"not a font").unwrap();
        let provider = SystemFontProvider::with_dirs(
            families(&["Broken-Medium.ttf"], &[]),
            vec![tmp.path().to_path_buf()],
        );
        assert!(provider.resolve(Weight::Medium, 30).is_builtin());
    }

    #[test]
    fn index_is_case_insensitive_and_recursive() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("truetype/dejavu");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("DejaVuSans.TTF"), b"x").unwrap();
        fs::write(nested.join("README.txt"), b"x").unwrap();

        let index = index_font_dirs(&[tmp.path().to_path_buf()]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("dejavusans.ttf"), Some(&nested.join("DejaVuSans.TTF")));
    }

    #[test]
    fn first_directory_wins_on_duplicate_names() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("Inter-Medium.ttf"), b"a").unwrap();
        fs::write(second.path().join("Inter-Medium.ttf"), b"b").unwrap();

        let index = index_font_dirs(&[first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(
            index.get("inter-medium.ttf"),
            Some(&first.path().join("Inter-Medium.ttf"))
        );
    }

    #[test]
    fn configured_lists_replace_platform_lists_per_weight() {
        let config = FontConfig {
            medium: vec!["Custom-Medium.otf".into()],
            ..FontConfig::default()
        };
        let families = FontFamilies::from_config(&config);
        assert_eq!(families.medium, vec!["Custom-Medium.otf".to_string()]);
        assert_eq!(families.regular, FontFamilies::platform_default().regular);
    }

    #[test]
    fn platform_lists_are_never_empty() {
        let families = FontFamilies::platform_default();
        assert!(!families.medium.is_empty());
        assert!(!families.regular.is_empty());
    }
}
