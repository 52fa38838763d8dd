//! Font file lookup for text-drawing filters.

use std::path::{Path, PathBuf};

/// Resolves a font name such as `arial.ttf` to a font file path.
pub trait FontResolver {
    /// Return the path of the font file named `name`.
    fn resolve_font_path(&self, name: &str) -> PathBuf;
}

/// Looks fonts up in the platform's conventional font directory.
///
/// The platform is checked on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformFontResolver;

const WINDOWS_FONT_DIR: &str = "C://Windows/Fonts/";
const UNIX_FONT_DIR: &str = "/usr/share/fonts/truetype/freefont/";

impl FontResolver for PlatformFontResolver {
    fn resolve_font_path(&self, name: &str) -> PathBuf {
        let dir = if std::env::consts::OS == "windows" {
            WINDOWS_FONT_DIR
        } else {
            UNIX_FONT_DIR
        };
        PathBuf::from(format!("{dir}{name}"))
    }
}

/// Looks fonts up in one fixed directory.
#[derive(Debug, Clone)]
pub struct DirectoryFontResolver {
    dir: PathBuf,
}

impl DirectoryFontResolver {
    /// Resolve every font inside `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The configured directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FontResolver for DirectoryFontResolver {
    fn resolve_font_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl<F> FontResolver for F
where
    F: Fn(&str) -> PathBuf,
{
    fn resolve_font_path(&self, name: &str) -> PathBuf {
        self(name)
    }
}
