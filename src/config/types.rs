use ffcompose_args::{Command, DirectoryFontResolver, FontResolver, PlatformFontResolver};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Program name printed in front of shell-quoted command lines
    #[serde(default = "default_program")]
    pub program: String,

    /// Emit `-y` so existing outputs are overwritten
    #[serde(default = "default_true")]
    pub overwrite: bool,

    /// Emit `-hide_banner`
    #[serde(default = "default_true")]
    pub hide_banner: bool,

    /// Value for `-loglevel` (e.g. "error", "warning")
    #[serde(default)]
    pub loglevel: Option<String>,

    /// Directory holding fonts for drawtext; platform default when unset
    #[serde(default)]
    pub font_dir: Option<PathBuf>,
}

fn default_program() -> String {
    "ffmpeg".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: default_program(),
            overwrite: true,
            hide_banner: true,
            loglevel: None,
            font_dir: None,
        }
    }
}

impl Config {
    /// Font lookup honoring `font_dir`.
    pub fn font_resolver(&self) -> Box<dyn FontResolver> {
        match &self.font_dir {
            Some(dir) => Box::new(DirectoryFontResolver::new(dir)),
            None => Box::new(PlatformFontResolver),
        }
    }

    /// A command carrying the configured global options.
    pub fn base_command(&self) -> Command {
        let cmd = Command::new()
            .hide_banner(self.hide_banner)
            .overwrite(self.overwrite);
        match &self.loglevel {
            Some(level) => cmd.loglevel(level.as_str()),
            None => cmd,
        }
    }
}
