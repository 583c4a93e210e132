// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_derive::*;

use std::ffi::OsStr;

// viewers that stay in the foreground until their window is closed
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const BLOCKING_VIEWERS: &[&[&str]] = &[&["feh"], &["display"], &["eog", "--new-instance"]];

/// Image size and the viewer used when no output file is given.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Output {
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default)]
    viewer: Option<String>,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            viewer: None,
        }
    }
}

/// A viewer command line. A detached viewer returns before its window is
/// closed, so the caller has to wait some other way before removing the
/// image.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewer {
    pub command: Vec<String>,
    pub detached: bool,
}

impl Output {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The configured viewer, which is expected to block, or the platform
    /// default.
    pub fn viewer(&self) -> Viewer {
        match &self.viewer {
            Some(viewer) => Viewer {
                command: viewer.split_whitespace().map(str::to_owned).collect(),
                detached: false,
            },
            None => default_viewer(std::env::var_os("PATH").as_deref()),
        }
    }
}

// 6.4in x 4.8in at 200 DPI
fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    960
}

fn command(args: &[&str], detached: bool) -> Viewer {
    Viewer {
        command: args.iter().map(|s| (*s).to_owned()).collect(),
        detached,
    }
}

#[cfg(target_os = "macos")]
fn default_viewer(_path: Option<&OsStr>) -> Viewer {
    command(&["open", "-W"], false)
}

#[cfg(target_os = "windows")]
fn default_viewer(_path: Option<&OsStr>) -> Viewer {
    command(&["explorer"], true)
}

/// First blocking viewer found on `path`, falling back to `xdg-open`.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_viewer(path: Option<&OsStr>) -> Viewer {
    let dirs: Vec<_> = path.map(|p| std::env::split_paths(p).collect()).unwrap_or_default();
    BLOCKING_VIEWERS
        .iter()
        .find(|args| dirs.iter().any(|dir| dir.join(args[0]).is_file()))
        .map(|args| command(args, false))
        .unwrap_or_else(|| command(&["xdg-open"], true))
}

#[cfg(test)]
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn configured_viewer_blocks() {
        let output = Output {
            viewer: Some("feh --scale-down".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            output.viewer(),
            command(&["feh", "--scale-down"], false)
        );
    }

    #[test]
    fn default_prefers_blocking_viewer() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("eog"), "").unwrap();
        fs::write(dir.path().join("display"), "").unwrap();
        let viewer = default_viewer(Some(dir.path().as_os_str()));
        assert_eq!(viewer, command(&["display"], false));
    }

    #[test]
    fn default_falls_back_to_detached_opener() {
        let dir = tempfile::tempdir().unwrap();
        let viewer = default_viewer(Some(dir.path().as_os_str()));
        assert_eq!(viewer, command(&["xdg-open"], true));
        assert_eq!(default_viewer(None), command(&["xdg-open"], true));
    }
}
