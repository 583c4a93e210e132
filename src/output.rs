// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::{Config, Output, NAME};
use crate::{Error, Outcome};

use benchgraph::Chart;
use logger::*;

use std::io::BufRead;
use std::path::Path;
use std::process::Command;

const PREVIEW: &str = "chart.png";

/// Write the chart to the configured output file, or show it in the viewer
/// when no file was requested.
pub fn present(chart: &Chart, config: &Config) -> Result<Outcome, Error> {
    match config.out() {
        Some(path) => {
            save(chart, path, config.output().size())?;
            Ok(Outcome::Saved(path.to_path_buf()))
        }
        None => show(chart, config.output()),
    }
}

/// Render the chart as a PNG at `path`.
pub fn save(chart: &Chart, path: &Path, size: (u32, u32)) -> Result<(), Error> {
    debug!("rendering {}x{} chart to {}", size.0, size.1, path.display());
    chart
        .render(path, size)
        .map_err(|e| Error::Render(e.to_string()))
}

/// Render to a private temporary directory and wait for the viewer. The
/// directory is removed on return, whether or not the viewer succeeded.
fn show(chart: &Chart, output: &Output) -> Result<Outcome, Error> {
    let dir = tempfile::Builder::new()
        .prefix(&preview_prefix())
        .tempdir()
        .map_err(|e| Error::Render(format!("preview directory: {}", e)))?;
    let path = dir.path().join(PREVIEW);
    save(chart, &path, output.size())?;

    let viewer = output.viewer();
    let (program, args) = match viewer.command.split_first() {
        Some(split) => split,
        None => return Err(Error::Viewer("no viewer configured".to_owned())),
    };

    info!("opening {} with {}", path.display(), program);
    let status = Command::new(program)
        .args(args)
        .arg(&path)
        .status()
        .map_err(|e| Error::Viewer(format!("{}: {}", program, e)))?;

    if !status.success() {
        return Err(Error::Viewer(format!("{} exited with {}", program, status)));
    }

    if viewer.detached {
        println!("Press Enter to close the preview");
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::Viewer(e.to_string()))?;
    }

    Ok(Outcome::Shown)
}

/// Name prefix of this process's preview directories.
pub fn preview_prefix() -> String {
    format!("{}-{}-", NAME, std::process::id())
}
