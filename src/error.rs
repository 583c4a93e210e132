// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use thiserror::Error;

use std::path::PathBuf;

/// Failures that end a run. Malformed rows are not errors; the loader skips
/// them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read { path: PathBuf, source: csv::Error },
    #[error("bad config {}: {}", .path.display(), .reason)]
    Config { path: PathBuf, reason: String },
    #[error("failed to render chart: {0}")]
    Render(String),
    #[error("viewer failed: {0}")]
    Viewer(String),
}
