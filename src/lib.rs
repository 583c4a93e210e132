// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Plot shortest-path benchmark results.
//!
//! CSV files are read by the [`loader`], grouped and drawn by
//! [`benchgraph`], and written to a PNG or shown in a viewer by
//! [`present`]. [`run`] ties the steps together.

mod config;
mod error;
pub mod loader;
mod output;

pub use crate::config::{Config, General, Output, Viewer};
pub use crate::error::Error;
pub use crate::loader::{load, load_file, load_reader, LoadReport, TRUTHY};
pub use crate::output::{present, preview_prefix, save};

pub use benchgraph::{BenchmarkRecord, Chart, Series, SeriesKey};

use logger::*;

use std::path::PathBuf;

/// How a successful run ended.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// No input row was usable, so no chart was built.
    NoData,
    /// The chart was written to this file.
    Saved(PathBuf),
    /// The chart was shown and the viewer has been closed.
    Shown,
}

/// Load every input, then save or show the chart.
pub fn run(config: &Config) -> Result<Outcome, Error> {
    let report = load(config.inputs())?;
    if report.is_empty() {
        debug!("{} rows skipped, nothing to plot", report.skipped);
        return Ok(Outcome::NoData);
    }
    info!(
        "loaded {} records from {} file(s), {} rows skipped",
        report.records.len(),
        config.inputs().len(),
        report.skipped
    );

    let chart = Chart::new(&report.records);
    present(&chart, config)
}
