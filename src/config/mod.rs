// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod general;
mod output;

pub use self::general::General;
pub use self::output::{Output, Viewer};

use crate::Error;

use clap::{App, Arg, ArgMatches};
use logger::Level;
use serde_derive::*;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

const LEVELS: [Level; 5] = [
    Level::Error,
    Level::Warn,
    Level::Info,
    Level::Debug,
    Level::Trace,
];

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    output: Output,
    #[serde(skip)]
    inputs: Vec<PathBuf>,
    #[serde(skip)]
    out: Option<PathBuf>,
}

fn app() -> App<'static, 'static> {
    App::new(NAME)
        .version(VERSION)
        .about("Plot shortest-path benchmark results (CSV from graph_cli)")
        .arg(
            Arg::with_name("csv")
                .value_name("CSV")
                .help("One or more benchmark CSV files")
                .required(true)
                .multiple(true)
                .index(1),
        )
        .arg(
            Arg::with_name("out")
                .long("out")
                .value_name("FILE")
                .help("Save the plot to a PNG file instead of showing it")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increase verbosity by one level. Can be used more than once")
                .multiple(true),
        )
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new() -> Result<Config, Error> {
        Self::from_args(std::env::args_os())
    }

    /// Same as [`Config::new`] for an explicit argument list. The first item
    /// is the program name.
    pub fn from_args<I, T>(args: I) -> Result<Config, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from(args);
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Config, Error> {
        let mut config = if let Some(file) = matches.value_of_os("config") {
            Config::load_from_file(Path::new(file))?
        } else {
            Default::default()
        };

        config.inputs = matches
            .values_of_os("csv")
            .map(|values| values.map(PathBuf::from).collect())
            .unwrap_or_default();
        config.out = matches.value_of_os("out").map(PathBuf::from);

        let verbose = matches.occurrences_of("verbose") as usize;
        if verbose > 0 {
            let level = raise(config.general.logging(), verbose);
            config.general.set_logging(level);
        }

        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Config, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::load_from_str(path, &content)
    }

    fn load_from_str(path: &Path, content: &str) -> Result<Config, Error> {
        toml::from_str(content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn logging(&self) -> Level {
        self.general.logging()
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Image file to write, or `None` to show the chart in a viewer.
    pub fn out(&self) -> Option<&Path> {
        self.out.as_deref()
    }
}

/// Raise `level` by `steps` towards trace.
fn raise(level: Level, steps: usize) -> Level {
    let current = LEVELS.iter().position(|l| *l == level).unwrap_or(2);
    LEVELS[(current + steps).min(LEVELS.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_args(vec!["sp-bench-plot", "bench.csv"]).unwrap();
        assert_eq!(config.inputs(), &[PathBuf::from("bench.csv")]);
        assert_eq!(config.out(), None);
        assert_eq!(config.logging(), Level::Info);
        assert_eq!(config.output().size(), (1280, 960));
        assert!(!config.output().viewer().command.is_empty());
    }

    #[test]
    fn multiple_inputs_and_out() {
        let config = Config::from_args(vec![
            "sp-bench-plot",
            "a.csv",
            "b.csv",
            "--out",
            "plot.png",
        ])
        .unwrap();
        assert_eq!(
            config.inputs(),
            &[PathBuf::from("a.csv"), PathBuf::from("b.csv")]
        );
        assert_eq!(config.out(), Some(Path::new("plot.png")));
    }

    #[test]
    fn verbosity_stacks() {
        let config = Config::from_args(vec!["sp-bench-plot", "-v", "a.csv"]).unwrap();
        assert_eq!(config.logging(), Level::Debug);
        let config = Config::from_args(vec!["sp-bench-plot", "-vvv", "a.csv"]).unwrap();
        assert_eq!(config.logging(), Level::Trace);
    }

    #[test]
    fn toml_sections() {
        let config = Config::load_from_str(
            Path::new("plot.toml"),
            "[general]\nlogging = \"debug\"\n\n[output]\nwidth = 640\nviewer = \"feh --scale-down\"\n",
        )
        .unwrap();
        assert_eq!(config.logging(), Level::Debug);
        assert_eq!(config.output().size(), (640, 960));
        assert_eq!(config.output().viewer().command, vec!["feh", "--scale-down"]);
        assert!(!config.output().viewer().detached);
    }

    #[test]
    fn empty_toml_is_default() {
        let config = Config::load_from_str(Path::new("plot.toml"), "").unwrap();
        assert_eq!(config.logging(), Level::Info);
        assert_eq!(config.output().size(), (1280, 960));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = Config::load_from_str(Path::new("plot.toml"), "[output]\ndpi = 300\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn missing_config_file() {
        let result = Config::load_from_file(Path::new("/nonexistent/plot.toml"));
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
