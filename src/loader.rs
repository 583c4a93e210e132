// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reads benchmark CSV files into [`BenchmarkRecord`]s.
//!
//! Files carry a header row naming the columns `n`, `m`, `algo`, `time_us`
//! and optionally `directed`, in any order. Rows that cannot be converted
//! are skipped; a file that cannot be opened or read aborts the load.

use crate::Error;

use benchgraph::BenchmarkRecord;
use csv::{ReaderBuilder, StringRecord};
use logger::*;

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw `directed` values that mean `true`. Matching is exact; anything else,
/// including an absent column, means `false`.
pub const TRUTHY: [&str; 3] = ["1", "true", "True"];

const VERTICES: &str = "n";
const EDGES: &str = "m";
const DIRECTED: &str = "directed";
const ALGORITHM: &str = "algo";
const TIME_US: &str = "time_us";

/// Everything accepted from a load, plus the number of rows dropped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<BenchmarkRecord>,
    pub skipped: usize,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Column positions resolved from a header row.
#[derive(Debug, PartialEq)]
struct Columns {
    vertices: usize,
    edges: usize,
    directed: Option<usize>,
    algorithm: usize,
    time_us: usize,
}

impl Columns {
    /// Returns the names of the missing required columns on failure.
    fn from_headers(headers: &StringRecord) -> Result<Self, Vec<&'static str>> {
        // a repeated name resolves to its last occurrence
        let find = |name: &str| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| *header == name)
                .map(|(position, _)| position)
                .last()
        };

        let mut missing = Vec::new();
        let mut require = |name: &'static str| {
            let position = find(name);
            if position.is_none() {
                missing.push(name);
            }
            position
        };

        let vertices = require(VERTICES);
        let edges = require(EDGES);
        let algorithm = require(ALGORITHM);
        let time_us = require(TIME_US);

        match (vertices, edges, algorithm, time_us) {
            (Some(vertices), Some(edges), Some(algorithm), Some(time_us)) => Ok(Self {
                vertices,
                edges,
                directed: find(DIRECTED),
                algorithm,
                time_us,
            }),
            _ => Err(missing),
        }
    }
}

pub fn is_directed(value: Option<&str>) -> bool {
    value.map_or(false, |v| TRUTHY.contains(&v))
}

/// Convert one row. `None` means the row is malformed and must be skipped.
fn parse_row(row: &StringRecord, columns: &Columns, source: &str) -> Option<BenchmarkRecord> {
    let vertices = row.get(columns.vertices)?.trim().parse::<u64>().ok()?;
    let edges = row.get(columns.edges)?.trim().parse::<u64>().ok()?;
    let time_us = row.get(columns.time_us)?.trim().parse::<f64>().ok()?;
    if !time_us.is_finite() || time_us < 0.0 {
        return None;
    }

    let algorithm = row.get(columns.algorithm)?;
    if algorithm.is_empty() {
        return None;
    }

    let directed = is_directed(columns.directed.and_then(|c| row.get(c)));

    Some(BenchmarkRecord::new(
        vertices,
        edges,
        directed,
        algorithm,
        time_us / 1000.0,
        source,
    ))
}

/// Load every row of `reader` into `report`, labelling records with
/// `source`. Only I/O failures are returned; every other problem skips the
/// affected row.
pub fn load_reader<R: Read>(
    reader: R,
    source: &str,
    report: &mut LoadReport,
) -> Result<(), csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) if e.is_io_error() => return Err(e),
        Err(e) => {
            warn!("{}: unreadable header: {}", source, e);
            StringRecord::new()
        }
    };
    let columns = Columns::from_headers(&headers);
    if let Err(missing) = &columns {
        warn!(
            "{}: missing column(s) {}; no rows will be used",
            source,
            missing.join(", ")
        );
    }

    let mut accepted = 0;
    let mut skipped = 0;
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                trace!("{}: {}", source, e);
                skipped += 1;
                continue;
            }
        };

        let record = match &columns {
            Ok(columns) => parse_row(&row, columns, source),
            Err(_) => None,
        };
        match record {
            Some(record) => {
                report.records.push(record);
                accepted += 1;
            }
            None => {
                trace!("{}: skipping row {:?}", source, row);
                skipped += 1;
            }
        }
    }

    debug!("{}: {} rows used, {} skipped", source, accepted, skipped);
    report.skipped += skipped;
    Ok(())
}

/// Load a single file, appending its records to `report`.
pub fn load_file(path: &Path, report: &mut LoadReport) -> Result<(), Error> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    load_reader(file, &source, report).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the files in order. Records keep file order, then row order.
pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<LoadReport, Error> {
    let mut report = LoadReport::default();
    for path in paths {
        load_file(path.as_ref(), &mut report)?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(csv: &str) -> LoadReport {
        let mut report = LoadReport::default();
        load_reader(csv.as_bytes(), "bench.csv", &mut report).unwrap();
        report
    }

    #[test]
    fn converts_microseconds() {
        let report = load_str("n,m,directed,algo,time_us\n10,20,0,dijkstra,500\n20,40,0,dijkstra,1234.5\n");
        assert_eq!(report.records.len(), 2);
        assert!((report.records[0].elapsed_ms - 0.5).abs() < 1e-12);
        assert!((report.records[1].elapsed_ms - 1.2345).abs() < 1e-12);
        assert_eq!(report.records[0].vertices, 10);
        assert_eq!(report.records[0].edges, 20);
        assert_eq!(report.records[0].algorithm, "dijkstra");
        assert_eq!(report.records[0].source, "bench.csv");
    }

    #[test]
    fn truthy_literals() {
        let csv = "n,m,directed,algo,time_us\n\
                   1,1,1,a,1\n\
                   1,1,true,a,1\n\
                   1,1,True,a,1\n\
                   1,1,TRUE,a,1\n\
                   1,1,yes,a,1\n\
                   1,1,0,a,1\n\
                   1,1, 1,a,1\n\
                   1,1,,a,1\n";
        let directed: Vec<bool> = load_str(csv).records.iter().map(|r| r.directed).collect();
        assert_eq!(
            directed,
            vec![true, true, true, false, false, false, false, false]
        );
    }

    #[test]
    fn directed_defaults_to_false() {
        let report = load_str("n,m,algo,time_us\n5,6,bfs,10\n");
        assert_eq!(report.records.len(), 1);
        assert!(!report.records[0].directed);
    }

    #[test]
    fn column_order_is_free() {
        let report = load_str("time_us,algo,directed,m,n\n2000,bfs,True,9,8\n");
        let record = &report.records[0];
        assert_eq!((record.vertices, record.edges), (8, 9));
        assert!(record.directed);
        assert!((record.elapsed_ms - 2.0).abs() < 1e-12);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let csv = "n,m,directed,algo,time_us\n\
                   10,20,0,dijkstra,500\n\
                   abc,20,0,dijkstra,500\n\
                   10,x,0,dijkstra,500\n\
                   10,20,0,dijkstra,fast\n\
                   -1,20,0,dijkstra,500\n\
                   10,20,0,,500\n\
                   10,20\n\
                   20,40,0,dijkstra,1200\n";
        let report = load_str(csv);
        assert_eq!(report.skipped, 6);
        let vertices: Vec<u64> = report.records.iter().map(|r| r.vertices).collect();
        assert_eq!(vertices, vec![10, 20]);
    }

    #[test]
    fn numeric_fields_tolerate_padding() {
        let report = load_str("n,m,algo,time_us\n 10 , 20 ,bfs, 1000 \n");
        assert_eq!(report.records.len(), 1);
        assert!((report.records[0].elapsed_ms - 1.0).abs() < 1e-12);
    }

    #[test]
    fn algorithm_is_verbatim() {
        let report = load_str("n,m,algo,time_us\n1,1, Dijkstra ,1\n");
        assert_eq!(report.records[0].algorithm, " Dijkstra ");
    }

    #[test]
    fn missing_required_column_drops_file_rows() {
        let report = load_str("n,m,algo\n10,20,dijkstra\n20,40,dijkstra\n");
        assert!(report.is_empty());
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn empty_input() {
        assert!(load_str("").is_empty());
        assert!(load_str("n,m,directed,algo,time_us\n").is_empty());
    }

    #[test]
    fn headers() {
        let headers = StringRecord::from(vec!["algo", "n", "m", "time_us", "n"]);
        assert_eq!(
            Columns::from_headers(&headers),
            Ok(Columns {
                vertices: 4,
                edges: 2,
                directed: None,
                algorithm: 0,
                time_us: 3,
            })
        );

        let headers = StringRecord::from(vec!["n", "directed"]);
        assert_eq!(
            Columns::from_headers(&headers),
            Err(vec!["m", "algo", "time_us"])
        );
    }

    #[test]
    fn missing_file_is_fatal() {
        let mut report = LoadReport::default();
        let result = load_file(Path::new("/nonexistent/bench.csv"), &mut report);
        assert!(matches!(result, Err(Error::Open { .. })));
    }
}
