// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::BenchmarkRecord;

use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub algorithm: String,
    pub directed: bool,
}

impl SeriesKey {
    pub fn new(algorithm: impl Into<String>, directed: bool) -> Self {
        Self {
            algorithm: algorithm.into(),
            directed,
        }
    }

    fn orientation(&self) -> &'static str {
        if self.directed {
            "dir"
        } else {
            "undir"
        }
    }

    /// Legend text, eg: `dijkstra (undir)`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.algorithm, self.orientation())
    }
}

/// All records sharing one `(algorithm, directed)` key, ordered by vertex
/// count.
#[derive(Clone, Debug)]
pub struct Series {
    key: SeriesKey,
    records: Vec<BenchmarkRecord>,
}

impl Series {
    pub fn key(&self) -> &SeriesKey {
        &self.key
    }

    pub fn label(&self) -> String {
        self.key.label()
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(vertex count, elapsed milliseconds)` pairs in plotting order.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.vertices as f64, r.elapsed_ms))
            .collect()
    }
}

/// Partition records into series.
///
/// Series appear in the order their first record was encountered. Within a
/// series, records are sorted by vertex count and records with equal vertex
/// counts keep their input order.
pub fn group(records: &[BenchmarkRecord]) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    let mut index: HashMap<SeriesKey, usize> = HashMap::new();

    for record in records {
        let key = SeriesKey::new(record.algorithm.as_str(), record.directed);
        let position = match index.get(&key) {
            Some(position) => *position,
            None => {
                index.insert(key.clone(), series.len());
                series.push(Series {
                    key,
                    records: Vec::new(),
                });
                series.len() - 1
            }
        };
        series[position].records.push(record.clone());
    }

    for s in series.iter_mut() {
        // sort_by_key is stable
        s.records.sort_by_key(|r| r.vertices);
    }

    series
}
