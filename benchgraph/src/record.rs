// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// One shortest-path benchmark measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkRecord {
    pub vertices: u64,
    pub edges: u64,
    pub directed: bool,
    pub algorithm: String,
    pub elapsed_ms: f64,
    /// Base name of the file the record was read from.
    pub source: String,
}

impl BenchmarkRecord {
    pub fn new(
        vertices: u64,
        edges: u64,
        directed: bool,
        algorithm: impl Into<String>,
        elapsed_ms: f64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            vertices,
            edges,
            directed,
            algorithm: algorithm.into(),
            elapsed_ms,
            source: source.into(),
        }
    }
}
