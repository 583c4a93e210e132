// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Turns shortest-path benchmark records into a comparative line chart of
//! elapsed time against vertex count.

use plotters::style::RGBColor;

mod chart;
mod record;
mod series;

pub use chart::*;
pub use record::BenchmarkRecord;
pub use series::{group, Series, SeriesKey};

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

/// Series colours, assigned in series order and reused once exhausted.
pub const COLOURS: &[RGBColor] = &[
    hexcolour!(0xAA0000),
    hexcolour!(0x0000FF),
    hexcolour!(0x888888),
    hexcolour!(0xDDCC77),
    hexcolour!(0x999933),
    hexcolour!(0x332288),
    hexcolour!(0x117733),
    hexcolour!(0x88CCEE),
    hexcolour!(0x882255),
    hexcolour!(0x44AA99),
    hexcolour!(0xAA4499),
    hexcolour!(0xCC6677),
];

pub fn colour(index: usize) -> RGBColor {
    COLOURS[index % COLOURS.len()]
}
