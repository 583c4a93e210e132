// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::series::{group, Series};
use crate::{colour, BenchmarkRecord};

use logger::*;
use plotters::coord::ranged1d::Ranged;
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::ops::Range;
use std::path::Path;

pub const TITLE: &str = "Shortest path benchmark";
pub const X_DESC: &str = "vertex count";
pub const Y_DESC: &str = "time in milliseconds";

const FONT: &str = "sans-serif";
const GRID_LINES: usize = 10;
const DASH: i32 = 6;
const DASH_SPACING: i32 = 4;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    pub dashed: bool,
    pub opacity: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            dashed: true,
            opacity: 0.4,
        }
    }
}

/// An in-memory chart: decorations plus the grouped series. Rendering is a
/// separate step, see [`Chart::render`].
#[derive(Clone, Debug)]
pub struct Chart {
    caption: String,
    x_desc: String,
    y_desc: String,
    grid: Grid,
    legend: bool,
    series: Vec<Series>,
}

impl Chart {
    /// Build the chart for the given records. Callers are expected to check
    /// for an empty record set first; an empty chart renders only axes.
    pub fn new(records: &[BenchmarkRecord]) -> Self {
        let series = group(records);
        debug!(
            "grouped {} records into {} series",
            records.len(),
            series.len()
        );
        Self {
            caption: TITLE.to_owned(),
            x_desc: X_DESC.to_owned(),
            y_desc: Y_DESC.to_owned(),
            grid: Grid::default(),
            legend: true,
            series,
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn x_desc(&self) -> &str {
        &self.x_desc
    }

    pub fn y_desc(&self) -> &str {
        &self.y_desc
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn legend(&self) -> bool {
        self.legend
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Legend entries in drawing order.
    pub fn labels(&self) -> Vec<String> {
        self.series.iter().map(|s| s.label()).collect()
    }

    pub fn x_range(&self) -> Range<f64> {
        padded(self.series.iter().flat_map(|s| s.points()).map(|(x, _)| x))
    }

    pub fn y_range(&self) -> Range<f64> {
        padded(self.series.iter().flat_map(|s| s.points()).map(|(_, y)| y))
    }

    /// Draw the chart and write it to `filename` as a PNG, whatever the
    /// file extension.
    pub fn render(
        &self,
        filename: impl AsRef<Path>,
        size: (u32, u32),
    ) -> Result<(), Box<dyn Error>> {
        let mut buffer = vec![0u8; size.0 as usize * size.1 as usize * 3];
        self.draw(&mut buffer, size)?;
        write_png(filename.as_ref(), size, &buffer)
    }

    /// Draw the chart into an RGB buffer of `size`.
    pub fn draw(&self, buffer: &mut [u8], size: (u32, u32)) -> Result<(), Box<dyn Error>> {
        register_font(FONT, FontStyle::Normal, dejavu::sans_mono::regular())
            .map_err(|_| "embedded font could not be loaded")?;

        let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
        root.fill(&WHITE)?;

        let x_range = self.x_range();
        let y_range = self.y_range();

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.caption, (FONT, 40))
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 100)
            .set_label_area_size(LabelAreaPosition::Bottom, 70)
            .build_cartesian_2d(x_range.clone(), y_range.clone())?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(&self.x_desc)
            .y_desc(&self.y_desc)
            .x_label_formatter(&vertex_label)
            .label_style((FONT, 20))
            .axis_desc_style((FONT, 26))
            .draw()?;

        if self.grid.dashed {
            let style = BLACK.mix(self.grid.opacity);
            let (xs, ys) = {
                let coords = chart.as_coord_spec();
                (
                    coords.x_spec().key_points(GRID_LINES),
                    coords.y_spec().key_points(GRID_LINES),
                )
            };

            let lines = xs
                .into_iter()
                .map(|x| vec![(x, y_range.start), (x, y_range.end)])
                .chain(
                    ys.into_iter()
                        .map(|y| vec![(x_range.start, y), (x_range.end, y)]),
                );
            chart.draw_series(
                lines.map(|line| DashedPathElement::new(line, DASH, DASH_SPACING, style)),
            )?;
        }

        for (i, series) in self.series.iter().enumerate() {
            let colour = colour(i);
            chart
                .draw_series(
                    LineSeries::new(series.points(), colour.stroke_width(2)).point_size(4),
                )?
                .label(series.label())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2))
                });
        }

        if self.legend {
            chart
                .configure_series_labels()
                .label_font((FONT, 20))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .position(SeriesLabelPosition::UpperLeft)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

fn write_png(path: &Path, size: (u32, u32), buffer: &[u8]) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), size.0, size.1);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(buffer)?;
    writer.finish()?;
    Ok(())
}

// vertex counts are integers
fn vertex_label(x: &f64) -> String {
    format!("{:.0}", x)
}

/// Span of the values with a 5% margin on each side. Empty input yields
/// `0..1`; a single distinct value is widened so the range is never empty.
fn padded(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    });
    if min > max {
        return 0.0..1.0;
    }
    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else if min != 0.0 {
        min.abs() * 0.1
    } else {
        1.0
    };
    (min - pad)..(max + pad)
}
