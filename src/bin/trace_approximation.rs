extern crate clap;

use std::f64::consts::PI;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use clap::Parser;
use error_stack::{Report, ResultExt};
use geojson::Value::LineString;
use geojson::{Feature, FeatureCollection, Geometry};
use log::info;

use polyapprox::{EventRecorder, Point, PolyLine};

/// Approximates a synthetic damped sine path and prints what a viewer would
/// be told about it.
#[derive(Parser)]
struct Opts {
    /// Maximum deviation of the approximation, in metres
    #[clap(short, long, default_value = "1.0")]
    tolerance: f64,

    /// Number of points sampled along the path
    #[clap(short, long, default_value = "200")]
    samples: usize,

    /// Peak amplitude of the path, in metres
    #[clap(short, long, default_value = "25.0")]
    amplitude: f64,

    /// Wavelength of the path, in metres
    #[clap(short, long, default_value = "100.0")]
    wavelength: f64,

    /// Print the original and approximated paths as GeoJSON instead of the event stream
    #[clap(long)]
    geojson: bool,
}

#[derive(Debug)]
struct TraceError;

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failed to trace approximation")
    }
}

impl std::error::Error for TraceError {}

/// Three wavelengths of a sine wave that decays to about a fifth of its
/// amplitude.
fn damped_sine(samples: usize, amplitude: f64, wavelength: f64) -> PolyLine {
    let length = 3.0 * wavelength;
    let step = if samples > 1 { length / (samples - 1) as f64 } else { 0.0 };

    (0..samples)
        .map(|i| {
            let x = i as f64 * step;
            let y = amplitude * (-x / (2.0 * wavelength)).exp() * (2.0 * PI * x / wavelength).sin();
            Point::new(x, y)
        })
        .collect()
}

fn to_geojson_feature(line: &PolyLine, name: &str, tolerance: f64) -> Feature {
    let coords: Vec<Vec<f64>> = line.iter().map(|p| vec![p.x, p.y]).collect();

    let mut properties = serde_json::Map::new();
    properties.insert(String::from("name"), serde_json::Value::String(name.to_string()));
    properties.insert(String::from("points"), serde_json::Value::from(line.len()));
    if let Some(number) = serde_json::Number::from_f64(tolerance) {
        properties.insert(String::from("tolerance"), serde_json::Value::Number(number));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(LineString(coords))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn main() -> Result<(), Report<TraceError>> {
    env_logger::init();
    let opts: Opts = Opts::parse();

    let mut line = damped_sine(opts.samples, opts.amplitude, opts.wavelength);
    let recorder = Rc::new(EventRecorder::new());
    line.add_listener(&recorder);

    let approx = line.approximate(opts.tolerance).change_context(TraceError)?;
    info!("{} events for {} -> {} points", recorder.len(), line.len(), approx.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if opts.geojson {
        let collection = FeatureCollection {
            bbox: None,
            features: vec![
                to_geojson_feature(&line, "original", opts.tolerance),
                to_geojson_feature(&approx, "approximation", opts.tolerance),
            ],
            foreign_members: None,
        };
        let text = serde_json::to_string_pretty(&collection).change_context(TraceError)?;
        writeln!(out, "{}", text).change_context(TraceError)?;
    } else {
        recorder.write_json_lines(&mut out).change_context(TraceError)?;
    }

    Ok(())
}
