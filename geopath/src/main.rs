mod options;

use anyhow::Error as AnyError;
use clap::Parser;
use options::{Cli, Command as CliCmd, LatLon, Service};
use serde::Serialize;
use std::{io::Write, time::Duration};
use terrain::{
    elevation::{
        ElevationSource, OpenElevation, OpenTopoData, RetryPolicy, ServiceOptions,
        OPENTOPODATA_URL, OPEN_ELEVATION_URL,
    },
    Profile,
};
use textplots::{Chart, Plot, Shape};

fn main() -> Result<(), AnyError> {
    let Cli {
        start: LatLon(start),
        end: LatLon(end),
        samples,
        earth_curve,
        model,
        allow_degenerate,
        service,
        url,
        dataset,
        batch_size,
        timeout_ms,
        max_attempts,
        base_delay_ms,
        max_delay_ms,
        cmd,
    } = Cli::parse();

    env_logger::init();

    let opts = ServiceOptions::default()
        .batch_size(batch_size)
        .timeout(Duration::from_millis(timeout_ms))
        .retry(
            RetryPolicy::default()
                .max_attempts(max_attempts)
                .base_delay(Duration::from_millis(base_delay_ms))
                .max_delay(Duration::from_millis(max_delay_ms)),
        );

    let source: Box<dyn ElevationSource> = match service {
        Service::OpenElevation => Box::new(OpenElevation::new(
            url.as_deref().unwrap_or(OPEN_ELEVATION_URL),
            opts,
        )?),
        Service::Opentopodata => Box::new(OpenTopoData::new(
            url.as_deref().unwrap_or(OPENTOPODATA_URL),
            &dataset,
            opts,
        )?),
    };

    eprintln!("start: {start:?}, end: {end:?}, samples: {samples}, model: {model:?}");

    let profile = Profile::builder()
        .start(start)
        .end(end)
        .samples(samples)
        .earth_curve(earth_curve)
        .model(model.into())
        .allow_degenerate(allow_degenerate)
        .build(source.as_ref())?;

    eprintln!("distance: {} m", profile.distance_m);

    match cmd {
        CliCmd::Csv => print_csv(&profile)?,
        CliCmd::Json => print_json(&profile)?,
        CliCmd::Plot => plot_ascii(&profile, earth_curve),
    };

    Ok(())
}

/// # Example with gnuplot
///
/// ```sh
/// cargo run -- --start=42.087076,11.796718 --end=42.947266,13.888322 --earth-curve csv | tr ',' ' ' > ~/.tmp/plot && gnuplot -p -e "plot '~/.tmp/plot' using 1:4 with lines"
/// ```
fn print_csv(profile: &Profile) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Distance,Longitude,Latitude,Elevation,Curvature")?;
    for sample in &profile.samples {
        let distance = sample.distance_m;
        let longitude = sample.point.x();
        let latitude = sample.point.y();
        let elevation = sample.elevation_m;
        let curvature = sample.curvature_m;
        writeln!(
            stdout,
            "{distance},{longitude},{latitude},{elevation},{curvature}"
        )?;
    }
    Ok(())
}

fn print_json(profile: &Profile) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonEntry {
        location: [f64; 2],
        distance: f64,
        elevation: f64,
    }

    let reshaped: Vec<JsonEntry> = profile
        .samples
        .iter()
        .map(|sample| JsonEntry {
            location: [sample.point.x(), sample.point.y()],
            distance: sample.distance_m,
            elevation: sample.elevation_m,
        })
        .collect();
    let json = serde_json::to_string(&reshaped)?;
    println!("{json}");
    Ok(())
}

/// Plots elevation against distance. With `earth_curve`, also draws
/// the earth's surface under the sightline, anchored at the lowest
/// terrain sample.
#[allow(clippy::cast_possible_truncation)]
fn plot_ascii(profile: &Profile, earth_curve: bool) {
    let terrain: Vec<(f32, f32)> = profile
        .samples
        .iter()
        .map(|s| (s.distance_m as f32, s.elevation_m as f32))
        .collect();

    let (width, height, xmax) = (300, 150, profile.distance_m as f32);
    if earth_curve {
        let lowest = profile
            .samples
            .iter()
            .map(|s| s.elevation_m + s.curvature_m)
            .fold(f64::INFINITY, f64::min);
        let surface: Vec<(f32, f32)> = profile
            .samples
            .iter()
            .map(|s| (s.distance_m as f32, (lowest - s.curvature_m) as f32))
            .collect();
        Chart::new(width, height, 0.0, xmax)
            .lineplot(&Shape::Lines(&terrain))
            .lineplot(&Shape::Lines(&surface))
            .display();
    } else {
        Chart::new(width, height, 0.0, xmax)
            .lineplot(&Shape::Lines(&terrain))
            .display();
    }
}
