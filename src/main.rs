use std::{
    error::Error,
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use clap::Parser;
use serde::Serialize;
use tracing::{info, warn, Level};

use mst_tour::{
    map::io::{random_points, read_points, InputFormat},
    DistanceMetric, PointMap, TspGraph,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opt {
    /// A path to a file of points, else reads from stdin
    file: Option<PathBuf>,

    /// Input format, guessed from the file extension when not given
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Distance between points
    #[arg(long, value_enum, default_value_t = DistanceMetric::Euclidean)]
    metric: DistanceMetric,

    /// Generate this many random points instead of reading them
    #[arg(long, conflicts_with = "file")]
    random: Option<usize>,

    /// Seed for random points
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Side length of the square random points are placed in
    #[arg(long, default_value_t = 1000.)]
    side: f64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity, can be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Report {
    points: usize,
    metric: DistanceMetric,
    mst_weight: f64,
    tour: Vec<usize>,
    tour_distance: f64,
    /// Tour distance over MST weight, at most 2 for metric inputs
    ratio: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::parse();

    let level = match opt.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let points = match (&opt.file, opt.random) {
        (_, Some(count)) => {
            info!("Generating {} random points with seed {}", count, opt.seed);
            random_points(count, opt.side, opt.seed)?
        }
        (Some(path), None) => {
            let format = opt.format.unwrap_or_else(|| InputFormat::from_path(path));
            info!("Reading {:?} as {:?}", path, format);
            read_points(BufReader::new(File::open(path)?), format)?
        }
        (None, None) => {
            info!("Reading from stdin");
            read_points(io::stdin().lock(), opt.format.unwrap_or(InputFormat::Text))?
        }
    };

    let mut graph = TspGraph::new(PointMap::new(points, opt.metric));
    let mst_weight = graph.mst()?.weight;
    graph.tsp()?;
    let tour_distance = graph.tour_distance()?;
    let tour = graph.tour_order().unwrap_or_default();

    let ratio = if mst_weight > 0. {
        tour_distance / mst_weight
    } else {
        1.
    };
    if ratio > 2. {
        warn!(
            "Tour is {:.3} times the MST, the distance may violate the triangle inequality",
            ratio
        );
    }

    let report = Report {
        points: tour.len(),
        metric: opt.metric,
        mst_weight,
        tour,
        tour_distance,
        ratio,
    };
    if opt.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("points: {}", report.points);
        println!("metric: {:?}", report.metric);
        println!("mst weight: {}", report.mst_weight);
        println!("tour distance: {}", report.tour_distance);
        println!("ratio: {:.4}", report.ratio);
        println!(
            "tour: {}",
            report
                .tour
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        );
    }

    Ok(())
}
