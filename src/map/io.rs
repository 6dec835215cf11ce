use std::{fmt, io::Read, num::ParseFloatError, path::Path};

use clap::ValueEnum;
use ndarray::{prelude::*, ShapeError};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rustc_hash::FxHashSet as HashSet;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One point per line, coordinates separated by whitespace or commas
    Text,
    /// An array of coordinate arrays
    Json,
}

impl InputFormat {
    /// Guess the format from a file extension, defaulting to text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Parse { line: usize, source: ParseFloatError },
    WrongDimension {
        line: usize,
        expected: usize,
        found: usize,
    },
    NonFiniteCoordinate { line: usize },
    CountMismatch { expected: usize, found: usize },
    Empty,
    /// Random points need a finite, positive square side
    InvalidSide(f64),
    Shape(ShapeError),
}

impl std::error::Error for LoadError {}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{}", e),
            Self::Json(e) => write!(f, "{}", e),
            Self::Parse { line, source } => write!(f, "Line {}: {}", line, source),
            Self::WrongDimension {
                line,
                expected,
                found,
            } => write!(
                f,
                "Line {}: expected {} coordinates but found {}",
                line, expected, found
            ),
            Self::NonFiniteCoordinate { line } => {
                write!(f, "Line {}: coordinates must be finite", line)
            }
            Self::CountMismatch { expected, found } => write!(
                f,
                "Header declares {} points but {} were given",
                expected, found
            ),
            Self::Empty => write!(f, "No points were given"),
            Self::InvalidSide(side) => write!(
                f,
                "Side length must be finite and positive but was {}",
                side
            ),
            Self::Shape(e) => write!(f, "{}", e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ShapeError> for LoadError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

pub fn read_points<R: Read>(mut reader: R, format: InputFormat) -> Result<Array2<f64>, LoadError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    match format {
        InputFormat::Text => parse_text(&input),
        InputFormat::Json => parse_json(&input),
    }
}

/// Parse one point per line.
///
/// Blank lines and `#` comments are skipped. A first line holding a lone integer
/// followed by multi-coordinate points is a point count and must match.
pub fn parse_text(input: &str) -> Result<Array2<f64>, LoadError> {
    let mut rows = vec![];
    for (i, line) in input.lines().enumerate() {
        let line_number = i + 1;
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let tokens = content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>();
        rows.push((line_number, tokens));
    }

    let declared_count = match rows.as_slice() {
        [(_, header), (_, first), ..] if header.len() == 1 && first.len() > 1 => {
            header[0].parse::<usize>().ok()
        }
        _ => None,
    };
    if declared_count.is_some() {
        rows.remove(0);
    }

    let mut coordinates = vec![];
    for (line, tokens) in &rows {
        let row = tokens
            .iter()
            .map(|token| token.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| LoadError::Parse {
                line: *line,
                source,
            })?;
        coordinates.push((*line, row));
    }

    if let Some(expected) = declared_count {
        if expected != coordinates.len() {
            return Err(LoadError::CountMismatch {
                expected,
                found: coordinates.len(),
            });
        }
    }
    to_matrix(coordinates)
}

/// Parse an array of coordinate arrays such as `[[0, 0], [1, 2.5]]`.
pub fn parse_json(input: &str) -> Result<Array2<f64>, LoadError> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(input)?;
    to_matrix(
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| (i + 1, row))
            .collect(),
    )
}

/// Uniformly distributed points in `[0, side)²`.
pub fn random_points(count: usize, side: f64, seed: u64) -> Result<Array2<f64>, LoadError> {
    if !(side.is_finite() && side > 0.) {
        return Err(LoadError::InvalidSide(side));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(Array2::from_shape_simple_fn((count, 2), || {
        rng.gen_range(0.0..side)
    }))
}

fn to_matrix(rows: Vec<(usize, Vec<f64>)>) -> Result<Array2<f64>, LoadError> {
    let dimension = match rows.first() {
        Some((_, row)) => row.len(),
        None => return Err(LoadError::Empty),
    };

    let mut seen = HashSet::default();
    seen.reserve(rows.len());
    let mut data = Vec::with_capacity(rows.len() * dimension);
    for (line, row) in &rows {
        if row.len() != dimension {
            return Err(LoadError::WrongDimension {
                line: *line,
                expected: dimension,
                found: row.len(),
            });
        }
        if row.iter().any(|x| !x.is_finite()) {
            return Err(LoadError::NonFiniteCoordinate { line: *line });
        }
        // Adding zero folds -0.0 into 0.0
        let key = row.iter().map(|x| (x + 0.).to_bits()).collect::<Vec<_>>();
        if !seen.insert(key) {
            warn!("Line {} repeats an earlier point", line);
        }
        data.extend_from_slice(row);
    }

    debug!("Loaded {} points of dimension {}", rows.len(), dimension);
    Ok(Array2::from_shape_vec((rows.len(), dimension), data)?)
}
