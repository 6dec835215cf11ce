use std::fmt;

/// Failures of the queue, tree and tour operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Point id is not below the queue capacity
    PointOutOfRange { point: usize, capacity: usize },
    PointAlreadyQueued(usize),
    /// Priorities must be comparable, so NaN is rejected
    NanPriority(usize),
    EmptyQueue,
    /// The operation needs a non-empty point set
    Unsupported(&'static str),
    /// Point could not be reached with a finite distance from the root
    Disconnected(usize),
    /// Links do not form a single cycle through every point
    InvalidTour,
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutOfRange { point, capacity } => write!(
                f,
                "Point {} is out of range for a queue of capacity {}",
                point, capacity
            ),
            Self::PointAlreadyQueued(point) => write!(f, "Point {} is already queued", point),
            Self::NanPriority(point) => write!(f, "Point {} was given a NaN priority", point),
            Self::EmptyQueue => write!(f, "Cannot extract from an empty queue"),
            Self::Unsupported(reason) => write!(f, "Unsupported operation: {}", reason),
            Self::Disconnected(point) => {
                write!(f, "Point {} is not connected to the rest of the map", point)
            }
            Self::InvalidTour => write!(f, "Links do not form a tour through every point"),
        }
    }
}
