// Domain errors shared by the codec and the store ports

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TicketDecodeError {
    #[error("expected 3 segments, found {0}")]
    SegmentCount(usize),
    #[error("unexpected ticket tag '{0}'")]
    Tag(String),
    #[error("segment '{0}' is not a non-negative integer")]
    Segment(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("registration already exists")]
    Duplicate,
    #[error("registration disappeared before update")]
    Missing,
    #[error(transparent)]
    Unavailable(#[from] anyhow::Error),
}
