use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(csv::Error),

    #[error("frame index went backwards: last accepted {last}, got {got}")]
    FrameOrder { last: u64, got: u64 },
}

// Filesystem failures behind the csv writer surface as plain `Io`.
impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return Error::Csv(err);
        }

        match err.into_kind() {
            csv::ErrorKind::Io(io) => Error::Io(io),
            _ => unreachable!(),
        }
    }
}
