#[cfg(feature = "plot")]
use crate::charts::ChartError;
use crate::{loader::LoaderError, statistics::StatisticsError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Statistics(#[from] StatisticsError),
    #[cfg(feature = "plot")]
    #[error(transparent)]
    Chart(#[from] ChartError),
}
pub type Result<T> = std::result::Result<T, Error>;
