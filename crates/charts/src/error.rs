use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No data to plot for '{0}'.")]
    NoData(String),
}
