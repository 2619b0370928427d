use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("No data to compute single-row metric '{0}' over an empty input")]
    NoData(&'static str),
}
