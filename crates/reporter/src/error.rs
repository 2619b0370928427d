use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReporterError {
    #[error("Unknown metric name '{0}'")]
    UnknownMetric(String),
}
