use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Malformed {entity} record at line {line}, field '{field}': {message}")]
    MalformedRecord {
        entity: &'static str,
        line: u64,
        field: &'static str,
        message: String,
    },

    #[error("Failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to open input file: {0}")]
    Io(#[from] std::io::Error),
}
