use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
