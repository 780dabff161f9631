use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemoError>;

#[derive(Error, Debug)]
pub enum MemoError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
