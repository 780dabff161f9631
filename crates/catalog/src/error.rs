use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Outline error: {0}")]
    OutlineError(#[from] memotree_outline::OutlineError),

    #[error("Invalid project root: {0}")]
    InvalidRoot(String),
}
