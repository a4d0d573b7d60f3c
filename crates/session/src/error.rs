use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input stream closed.")]
    InputClosed,

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}
