use thiserror::Error;

/// Errors that can occur during window operations.
#[derive(Error, Debug)]
pub enum Error {
    /// An Accessibility API operation failed with the given error code.
    #[error("AX operation failed: code {0}")]
    AxCode(i32),

    /// The AX element became invalid (e.g., window closed) during the operation.
    #[error("AX element invalid (window gone)")]
    WindowGone,

    /// The handle passed to a mutation does not reference an element this
    /// backend can operate on.
    #[error("window handle not usable by this backend")]
    NoHandle,

    /// The requested attribute or operation is not supported.
    #[error("Unsupported attribute")]
    Unsupported,

    /// Window operations were requested on a platform other than macOS.
    #[error("window operations are only available on macOS")]
    UnsupportedPlatform,
}

pub type Result<T> = std::result::Result<T, Error>;
