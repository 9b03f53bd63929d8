/*
 * Error type for the decoration subsystem. Internal operations return
 * `Result`; only the C ABI layer collapses these into the host's boolean/void
 * contract, logging the failure on the way out.
 */

use crate::types::WindowHandle;

#[derive(Debug, thiserror::Error)]
pub enum DecorationError {
    #[error("decoration subsystem is not initialized")]
    NotInitialized,
    #[error("decoration subsystem is already initialized")]
    AlreadyInitialized,
    #[error("window {0} already has decorations installed")]
    AlreadyInstalled(WindowHandle),
    #[error("window {0} is not decorated")]
    NotDecorated(WindowHandle),
    #[error("window handle {0} is invalid")]
    InvalidHandle(WindowHandle),
    #[error("OS call failed: {0}")]
    Os(String),
}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for DecorationError {
    fn from(err: windows::core::Error) -> Self {
        DecorationError::Os(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DecorationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_decorated_message_names_the_handle() {
        let err = DecorationError::NotDecorated(WindowHandle::new(0xbeef));
        assert_eq!(err.to_string(), "window 0xbeef is not decorated");
    }
}
