//! Document host errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("No document available: {0}")]
    NoDocument(String),

    #[error("Frame is not accessible: {0}")]
    FrameInaccessible(String),

    #[error("Frame loads a document already on its ancestor chain: {0}")]
    FrameCycle(String),

    #[error("Frames nested deeper than {0} levels")]
    FrameTooDeep(usize),

    #[error("Element is detached or unknown: {0}")]
    Detached(String),

    #[error("Markup parse error: {0}")]
    Parse(String),

    #[error("Host error: {0}")]
    Host(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_frame_inaccessible() {
        let err = DocumentError::FrameInaccessible("https://ads.example.net/".to_string());
        assert!(err.to_string().contains("not accessible"));
        assert!(err.to_string().contains("ads.example.net"));
    }

    #[test]
    fn test_document_error_frame_nesting() {
        let err = DocumentError::FrameCycle("/a.html".to_string());
        assert!(err.to_string().contains("/a.html"));
        assert!(DocumentError::FrameTooDeep(10).to_string().contains("10"));
    }

    #[test]
    fn test_document_error_detached() {
        let err = DocumentError::Detached("node 42".to_string());
        assert!(err.to_string().contains("detached"));
    }

    #[test]
    fn test_document_error_debug() {
        let err = DocumentError::NoDocument("body".to_string());
        assert!(format!("{:?}", err).contains("NoDocument"));
    }
}
