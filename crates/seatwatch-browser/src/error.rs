use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    ChromiumError(String),

    #[error("navigation failed: {0}")]
    NavigationError(String),

    #[error("element {index} not found for {locator}")]
    ElementNotFound { locator: String, index: usize },

    #[error("script evaluation failed: {0}")]
    ScriptError(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("browser session already closed")]
    SessionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for BrowserError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::ChromiumError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrowserError::NavigationError("page not found".to_string());
        assert_eq!(err.to_string(), "navigation failed: page not found");
    }

    #[test]
    fn test_element_not_found_display() {
        let err = BrowserError::ElementNotFound {
            locator: "css=.btn-close".to_string(),
            index: 2,
        };
        assert_eq!(err.to_string(), "element 2 not found for css=.btn-close");
    }
}
