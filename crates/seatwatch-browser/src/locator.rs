//! Locator strategies understood by every [`BrowserActions`](crate::BrowserActions)
//! implementation.

use std::fmt;

/// One way of finding elements on the current page.
///
/// Text-based variants match the innermost elements whose
/// whitespace-normalised text satisfies the condition, so a list item
/// matches rather than every ancestor that contains it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// CSS selector (e.g. `.seat-list li`)
    Css(String),
    /// Case-insensitive substring of the element text
    Text(String),
    /// Exact, case-sensitive element text
    ExactText(String),
    /// Regular expression over the element text (JavaScript syntax)
    Pattern {
        /// Expression source without delimiters
        source: String,
        /// Match without regard to case
        case_insensitive: bool,
    },
}

impl Locator {
    /// Create a CSS locator.
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a loose text locator.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an exact text locator.
    #[must_use]
    pub fn exact_text(text: impl Into<String>) -> Self {
        Self::ExactText(text.into())
    }

    /// Create a case-insensitive pattern locator.
    #[must_use]
    pub fn pattern_ci(source: impl Into<String>) -> Self {
        Self::Pattern {
            source: source.into(),
            case_insensitive: true,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(selector) => write!(f, "css={selector}"),
            Self::Text(text) => write!(f, "text={text}"),
            Self::ExactText(text) => write!(f, "text=\"{text}\""),
            Self::Pattern {
                source,
                case_insensitive,
            } => {
                let flags = if *case_insensitive { "i" } else { "" };
                write!(f, "text=/{source}/{flags}")
            }
        }
    }
}
