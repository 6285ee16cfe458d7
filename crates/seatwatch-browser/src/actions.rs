use crate::error::{BrowserError, Result};
use crate::locator::Locator;
use std::path::Path;
use std::time::Duration;

/// Browser actions the scanner performs against a live session.
///
/// Elements are addressed by locator plus index and re-resolved on every
/// call, so callers never hold handles across a DOM re-render.
#[async_trait::async_trait]
pub trait BrowserActions: Send {
    /// Navigate the focused page to a URL
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()>;

    /// Wait until the focused page stops loading resources
    async fn wait_for_network_idle(&mut self, timeout: Duration) -> Result<()>;

    /// Resolve a locator against the focused page
    async fn locate(&mut self, locator: &Locator) -> Result<ElementSet>;

    /// Whether the element is rendered with a non-empty box
    async fn is_visible(&mut self, element: &Element) -> Result<bool>;

    /// Whether the element accepts interaction
    async fn is_enabled(&mut self, element: &Element) -> Result<bool>;

    /// Click an element
    async fn click(&mut self, element: &Element) -> Result<()>;

    /// Extract the element's text content
    async fn text_content(&mut self, element: &Element) -> Result<Option<String>>;

    /// Identifiers of every open page (tabs/windows), focused page included
    async fn page_ids(&mut self) -> Result<Vec<String>>;

    /// Move focus to a page that is not in `known`, preferring one opened
    /// by the focused page; `false` if no new page exists
    async fn focus_new_page(&mut self, known: &[String]) -> Result<bool>;

    /// URL of the focused page
    async fn current_url(&mut self) -> Result<Option<String>>;

    /// Save a PNG screenshot of the focused page
    async fn screenshot(&mut self, path: &Path, full_page: bool) -> Result<()>;

    /// Release the session
    async fn close(&mut self) -> Result<()>;
}

/// Acquires browser sessions.
#[async_trait::async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Session type produced by this launcher
    type Session: BrowserActions;

    /// Start a fresh session
    async fn launch(&self) -> Result<Self::Session>;
}

/// The result of resolving a locator: how many elements matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSet {
    locator: Locator,
    count: usize,
}

impl ElementSet {
    #[must_use]
    pub fn new(locator: Locator, count: usize) -> Self {
        Self { locator, count }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The `index`-th match, if it exists.
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<Element> {
        (index < self.count).then(|| Element {
            locator: self.locator.clone(),
            index,
        })
    }

    #[must_use]
    pub fn first(&self) -> Option<Element> {
        self.nth(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Element> + '_ {
        (0..self.count).map(|index| Element {
            locator: self.locator.clone(),
            index,
        })
    }
}

/// A single match of a locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    pub locator: Locator,
    pub index: usize,
}

impl Element {
    pub(crate) fn not_found(&self) -> BrowserError {
        BrowserError::ElementNotFound {
            locator: self.locator.to_string(),
            index: self.index,
        }
    }
}

/// Helper to extract domain from URL
pub fn extract_domain(url: &str) -> Result<String> {
    let url = url::Url::parse(url)
        .map_err(|e| BrowserError::NavigationError(format!("Invalid URL: {}", e)))?;

    url.host_str()
        .ok_or_else(|| BrowserError::NavigationError("No host in URL".to_string()))
        .map(|s| s.to_string())
}
