//! Selector cascade resolution.

use seatwatch_browser::{BrowserActions, ElementSet, Locator, Result};

/// The first strategy of a cascade that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeMatch {
    /// Position of the matching strategy in the cascade
    pub strategy: usize,
    /// Elements it matched (never empty)
    pub elements: ElementSet,
}

/// Outcome of resolving a cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A strategy matched at least one element
    Matched(CascadeMatch),
    /// Every strategy matched nothing
    NoMatch,
}

impl Resolution {
    /// Number of elements matched, zero for `NoMatch`.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Matched(m) => m.elements.count(),
            Self::NoMatch => 0,
        }
    }

    /// Whether any strategy matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// Try each locator in order and return the first with a non-zero match
/// count.
pub async fn resolve<S>(session: &mut S, cascade: &[Locator]) -> Result<Resolution>
where
    S: BrowserActions + ?Sized,
{
    for (strategy, locator) in cascade.iter().enumerate() {
        let elements = session.locate(locator).await?;
        if !elements.is_empty() {
            tracing::debug!(
                "Cascade matched {} element(s) using {}",
                elements.count(),
                locator
            );
            return Ok(Resolution::Matched(CascadeMatch { strategy, elements }));
        }
    }

    Ok(Resolution::NoMatch)
}
