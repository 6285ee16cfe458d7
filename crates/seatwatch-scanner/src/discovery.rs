//! Zone discovery on the seat-selector popup.

use crate::cascade::{resolve, Resolution};
use crate::error::{Result, ScanError};
use crate::selectors;
use crate::zone::ZoneDescriptor;
use seatwatch_browser::BrowserActions;

/// Enumerate the zones offered by the seat selector, in page order.
///
/// Entries whose text cannot be read or does not carry a `Sec <code>` label
/// are skipped. Returns [`ScanError::DiscoveryEmpty`] if nothing survives.
pub async fn discover_zones<S>(session: &mut S) -> Result<Vec<ZoneDescriptor>>
where
    S: BrowserActions + ?Sized,
{
    let Resolution::Matched(found) = resolve(session, selectors::zone_entries()).await? else {
        tracing::warn!("No zone entries matched any discovery strategy");
        return Err(ScanError::DiscoveryEmpty);
    };

    tracing::info!(
        "Found {} zone candidate(s) using strategy #{}",
        found.elements.count(),
        found.strategy + 1
    );

    let mut zones = Vec::new();
    for element in found.elements.iter() {
        let text = match session.text_content(&element).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!("Zone candidate #{} has no text", element.index);
                continue;
            }
            Err(e) => {
                tracing::debug!("Skipping unreadable zone candidate #{}: {}", element.index, e);
                continue;
            }
        };

        // Positions count surviving zones only
        match ZoneDescriptor::parse(&text, zones.len()) {
            Some(zone) => {
                tracing::debug!("Discovered zone {} ({})", zone.code, zone.display_name);
                zones.push(zone);
            }
            None => tracing::debug!("Ignoring non-zone entry '{}'", text.trim()),
        }
    }

    if zones.is_empty() {
        tracing::warn!("Zone candidates found but none carried a section code");
        return Err(ScanError::DiscoveryEmpty);
    }

    Ok(zones)
}
