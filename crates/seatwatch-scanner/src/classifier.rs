//! Per-zone seat-map classification.

use crate::cascade::resolve;
use crate::error::{Result, ScanError};
use crate::selectors;
use crate::zone::{ZoneDescriptor, ZoneFailure, ZoneOutcome, ZoneVerdict};
use seatwatch_browser::{BrowserActions, Locator};
use seatwatch_core::TimingsConfig;

/// Availability rule: seats must be visible and no sold-out marker present.
#[must_use]
pub fn decide_availability(seat_count: usize, sold_out_signal: bool) -> bool {
    seat_count > 0 && !sold_out_signal
}

/// Classifies zones one at a time against a live session.
///
/// Pauses for the throttle interval after every `throttle_every` zones,
/// counting failed zones too.
#[derive(Debug, Clone)]
pub struct ZoneClassifier {
    timings: TimingsConfig,
    throttle_every: usize,
    processed: usize,
}

impl ZoneClassifier {
    /// Create a classifier with the given waits and throttle cadence.
    #[must_use]
    pub fn new(timings: TimingsConfig, throttle_every: usize) -> Self {
        Self {
            timings,
            throttle_every: throttle_every.max(1),
            processed: 0,
        }
    }

    /// Number of zones processed so far.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Classify one zone. Errors never escape; they become a [`ZoneFailure`].
    pub async fn classify<S>(&mut self, session: &mut S, zone: &ZoneDescriptor) -> ZoneOutcome
    where
        S: BrowserActions + ?Sized,
    {
        let limit = self.timings.zone_timeout();
        let outcome = match tokio::time::timeout(limit, self.inspect(session, zone)).await {
            Ok(Ok(verdict)) => ZoneOutcome::Classified(verdict),
            Ok(Err(e)) => {
                tracing::warn!("Zone {} failed: {}", zone.display_name, e);
                ZoneOutcome::Failed(ZoneFailure {
                    zone: zone.clone(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                let e = ScanError::Timeout {
                    step: format!("zone {}", zone.code),
                    elapsed_ms: limit.as_millis(),
                };
                tracing::warn!("Zone {} failed: {}", zone.display_name, e);
                ZoneOutcome::Failed(ZoneFailure {
                    zone: zone.clone(),
                    reason: e.to_string(),
                })
            }
        };

        self.processed += 1;
        if self.processed % self.throttle_every == 0 {
            tracing::debug!("Throttling after {} zone(s)", self.processed);
            tokio::time::sleep(self.timings.throttle_pause()).await;
        }

        outcome
    }

    async fn inspect<S>(&self, session: &mut S, zone: &ZoneDescriptor) -> Result<ZoneVerdict>
    where
        S: BrowserActions + ?Sized,
    {
        let entry = session
            .locate(&Locator::exact_text(&zone.display_name))
            .await?
            .first();
        let not_visible = || ScanError::ZoneNotVisible {
            zone: zone.display_name.clone(),
        };
        let entry = entry.ok_or_else(not_visible)?;
        if !session.is_visible(&entry).await? {
            return Err(not_visible());
        }

        tracing::info!("Checking zone {} ({})", zone.code, zone.display_name);
        session.click(&entry).await?;
        tokio::time::sleep(self.timings.zone_settle()).await;

        let seat_count = resolve(session, selectors::open_seats()).await?.count();
        let sold_out = resolve(session, selectors::sold_out_signals())
            .await?
            .is_match();
        let available = decide_availability(seat_count, sold_out);

        if available {
            tracing::info!("Zone {}: ~{} seat(s) open", zone.code, seat_count);
        } else if sold_out {
            tracing::info!("Zone {}: sold out", zone.code);
        } else {
            tracing::info!("Zone {}: no open seats", zone.code);
        }

        if let Err(e) = self.return_to_zone_list(session).await {
            tracing::warn!("Could not leave seat map for {}: {}", zone.code, e);
        }

        Ok(ZoneVerdict {
            zone: zone.clone(),
            available,
            approx_seat_count: seat_count,
        })
    }

    async fn return_to_zone_list<S>(&self, session: &mut S) -> Result<()>
    where
        S: BrowserActions + ?Sized,
    {
        for locator in selectors::back_controls() {
            let Some(control) = session.locate(locator).await?.first() else {
                continue;
            };
            if session.is_visible(&control).await? {
                tracing::debug!("Returning to zone list via {}", locator);
                session.click(&control).await?;
                tokio::time::sleep(self.timings.back_settle()).await;
                return Ok(());
            }
        }

        tracing::debug!("No visible back control; staying on current view");
        Ok(())
    }
}
