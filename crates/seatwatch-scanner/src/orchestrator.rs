//! Scan orchestrator for one pass over the seat-selection flow.
//!
//! The orchestrator owns the browser session for the duration of a scan:
//! it launches it, walks the page through each phase, and closes it on
//! every exit path.

use crate::classifier::ZoneClassifier;
use crate::discovery::discover_zones;
use crate::error::{Result, ScanError};
use crate::notifier::ScanNotifier;
use crate::ranker::PriorityRanker;
use crate::report::{render_report, ReportSettings};
use crate::zone::{ScanResult, ZoneOutcome};
use seatwatch_browser::{BrowserActions, BrowserLauncher, Locator};
use seatwatch_core::{AppConfig, Timestamp, TimingsConfig};
use seatwatch_notify::NotificationChannel;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Screenshot taken when discovery finds nothing.
pub const NO_ZONES_SCREENSHOT: &str = "no_zones.png";
/// Screenshot taken when every zone is sold out.
pub const ALL_SOLD_OUT_SCREENSHOT: &str = "all_sold_out.png";
/// Screenshot taken after a notification is sent.
pub const TICKETS_AVAILABLE_SCREENSHOT: &str = "tickets_available.png";
/// Screenshot taken when the scan aborts.
pub const ERROR_SCREENSHOT: &str = "error.png";

/// Where a scan is in the seat-selection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPhase {
    /// Session acquired, nothing loaded yet
    NotStarted,
    /// Performance page loaded and settled
    PageLoaded,
    /// Seat selector open and focused
    PopupOpen,
    /// Zone entries enumerated
    ZonesDiscovered,
    /// Zones sorted into classification order
    ZonesRanked,
    /// Classifying the `index`-th of `total` zones (1-based)
    Classifying {
        /// Current zone position
        index: usize,
        /// Number of zones to classify
        total: usize,
    },
    /// Verdicts collected into a result
    Aggregated,
    /// Report dispatched
    Notified,
    /// Nothing available, nothing sent
    NoOp,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("not started"),
            Self::PageLoaded => f.write_str("page loaded"),
            Self::PopupOpen => f.write_str("popup open"),
            Self::ZonesDiscovered => f.write_str("zones discovered"),
            Self::ZonesRanked => f.write_str("zones ranked"),
            Self::Classifying { index, total } => write!(f, "classifying zone {index}/{total}"),
            Self::Aggregated => f.write_str("aggregated"),
            Self::Notified => f.write_str("notified"),
            Self::NoOp => f.write_str("no-op"),
        }
    }
}

/// Terminal result of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// At least one zone has open seats; a report was dispatched
    TicketsAvailable(ScanResult),
    /// Every classified zone is sold out
    AllSoldOut(ScanResult),
    /// The seat selector showed no zone entries
    NoZones,
    /// The control that opens the seat selector is missing or disabled
    ButtonUnavailable {
        /// Configured selector
        selector: String,
        /// `absent` or `disabled`
        reason: String,
    },
    /// The scan aborted
    Failed {
        /// Last phase reached
        phase: ScanPhase,
        /// Error description
        reason: String,
    },
}

impl ScanOutcome {
    /// Whether tickets were found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::TicketsAvailable(_))
    }

    /// Process exit status: 0 when tickets were found, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.is_found())
    }

    /// The aggregated result, if classification completed.
    #[must_use]
    pub fn result(&self) -> Option<&ScanResult> {
        match self {
            Self::TicketsAvailable(result) | Self::AllSoldOut(result) => Some(result),
            _ => None,
        }
    }
}

/// Drives a single scan from page load to notification.
#[derive(Debug)]
pub struct ScanOrchestrator {
    target_url: String,
    action_selector: String,
    timings: TimingsConfig,
    throttle_every: usize,
    ranker: PriorityRanker,
    report: ReportSettings,
    notifier: ScanNotifier,
    screenshot_dir: PathBuf,
    full_page: bool,
}

impl ScanOrchestrator {
    /// Create an orchestrator from the application config.
    ///
    /// Fails if the configured priority list contains an invalid code.
    pub fn new(config: &AppConfig, channel: Box<dyn NotificationChannel>) -> Result<Self> {
        let ranker = PriorityRanker::new(config.scanning.priority_codes()?);

        Ok(Self {
            target_url: config.target.url.clone(),
            action_selector: config.target.action_selector.clone(),
            timings: config.timings.clone(),
            throttle_every: config.scanning.throttle_every,
            ranker,
            report: ReportSettings::from_config(config),
            notifier: ScanNotifier::new(channel, &config.notifications),
            screenshot_dir: config.output.screenshot_dir.clone(),
            full_page: config.output.full_page,
        })
    }

    /// Run one scan with a fresh session from `launcher`.
    ///
    /// Never returns an error: every failure is folded into the outcome.
    pub async fn scan<L>(&self, launcher: &L) -> ScanOutcome
    where
        L: BrowserLauncher,
    {
        tracing::info!("Starting scan of {}", self.target_url);

        let mut session = match launcher.launch().await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("Failed to launch browser: {}", e);
                return ScanOutcome::Failed {
                    phase: ScanPhase::NotStarted,
                    reason: e.to_string(),
                };
            }
        };

        let mut phase = ScanPhase::NotStarted;
        let outcome = match self.run(&mut session, &mut phase).await {
            Ok(outcome) => outcome,
            Err(ScanError::ButtonUnavailable { selector, reason }) => {
                tracing::warn!("Seat selector control {} is {}", selector, reason);
                self.capture(&mut session, ERROR_SCREENSHOT).await;
                ScanOutcome::ButtonUnavailable { selector, reason }
            }
            Err(ScanError::DiscoveryEmpty) => {
                tracing::warn!("No zone entries found");
                self.capture(&mut session, NO_ZONES_SCREENSHOT).await;
                ScanOutcome::NoZones
            }
            Err(e) => {
                tracing::error!("Scan failed during {}: {}", phase, e);
                self.capture(&mut session, ERROR_SCREENSHOT).await;
                ScanOutcome::Failed {
                    phase,
                    reason: e.to_string(),
                }
            }
        };

        if let Err(e) = session.close().await {
            tracing::warn!("Failed to close browser session: {}", e);
        }

        outcome
    }

    async fn run<S>(&self, session: &mut S, phase: &mut ScanPhase) -> Result<ScanOutcome>
    where
        S: BrowserActions,
    {
        self.load_page(session).await?;
        *phase = ScanPhase::PageLoaded;

        self.open_seat_selector(session).await?;
        *phase = ScanPhase::PopupOpen;

        let zones = discover_zones(session).await?;
        *phase = ScanPhase::ZonesDiscovered;

        let ranked = self.ranker.rank(zones);
        *phase = ScanPhase::ZonesRanked;
        tracing::info!(
            "Checking {} zone(s) in order: {}",
            ranked.len(),
            ranked
                .iter()
                .map(|z| z.code.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let total = ranked.len();
        let mut classifier = ZoneClassifier::new(self.timings.clone(), self.throttle_every);
        let mut outcomes: Vec<ZoneOutcome> = Vec::with_capacity(total);
        for (index, zone) in ranked.iter().enumerate() {
            *phase = ScanPhase::Classifying {
                index: index + 1,
                total,
            };
            tracing::debug!("{}", phase);
            outcomes.push(classifier.classify(session, zone).await);
        }

        let result = ScanResult::from_outcomes(Timestamp::now(), outcomes);
        *phase = ScanPhase::Aggregated;

        if !result.failures.is_empty() {
            tracing::warn!(
                "{} of {} zone(s) could not be classified",
                result.failures.len(),
                total
            );
        }

        if !result.any_available {
            tracing::info!("No available seats in any zone");
            self.capture(session, ALL_SOLD_OUT_SCREENSHOT).await;
            *phase = ScanPhase::NoOp;
            return Ok(ScanOutcome::AllSoldOut(result));
        }

        tracing::info!(
            "Found tickets in {} zone(s)",
            result.available().count()
        );
        let text = render_report(&result, &self.ranker, &self.report);
        tracing::info!("Report:\n{}", text);

        if self.notifier.dispatch(&text).await {
            tracing::info!("Notification sent");
        }
        *phase = ScanPhase::Notified;

        self.capture(session, TICKETS_AVAILABLE_SCREENSHOT).await;
        Ok(ScanOutcome::TicketsAvailable(result))
    }

    async fn load_page<S>(&self, session: &mut S) -> Result<()>
    where
        S: BrowserActions,
    {
        tracing::info!("Loading performance page");
        session
            .navigate(&self.target_url, self.timings.navigation_timeout())
            .await?;
        session
            .wait_for_network_idle(self.timings.navigation_timeout())
            .await?;
        tokio::time::sleep(self.timings.initial_settle()).await;
        Ok(())
    }

    async fn open_seat_selector<S>(&self, session: &mut S) -> Result<()>
    where
        S: BrowserActions,
    {
        let unavailable = |reason: &str| ScanError::ButtonUnavailable {
            selector: self.action_selector.clone(),
            reason: reason.to_string(),
        };

        let button = session
            .locate(&Locator::css(&self.action_selector))
            .await?
            .first()
            .ok_or_else(|| unavailable("absent"))?;
        if !session.is_enabled(&button).await? {
            return Err(unavailable("disabled"));
        }

        // Pages open before the click (including any browser startup tab)
        let known_pages = session.page_ids().await?;

        tracing::info!("Opening seat selector");
        session.click(&button).await?;
        tokio::time::sleep(self.timings.popup_wait()).await;

        if session.focus_new_page(&known_pages).await? {
            tracing::info!("Switched to popup window");
        }

        session
            .wait_for_network_idle(self.timings.popup_idle_timeout())
            .await?;
        if let Some(url) = session.current_url().await? {
            tracing::info!("Popup URL: {}", url);
        }

        tokio::time::sleep(self.timings.pre_discovery()).await;
        Ok(())
    }

    /// Best-effort screenshot; failures are only logged.
    async fn capture<S>(&self, session: &mut S, name: &str)
    where
        S: BrowserActions,
    {
        let path = self.screenshot_dir.join(name);
        match session.screenshot(&path, self.full_page).await {
            Ok(()) => tracing::info!("Screenshot saved: {}", path.display()),
            Err(e) => tracing::warn!("Failed to save screenshot {}: {}", path.display(), e),
        }
    }
}
