//! Seatwatch Scanner - zone availability scan engine.
//!
//! Drives one browser session through the seat-selection flow of a
//! ticketing page, classifies every discovered zone, and reports zones with
//! purchasable seats through a notification channel.
//!
//! # Flow
//!
//! 1. Load the performance page and open the seat selector
//! 2. Discover zone entries through a selector cascade
//! 3. Rank zones by the configured priority list
//! 4. Classify each zone, one at a time, from its seat map
//! 5. Aggregate verdicts, notify once if anything is available
//!
//! # Example
//!
//! ```rust,ignore
//! use seatwatch_browser::ChromiumLauncher;
//! use seatwatch_notify::WebhookChannel;
//! use seatwatch_scanner::ScanOrchestrator;
//!
//! let channel = WebhookChannel::from_config(&config.notifications)?;
//! let orchestrator = ScanOrchestrator::new(&config, Box::new(channel))?;
//! let launcher = ChromiumLauncher::new(config.browser.clone(), config.timings.action_timeout());
//!
//! let outcome = orchestrator.scan(&launcher).await;
//! std::process::exit(outcome.exit_code());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cascade;
pub mod classifier;
pub mod discovery;
pub mod error;
pub mod notifier;
pub mod orchestrator;
pub mod ranker;
pub mod report;
pub mod selectors;
pub mod zone;

// Re-export commonly used types
pub use cascade::{resolve, CascadeMatch, Resolution};
pub use classifier::{decide_availability, ZoneClassifier};
pub use discovery::discover_zones;
pub use error::{Result, ScanError};
pub use notifier::ScanNotifier;
pub use orchestrator::{ScanOrchestrator, ScanOutcome, ScanPhase};
pub use ranker::PriorityRanker;
pub use report::{render_report, AvailabilityReport, ReportSettings};
pub use zone::{ScanResult, ZoneDescriptor, ZoneFailure, ZoneOutcome, ZoneVerdict};
