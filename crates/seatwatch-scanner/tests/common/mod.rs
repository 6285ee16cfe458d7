//! Scripted in-memory browser session and notification channel.
#![allow(dead_code)]

use seatwatch_browser::{
    BrowserActions, BrowserError, BrowserLauncher, Element, ElementSet, Locator,
};
use seatwatch_core::{AppConfig, TimingsConfig};
use seatwatch_notify::{NotificationChannel, NotificationMessage, NotifyError};
use seatwatch_scanner::selectors;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BUTTON_SELECTOR: &str = r#".reservationBtn[data-prodid="211992"]"#;

/// What a zone's seat map shows once clicked.
#[derive(Debug, Clone, Default)]
pub struct SeatMap {
    pub open_seats: usize,
    pub loose_seats: usize,
    pub sold_out: bool,
    pub hidden: bool,
    pub click_fails: bool,
    pub hangs: bool,
}

impl SeatMap {
    pub fn open(seats: usize) -> Self {
        Self {
            open_seats: seats,
            ..Self::default()
        }
    }

    pub fn sold_out() -> Self {
        Self {
            sold_out: true,
            ..Self::default()
        }
    }
}

/// Static description of the page the fake serves.
#[derive(Debug, Clone)]
pub struct FakePage {
    /// `None` when the control is absent, otherwise whether it is enabled
    pub button: Option<bool>,
    /// Strategy under which the zone entries are found
    pub zone_strategy: Locator,
    /// Entry texts in page order
    pub entries: Vec<String>,
    /// Entry indices whose text cannot be read
    pub unreadable: Vec<usize>,
    /// Seat maps keyed by entry text
    pub seat_maps: HashMap<String, SeatMap>,
    pub back_visible: bool,
    /// Blank tabs the browser opened at startup
    pub startup_tabs: usize,
    /// Whether the seat selector opens in its own window
    pub opens_new_page: bool,
    pub navigation_fails: bool,
    pub screenshot_fails: bool,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            button: Some(true),
            zone_strategy: Locator::css(".seat-list li"),
            entries: Vec::new(),
            unreadable: Vec::new(),
            seat_maps: HashMap::new(),
            back_visible: true,
            startup_tabs: 1,
            opens_new_page: false,
            navigation_fails: false,
            screenshot_fails: false,
        }
    }
}

impl FakePage {
    pub fn with_zone(mut self, text: &str, seat_map: SeatMap) -> Self {
        self.entries.push(text.to_string());
        self.seat_maps.insert(text.to_string(), seat_map);
        self
    }
}

/// Everything the session was asked to do.
#[derive(Debug, Default)]
pub struct SessionLog {
    pub navigations: Vec<String>,
    pub clicks: Vec<String>,
    pub screenshots: Vec<String>,
    pub focused_popup: bool,
    /// Every page focus moved to, in order
    pub focus_moves: Vec<String>,
    pub close_count: usize,
}

impl SessionLog {
    /// Clicked zone entries, in order.
    pub fn zone_clicks(&self) -> Vec<String> {
        self.clicks
            .iter()
            .filter(|c| c.contains("Sec"))
            .cloned()
            .collect()
    }
}

pub type SharedLog = Arc<Mutex<SessionLog>>;

const MAIN_PAGE: &str = "main";
const POPUP_PAGE: &str = "popup";

pub struct FakeSession {
    page: FakePage,
    log: SharedLog,
    focused: String,
    open_zone: Option<String>,
    button_clicked: bool,
}

impl FakeSession {
    pub fn new(page: FakePage, log: SharedLog) -> Self {
        Self {
            page,
            log,
            focused: MAIN_PAGE.to_string(),
            open_zone: None,
            button_clicked: false,
        }
    }

    fn open_pages(&self) -> Vec<String> {
        // Listed newest first, unlike creation order
        let mut pages = Vec::new();
        if self.page.opens_new_page && self.button_clicked {
            pages.push(POPUP_PAGE.to_string());
        }
        pages.push(MAIN_PAGE.to_string());
        pages.extend((0..self.page.startup_tabs).map(|i| format!("startup-{i}")));
        pages
    }

    fn on_blank_tab(&self) -> bool {
        self.focused != MAIN_PAGE && self.focused != POPUP_PAGE
    }

    fn current_map(&self) -> Option<&SeatMap> {
        self.open_zone
            .as_ref()
            .and_then(|name| self.page.seat_maps.get(name))
    }

    fn count(&self, locator: &Locator) -> usize {
        if self.on_blank_tab() {
            return 0;
        }
        if *locator == Locator::css(BUTTON_SELECTOR) {
            return usize::from(self.page.button.is_some());
        }
        if *locator == self.page.zone_strategy {
            return self.page.entries.len();
        }
        if let Locator::ExactText(text) = locator {
            return usize::from(self.page.seat_maps.contains_key(text));
        }

        let map = self.current_map();
        if *locator == selectors::open_seats()[0] {
            return map.map_or(0, |m| m.open_seats);
        }
        if *locator == selectors::open_seats()[1] {
            return map.map_or(0, |m| m.loose_seats);
        }
        if *locator == selectors::sold_out_signals()[0] {
            return usize::from(map.is_some_and(|m| m.sold_out));
        }
        if *locator == Locator::text("Back") {
            return usize::from(self.page.back_visible && self.open_zone.is_some());
        }
        0
    }
}

#[async_trait::async_trait]
impl BrowserActions for FakeSession {
    async fn navigate(&mut self, url: &str, _timeout: Duration) -> seatwatch_browser::Result<()> {
        self.log.lock().unwrap().navigations.push(url.to_string());
        if self.page.navigation_fails {
            return Err(BrowserError::Timeout(format!("navigation to {url}")));
        }
        Ok(())
    }

    async fn wait_for_network_idle(&mut self, _timeout: Duration) -> seatwatch_browser::Result<()> {
        Ok(())
    }

    async fn locate(&mut self, locator: &Locator) -> seatwatch_browser::Result<ElementSet> {
        Ok(ElementSet::new(locator.clone(), self.count(locator)))
    }

    async fn is_visible(&mut self, element: &Element) -> seatwatch_browser::Result<bool> {
        if let Locator::ExactText(text) = &element.locator {
            return Ok(self.page.seat_maps.get(text).is_some_and(|m| !m.hidden));
        }
        Ok(true)
    }

    async fn is_enabled(&mut self, element: &Element) -> seatwatch_browser::Result<bool> {
        if element.locator == Locator::css(BUTTON_SELECTOR) {
            return Ok(self.page.button.unwrap_or(false));
        }
        Ok(true)
    }

    async fn click(&mut self, element: &Element) -> seatwatch_browser::Result<()> {
        match &element.locator {
            Locator::ExactText(text) => {
                self.log.lock().unwrap().clicks.push(text.clone());
                let map = self.page.seat_maps.get(text).cloned().unwrap_or_default();
                if map.hangs {
                    std::future::pending::<()>().await;
                }
                if map.click_fails {
                    return Err(BrowserError::ScriptError(format!("click on '{text}' failed")));
                }
                self.open_zone = Some(text.clone());
            }
            locator if *locator == Locator::css(BUTTON_SELECTOR) => {
                self.log.lock().unwrap().clicks.push("button".to_string());
                self.button_clicked = true;
            }
            locator => {
                self.log.lock().unwrap().clicks.push(locator.to_string());
                self.open_zone = None;
            }
        }
        Ok(())
    }

    async fn text_content(&mut self, element: &Element) -> seatwatch_browser::Result<Option<String>> {
        if self.page.unreadable.contains(&element.index) {
            return Err(BrowserError::ScriptError("detached node".to_string()));
        }
        Ok(self.page.entries.get(element.index).cloned())
    }

    async fn page_ids(&mut self) -> seatwatch_browser::Result<Vec<String>> {
        Ok(self.open_pages())
    }

    async fn focus_new_page(&mut self, known: &[String]) -> seatwatch_browser::Result<bool> {
        let mut fresh: Vec<String> = self
            .open_pages()
            .into_iter()
            .filter(|id| *id != self.focused && !known.contains(id))
            .collect();
        fresh.sort();
        let Some(target) = fresh.into_iter().next() else {
            return Ok(false);
        };

        let mut log = self.log.lock().unwrap();
        log.focused_popup |= target == POPUP_PAGE;
        log.focus_moves.push(target.clone());
        drop(log);
        self.focused = target;
        Ok(true)
    }

    async fn current_url(&mut self) -> seatwatch_browser::Result<Option<String>> {
        Ok(Some("https://tickets.example.com/popup".to_string()))
    }

    async fn screenshot(&mut self, path: &Path, _full_page: bool) -> seatwatch_browser::Result<()> {
        if self.page.screenshot_fails {
            return Err(BrowserError::ChromiumError("capture failed".to_string()));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.log.lock().unwrap().screenshots.push(name);
        Ok(())
    }

    async fn close(&mut self) -> seatwatch_browser::Result<()> {
        self.log.lock().unwrap().close_count += 1;
        Ok(())
    }
}

pub struct FakeLauncher {
    page: FakePage,
    log: SharedLog,
    fails: bool,
}

impl FakeLauncher {
    pub fn new(page: FakePage) -> Self {
        Self {
            page,
            log: SharedLog::default(),
            fails: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fails: true,
            ..Self::new(FakePage::default())
        }
    }

    pub fn log(&self) -> SharedLog {
        self.log.clone()
    }
}

#[async_trait::async_trait]
impl BrowserLauncher for FakeLauncher {
    type Session = FakeSession;

    async fn launch(&self) -> seatwatch_browser::Result<FakeSession> {
        if self.fails {
            return Err(BrowserError::ChromiumError("no chrome binary".to_string()));
        }
        Ok(FakeSession::new(self.page.clone(), self.log.clone()))
    }
}

/// Channel that records every post.
#[derive(Clone, Default)]
pub struct RecordingChannel {
    pub posts: Arc<Mutex<Vec<NotificationMessage>>>,
    pub disabled: bool,
    pub fails: bool,
}

impl RecordingChannel {
    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl NotificationChannel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    fn is_enabled(&self) -> bool {
        !self.disabled
    }

    async fn post(&self, message: &NotificationMessage) -> seatwatch_notify::Result<()> {
        self.posts.lock().unwrap().push(message.clone());
        if self.fails {
            return Err(NotifyError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(())
    }
}

/// Default config with every wait collapsed.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.timings = TimingsConfig::immediate();
    config.output.screenshot_dir = PathBuf::from("shots");
    config
}
