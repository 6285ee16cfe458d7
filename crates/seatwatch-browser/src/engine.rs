use crate::actions::{extract_domain, BrowserActions, BrowserLauncher, Element, ElementSet};
use crate::dom::{self, DomOp, DomReply};
use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use crate::locator::Locator;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures_util::stream::StreamExt;
use seatwatch_core::BrowserConfig;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Quiet period that counts as network idle.
const NETWORK_IDLE_QUIET_MS: u64 = 500;

/// Launches headless Chromium sessions from browser settings.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    config: BrowserConfig,
    action_timeout: Duration,
}

impl ChromiumLauncher {
    pub fn new(config: BrowserConfig, action_timeout: Duration) -> Self {
        Self {
            config,
            action_timeout,
        }
    }
}

#[async_trait::async_trait]
impl BrowserLauncher for ChromiumLauncher {
    type Session = BrowserEngine;

    async fn launch(&self) -> Result<BrowserEngine> {
        BrowserEngine::launch(&self.config, self.action_timeout).await
    }
}

/// Browser automation engine holding one Chromium process and the focused page.
pub struct BrowserEngine {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    fingerprint: FingerprintConfig,
    action_timeout: Duration,
    closed: bool,
}

impl BrowserEngine {
    /// Launch Chromium and open a blank page.
    pub async fn launch(config: &BrowserConfig, action_timeout: Duration) -> Result<Self> {
        let fingerprint = FingerprintConfig::from_config(config);

        let mut builder = ChromeConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .viewport(Viewport {
                width: fingerprint.viewport_width,
                height: fingerprint.viewport_height,
                device_scale_factor: None,
                emulating_mobile: false,
                is_landscape: false,
                has_touch: false,
            })
            .arg(format!("--user-agent={}", fingerprint.user_agent));

        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &config.chrome_executable {
            builder = builder.chrome_executable(executable);
        }

        let chrome_config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(chrome_config).await?;

        // Spawn browser handler
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("browser handler event error: {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        tracing::debug!(
            headless = config.headless,
            width = fingerprint.viewport_width,
            height = fingerprint.viewport_height,
            "Launched Chromium session"
        );

        Ok(Self {
            browser,
            page,
            handler,
            fingerprint,
            action_timeout,
            closed: false,
        })
    }

    /// Fingerprint presented by this session.
    pub fn fingerprint(&self) -> &FingerprintConfig {
        &self.fingerprint
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(BrowserError::SessionClosed)
        } else {
            Ok(())
        }
    }

    async fn run_dom(&self, locator: &Locator, op: DomOp) -> Result<DomReply> {
        self.ensure_open()?;
        evaluate_reply(
            self.page.clone(),
            dom::script(locator, op),
            &locator.to_string(),
            self.action_timeout,
        )
        .await
    }

    async fn element_flag(&self, element: &Element, op: DomOp) -> Result<bool> {
        let reply = self.run_dom(&element.locator, op).await?;
        if !reply.found {
            return Err(element.not_found());
        }
        Ok(reply.value.as_bool().unwrap_or(false))
    }

    async fn list_pages(&self) -> Result<Vec<Page>> {
        self.ensure_open()?;
        bounded("listing pages", self.action_timeout, async {
            Ok(self.browser.pages().await?)
        })
        .await
    }
}

async fn bounded<T, F>(what: &str, limit: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| BrowserError::Timeout(format!("{what} exceeded {limit:?}")))?
}

async fn evaluate_reply(
    page: Page,
    script: String,
    what: &str,
    limit: Duration,
) -> Result<DomReply> {
    bounded(what, limit, async move {
        let result = page.evaluate(script).await?;
        result
            .into_value::<DomReply>()
            .map_err(|e| BrowserError::ScriptError(e.to_string()))
    })
    .await
}

/// The Chromium child process, as far as shutdown is concerned.
#[async_trait::async_trait]
trait ChildProcess: Send {
    async fn wait_exit(&mut self) -> Result<()>;
    async fn force_kill(&mut self) -> std::io::Result<()>;
}

#[async_trait::async_trait]
impl ChildProcess for Browser {
    async fn wait_exit(&mut self) -> Result<()> {
        self.wait().await?;
        Ok(())
    }

    async fn force_kill(&mut self) -> std::io::Result<()> {
        // `None` means no child process was spawned
        self.kill().await.unwrap_or(Ok(()))
    }
}

/// Wait up to `limit` for the process to exit, killing it otherwise.
/// Returns whether it exited on its own.
async fn reap<P: ChildProcess + ?Sized>(process: &mut P, limit: Duration) -> bool {
    let exited = bounded("waiting for Chromium exit", limit, process.wait_exit()).await;
    let Err(e) = exited else {
        return true;
    };

    tracing::warn!("Chromium did not exit cleanly ({}); killing it", e);
    if let Err(e) = process.force_kill().await {
        tracing::warn!("Failed to kill Chromium: {}", e);
    }
    false
}

/// A page as seen when looking for a newly opened one.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PageRef {
    id: String,
    opener: Option<String>,
}

/// Choose the page to focus among those not in `known`.
///
/// Pages opened by `current` win; remaining ties are broken by id so the
/// choice never depends on the order the browser lists its targets.
fn pick_new_page(pages: &[PageRef], known: &[String], current: &str) -> Option<usize> {
    pages
        .iter()
        .enumerate()
        .filter(|(_, page)| page.id != current && !known.contains(&page.id))
        .min_by_key(|&(_, page)| (page.opener.as_deref() != Some(current), page.id.as_str()))
        .map(|(index, _)| index)
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()> {
        self.ensure_open()?;
        let domain = extract_domain(url).unwrap_or_else(|_| "local document".to_string());
        tracing::debug!("Navigating to {}", domain);

        let page = self.page.clone();
        bounded(&format!("navigation to {domain}"), timeout, async move {
            page.goto(url)
                .await
                .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
            Ok(())
        })
        .await
    }

    async fn wait_for_network_idle(&mut self, timeout: Duration) -> Result<()> {
        self.ensure_open()?;
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let script = dom::network_idle_script(timeout_ms, NETWORK_IDLE_QUIET_MS);
        // The script bounds itself; the outer limit covers a hung evaluation.
        let reply = evaluate_reply(
            self.page.clone(),
            script,
            "network idle",
            timeout + Duration::from_secs(1),
        )
        .await?;

        if reply.found {
            tracing::debug!("Network idle after {}ms", reply.value);
            Ok(())
        } else {
            Err(BrowserError::Timeout(format!(
                "network idle not reached within {timeout:?}"
            )))
        }
    }

    async fn locate(&mut self, locator: &Locator) -> Result<ElementSet> {
        let reply = self.run_dom(locator, DomOp::Count).await?;
        let count = reply
            .value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        Ok(ElementSet::new(locator.clone(), count))
    }

    async fn is_visible(&mut self, element: &Element) -> Result<bool> {
        self.element_flag(element, DomOp::Visible(element.index)).await
    }

    async fn is_enabled(&mut self, element: &Element) -> Result<bool> {
        self.element_flag(element, DomOp::Enabled(element.index)).await
    }

    async fn click(&mut self, element: &Element) -> Result<()> {
        self.element_flag(element, DomOp::Click(element.index))
            .await
            .map(|_| ())
    }

    async fn text_content(&mut self, element: &Element) -> Result<Option<String>> {
        let reply = self
            .run_dom(&element.locator, DomOp::Text(element.index))
            .await?;
        if !reply.found {
            return Err(element.not_found());
        }
        Ok(reply.value.as_str().map(str::to_string))
    }

    async fn page_ids(&mut self) -> Result<Vec<String>> {
        Ok(self
            .list_pages()
            .await?
            .iter()
            .map(|page| page.target_id().inner().clone())
            .collect())
    }

    async fn focus_new_page(&mut self, known: &[String]) -> Result<bool> {
        let mut pages = self.list_pages().await?;
        let candidates: Vec<PageRef> = pages
            .iter()
            .map(|page| PageRef {
                id: page.target_id().inner().clone(),
                opener: page.opener_id().as_ref().map(|id| id.inner().clone()),
            })
            .collect();

        let current = self.page.target_id().inner().clone();
        let Some(index) = pick_new_page(&candidates, known, &current) else {
            return Ok(false);
        };

        tracing::debug!("Focusing new page {}", candidates[index].id);
        self.page = pages.swap_remove(index);
        Ok(true)
    }

    async fn current_url(&mut self) -> Result<Option<String>> {
        self.ensure_open()?;
        let page = self.page.clone();
        bounded("reading page URL", self.action_timeout, async move {
            Ok(page.url().await?)
        })
        .await
    }

    async fn screenshot(&mut self, path: &Path, full_page: bool) -> Result<()> {
        self.ensure_open()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let params = ScreenshotParams::builder().full_page(full_page).build();
        let page = self.page.clone();
        bounded("screenshot", self.action_timeout, async move {
            page.save_screenshot(params, path).await?;
            Ok(())
        })
        .await
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let limit = self.action_timeout;
        let browser = &mut self.browser;
        let close_result = bounded("closing Chromium", limit, async move {
            browser.close().await?;
            Ok(())
        })
        .await;

        reap(&mut self.browser, limit).await;
        self.handler.abort();

        close_result?;
        tracing::debug!("Chromium session closed");
        Ok(())
    }
}
