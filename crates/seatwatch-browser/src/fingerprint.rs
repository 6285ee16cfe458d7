use rand::Rng;
use seatwatch_core::BrowserConfig;

const DESKTOP_USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

const DESKTOP_VIEWPORTS: [(u32, u32); 4] = [(1920, 1080), (1536, 864), (1440, 900), (1366, 768)];

/// User agent and viewport presented to the ticketing site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintConfig {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl FingerprintConfig {
    /// Fixed desktop profile at 1920x1080.
    pub fn desktop() -> Self {
        Self {
            user_agent: DESKTOP_USER_AGENTS[0].to_string(),
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }

    /// Generate a randomized desktop fingerprint
    pub fn randomized() -> Self {
        let mut rng = rand::thread_rng();

        let ua_idx = rng.gen_range(0..DESKTOP_USER_AGENTS.len());
        let vp_idx = rng.gen_range(0..DESKTOP_VIEWPORTS.len());
        let (width, height) = DESKTOP_VIEWPORTS[vp_idx];

        Self {
            user_agent: DESKTOP_USER_AGENTS[ua_idx].to_string(),
            viewport_width: width,
            viewport_height: height,
        }
    }

    /// Build from browser settings. An explicit user agent always wins over
    /// randomization.
    pub fn from_config(config: &BrowserConfig) -> Self {
        let mut fingerprint = if config.randomize_fingerprint {
            Self::randomized()
        } else {
            Self {
                viewport_width: config.window_width,
                viewport_height: config.window_height,
                ..Self::desktop()
            }
        };

        if let Some(ua) = config.user_agent.as_deref().filter(|ua| !ua.trim().is_empty()) {
            fingerprint.user_agent = ua.to_string();
        }

        fingerprint
    }
}
