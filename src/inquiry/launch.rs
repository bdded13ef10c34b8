// Storefront Core - Bookstore catalog, inquiry and quiz client
// Copyright (C) 2025 Storefront Core contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Opening the WhatsApp links
//!
//! iOS devices get the app URI first and the web URL after a delay, in case the
//! app is not installed. Everything else opens the web URL only. Whether the
//! message was actually sent is never known.

use crate::error::Result;
use crate::inquiry::message::WhatsAppLinks;
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;

/// Delay before the web fallback on iOS
pub const DEFAULT_APP_FALLBACK_DELAY: Duration = Duration::from_millis(2000);

lazy_static! {
    static ref IOS_UA_RE: Regex = Regex::new(r"iPad|iPhone|iPod").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Other,
}

impl Platform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        if IOS_UA_RE.is_match(user_agent) {
            Platform::Ios
        } else {
            Platform::Other
        }
    }
}

/// One URL to open, after waiting `delay` from the previous step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchStep {
    pub url: String,
    pub delay: Duration,
}

/// Ordered URLs to open for one inquiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub steps: Vec<LaunchStep>,
}

impl LaunchPlan {
    pub fn for_platform(platform: Platform, links: &WhatsAppLinks, fallback_delay: Duration) -> Self {
        let web = LaunchStep {
            url: links.web_url.clone(),
            delay: Duration::ZERO,
        };

        let steps = match platform {
            Platform::Ios => vec![
                LaunchStep {
                    url: links.app_url.clone(),
                    delay: Duration::ZERO,
                },
                LaunchStep {
                    delay: fallback_delay,
                    ..web
                },
            ],
            Platform::Other => vec![web],
        };

        Self { steps }
    }

    /// Open every step in order through `opener`
    ///
    /// A step that fails to open is logged and the next one still runs; the
    /// error of the last step is returned.
    pub async fn execute<O: LinkOpener + ?Sized>(&self, opener: &O) -> Result<()> {
        let mut last = Ok(());

        for step in &self.steps {
            if !step.delay.is_zero() {
                tokio::time::sleep(step.delay).await;
            }
            last = opener.open(&step.url);
            if let Err(e) = &last {
                tracing::warn!(error = %e, "failed to open WhatsApp link");
            }
        }

        last
    }
}

/// Hands a URL to whatever can open it (browser, OS handler, terminal)
pub trait LinkOpener {
    fn open(&self, url: &str) -> Result<()>;
}
