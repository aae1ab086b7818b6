//! Site tunables.
//!
//! Every key is optional in JSON; missing keys take the values the site was
//! built with. [`SiteConfig::sanitized`] clamps anything out of range.

use std::time::Duration;

use crate::messages::Locale;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SiteConfig {
    pub locale: Locale,
    pub submit_delay_ms: u32,
    /// Viewports at least this wide close the mobile menu on resize.
    pub menu_breakpoint_px: u32,
    pub matrix: MatrixConfig,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatrixConfig {
    pub glyphs: String,
    pub font_size: u32,
    pub frame_ms: u32,
    /// A drop below the bottom edge restarts when a unit draw exceeds this.
    pub reset_chance: f64,
    pub fade: String,
    pub color: String,
}

fn default_submit_delay_ms() -> u32 {
    700
}

fn default_menu_breakpoint_px() -> u32 {
    860
}

fn default_glyphs() -> String {
    "01".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            submit_delay_ms: default_submit_delay_ms(),
            menu_breakpoint_px: default_menu_breakpoint_px(),
            matrix: MatrixConfig::default(),
        }
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            glyphs: default_glyphs(),
            font_size: 14,
            frame_ms: 55,
            reset_chance: 0.975,
            fade: "rgba(0, 0, 0, 0.08)".to_string(),
            color: "#d6b46b".to_string(),
        }
    }
}

impl SiteConfig {
    #[cfg(feature = "serde")]
    pub fn from_json_str(raw: &str) -> crate::error::Result<Self> {
        let cfg: SiteConfig = serde_json::from_str(raw)?;
        Ok(cfg.sanitized())
    }

    pub fn sanitized(mut self) -> Self {
        self.matrix.font_size = self.matrix.font_size.max(1);
        self.matrix.frame_ms = self.matrix.frame_ms.max(1);
        if !self.matrix.reset_chance.is_finite() {
            self.matrix.reset_chance = MatrixConfig::default().reset_chance;
        }
        self.matrix.reset_chance = self.matrix.reset_chance.clamp(0.0, 1.0);
        if self.matrix.glyphs.trim().is_empty() {
            self.matrix.glyphs = default_glyphs();
        }
        self
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms as u64)
    }
}
