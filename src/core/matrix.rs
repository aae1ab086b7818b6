//! Falling-character backdrop.
//!
//! One drop per text column. Each frame paints a translucent veil over the
//! previous one, draws one random glyph at every drop, then moves every drop
//! down one row. Drops that have left the canvas restart at the top at random.

use crate::config::MatrixConfig;
use crate::prng::Prng;

#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Glyph {
    pub ch: char,
    pub column: usize,
    /// Row of the glyph baseline, counted in font-size steps.
    pub row: u32,
    pub x: f64,
    pub y: f64,
}

/// Draw commands for one frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MatrixFrame {
    pub width: u32,
    pub height: u32,
    pub fade: String,
    pub color: String,
    /// CSS font shorthand, e.g. `14px monospace`.
    pub font: String,
    pub glyphs: Vec<Glyph>,
}

#[derive(Debug, Clone)]
pub struct MatrixRain {
    cfg: MatrixConfig,
    glyphs: Vec<char>,
    width: u32,
    height: u32,
    drops: Vec<u32>,
    rng: Prng,
}

impl MatrixRain {
    pub fn new(cfg: MatrixConfig, width: u32, height: u32, seed: u64) -> Self {
        let mut glyphs: Vec<char> = cfg.glyphs.chars().filter(|c| !c.is_whitespace()).collect();
        if glyphs.is_empty() {
            glyphs = vec!['0', '1'];
        }
        let mut rain = Self {
            cfg,
            glyphs,
            width: 0,
            height: 0,
            drops: Vec::new(),
            rng: Prng::new(seed),
        };
        rain.resize(width, height);
        rain
    }

    pub fn columns_for(width: u32, font_size: u32) -> usize {
        (width / font_size.max(1)).max(1) as usize
    }

    /// Matches the canvas to a new size. All drops restart at row 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let columns = Self::columns_for(width, self.cfg.font_size);
        self.drops = vec![1; columns];
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    pub fn step(&mut self) -> MatrixFrame {
        let font = self.cfg.font_size.max(1);
        let mut glyphs = Vec::with_capacity(self.drops.len());

        for i in 0..self.drops.len() {
            let ch = self.glyphs[self.rng.gen_index(self.glyphs.len())];
            let row = self.drops[i];
            glyphs.push(Glyph {
                ch,
                column: i,
                row,
                x: (i as u64 * font as u64) as f64,
                y: (row as u64 * font as u64) as f64,
            });

            let below = row as u64 * font as u64 > self.height as u64;
            if below && self.rng.next_f64_01() > self.cfg.reset_chance {
                self.drops[i] = 0;
            }
            self.drops[i] = self.drops[i].saturating_add(1);
        }

        MatrixFrame {
            width: self.width,
            height: self.height,
            fade: self.cfg.fade.clone(),
            color: self.cfg.color.clone(),
            font: format!("{}px monospace", font),
            glyphs,
        }
    }
}
