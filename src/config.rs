use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{RulerError, RulerResult};
use crate::geometry::{Padding, Resolution, SampleWindowSize};
use crate::measure::indicators::TickStyle;
use crate::measure::ScaleFactors;
use crate::preview::Magnifier;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub ruler: RulerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Horizontal resolution of one monitor tile.
    #[serde(default = "default_h_res")]
    pub h_res: u32,
    #[serde(default = "default_v_res")]
    pub v_res: u32,
    /// Physical diagonal of the panel, used when no DPI is given.
    #[serde(default = "default_diagonal")]
    pub diagonal_inches: f64,
    /// Physical DPI reported by the display. Overrides the diagonal when both
    /// axes are set.
    #[serde(default)]
    pub dpi_x: Option<f64>,
    #[serde(default)]
    pub dpi_y: Option<f64>,
}

fn default_h_res() -> u32 {
    1920
}

fn default_v_res() -> u32 {
    1080
}

fn default_diagonal() -> f64 {
    23.0
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            h_res: default_h_res(),
            v_res: default_v_res(),
            diagonal_inches: default_diagonal(),
            dpi_x: None,
            dpi_y: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Sampled pixels per axis; must be odd.
    #[serde(default = "default_sample")]
    pub sample_width: u32,
    #[serde(default = "default_sample")]
    pub sample_height: u32,
    /// On-screen size of one magnified pixel.
    #[serde(default = "default_pixel_size")]
    pub pixel_size: u32,
    #[serde(default = "default_grid_thickness")]
    pub grid_thickness: u32,
    #[serde(default = "default_x_padding")]
    pub x_padding: u32,
    #[serde(default = "default_y_padding")]
    pub y_padding: u32,
    /// Alpha of the cursor row/column tint.
    #[serde(default = "default_overlay_alpha")]
    pub overlay_alpha: u8,
}

fn default_sample() -> u32 {
    21
}

fn default_pixel_size() -> u32 {
    7
}

fn default_grid_thickness() -> u32 {
    1
}

fn default_x_padding() -> u32 {
    150
}

fn default_y_padding() -> u32 {
    55
}

fn default_overlay_alpha() -> u8 {
    120
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            sample_width: default_sample(),
            sample_height: default_sample(),
            pixel_size: default_pixel_size(),
            grid_thickness: default_grid_thickness(),
            x_padding: default_x_padding(),
            y_padding: default_y_padding(),
            overlay_alpha: default_overlay_alpha(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulerConfig {
    /// Pending segments shorter than this are drawn without annotations.
    #[serde(default = "default_short_segment")]
    pub short_segment_px: f64,
    #[serde(default = "default_tick_half_length")]
    pub tick_half_length: f64,
    #[serde(default = "default_label_offset")]
    pub label_offset: f64,
}

fn default_short_segment() -> f64 {
    20.0
}

fn default_tick_half_length() -> f64 {
    10.0
}

fn default_label_offset() -> f64 {
    12.0
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            short_segment_px: default_short_segment(),
            tick_half_length: default_tick_half_length(),
            label_offset: default_label_offset(),
        }
    }
}

/// Typed values built from an [`AppConfig`] once at setup.
#[derive(Debug, Clone, Copy)]
pub struct Setup {
    pub tile: Resolution,
    pub scale: ScaleFactors,
    pub magnifier: Magnifier,
    pub ticks: TickStyle,
    pub short_segment_px: f64,
}

impl AppConfig {
    /// Reject malformed values up front so the geometry never sees them.
    pub fn validate(&self) -> RulerResult<Setup> {
        let d = &self.display;
        let tile = Resolution::new(d.h_res, d.v_res)?;
        let scale = match (d.dpi_x, d.dpi_y) {
            (Some(x), Some(y)) => ScaleFactors::from_dpi(x, y)?,
            _ => ScaleFactors::from_diagonal(d.h_res, d.v_res, d.diagonal_inches)?,
        };

        let p = &self.preview;
        let window = SampleWindowSize::new(p.sample_width, p.sample_height)?;
        if window.width() > tile.width() || window.height() > tile.height() {
            return Err(RulerError::InvalidConfiguration(format!(
                "sample window {}x{} exceeds tile resolution {}x{}",
                window.width(),
                window.height(),
                tile.width(),
                tile.height()
            )));
        }
        let magnifier = Magnifier::new(
            window,
            p.pixel_size,
            p.grid_thickness,
            Padding {
                x: p.x_padding,
                y: p.y_padding,
            },
            p.overlay_alpha,
        )?;

        let r = &self.ruler;
        for (name, v) in [
            ("short_segment_px", r.short_segment_px),
            ("tick_half_length", r.tick_half_length),
            ("label_offset", r.label_offset),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(RulerError::InvalidConfiguration(format!(
                    "{name} must be a non-negative number, got {v}"
                )));
            }
        }

        tracing::info!(
            h_res = d.h_res,
            v_res = d.v_res,
            ppix = scale.ppix(),
            ppiy = scale.ppiy(),
            "setup validated"
        );

        Ok(Setup {
            tile,
            scale,
            magnifier,
            ticks: TickStyle {
                half_length: r.tick_half_length,
                label_offset: r.label_offset,
            },
            short_segment_px: r.short_segment_px,
        })
    }
}

/// Directories searched for `config.toml`, in priority order: next to the
/// executable, then the working directory.
#[derive(Debug, Clone)]
pub struct ConfigLocation {
    pub exe_dir: Option<PathBuf>,
    pub cwd: PathBuf,
}

impl ConfigLocation {
    pub fn current() -> RulerResult<Self> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Ok(Self {
            exe_dir,
            cwd: std::env::current_dir()?,
        })
    }

    pub fn resolve(&self) -> RulerResult<PathBuf> {
        if let Some(dir) = &self.exe_dir {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Ok(candidate);
            }
        }

        let candidate = self.cwd.join(CONFIG_FILE);
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "config found in working directory");
            return Ok(candidate);
        }

        Err(RulerError::Config(
            "config.toml not found next to executable or in working directory".into(),
        ))
    }

    pub fn load(&self) -> RulerResult<AppConfig> {
        let path = self.resolve()?;
        let content = std::fs::read_to_string(&path)?;
        let config = parse_config(&content)?;
        tracing::info!(path = %path.display(), h_res = config.display.h_res, v_res = config.display.v_res, "config loaded");
        Ok(config)
    }

    /// Overwrite the config that `load` would read, or create one in the
    /// working directory when none exists yet. Returns the written path.
    pub fn save(&self, config: &AppConfig) -> RulerResult<PathBuf> {
        let path = match self.resolve() {
            Ok(path) => path,
            Err(RulerError::Config(_)) => self.cwd.join(CONFIG_FILE),
            Err(e) => return Err(e),
        };
        let content = toml::to_string_pretty(config)?;
        std::fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(path)
    }
}

pub fn parse_config(content: &str) -> RulerResult<AppConfig> {
    Ok(toml::from_str(content)?)
}

pub fn load_config() -> RulerResult<AppConfig> {
    ConfigLocation::current()?.load()
}

pub fn save_config(config: &AppConfig) -> RulerResult<()> {
    ConfigLocation::current()?.save(config).map(|_| ())
}
