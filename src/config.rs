use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::color::{Theme, ThemeColors};
use crate::display::DisplayMode;
use crate::renderer::SurfaceOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub colors: ColorConfig,
    #[serde(default)]
    pub labels: LabelConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Print mode size in terminal cells; the current terminal size when unset.
    pub width: Option<u16>,
    pub height: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Padding around the origin and the value, as a fraction of their span
    pub margin: f32,
    pub graduation_ticks: usize,
    pub dot_radius: usize,
    pub label_scale: usize,
    pub label_margin: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            margin: 0.25,
            graduation_ticks: 8,
            dot_radius: 2,
            label_scale: 1,
            label_margin: 2,
        }
    }
}

const MAX_GRADUATION_TICKS: usize = 64;
const MAX_DOT_RADIUS: usize = 64;
const MAX_LABEL_SCALE: usize = 16;
const MAX_LABEL_MARGIN: usize = 256;

impl GraphConfig {
    /// Surface sizes with out-of-range config values clamped.
    pub fn surface_options(&self) -> SurfaceOptions {
        SurfaceOptions {
            graduation_ticks: self.graduation_ticks.clamp(1, MAX_GRADUATION_TICKS),
            dot_radius: self.dot_radius.min(MAX_DOT_RADIUS),
            label_scale: self.label_scale.clamp(1, MAX_LABEL_SCALE),
            label_margin: self.label_margin.min(MAX_LABEL_MARGIN),
            ..SurfaceOptions::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(flatten)]
    pub overrides: ColorOverrides,
}

impl ColorConfig {
    pub fn resolve(&self) -> ThemeColors {
        self.theme.colors().with_overrides(&self.overrides)
    }
}

/// Per-token colors that win over the theme
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ColorOverrides {
    pub background: Option<RgbColor>,
    pub grid: Option<RgbColor>,
    pub axis: Option<RgbColor>,
    pub graduation: Option<RgbColor>,
    pub neutral_dark: Option<RgbColor>,
    pub accent: Option<RgbColor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelConfig {
    pub real: String,
    pub imaginary: String,
    pub magnitude: String,
    pub phase: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            real: "re(z)".to_string(),
            imaginary: "im(z)".to_string(),
            magnitude: "|z|".to_string(),
            phase: "arg(z)".to_string(),
        }
    }
}

/// RGB color representation for configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// Parse from hex string like "#FF0000" or "FF0000"
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/argand/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("argand").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Parse errors are logged and fall back to defaults.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Failed to load config at {}: {:#}. Using defaults.", path.display(), e);
                None
            }
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, Self::generate_config_template())
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Argand Configuration
# This file is auto-generated. Edit as needed.

[display]
# Display mode: "terminal" (full screen, redraws on resize) or "print" (one shot to stdout)
mode = "terminal"
# Print mode size in terminal cells (defaults to the current terminal size)
# width = 80
# height = 24

[graph]
# Padding around the origin and the value, as a fraction of their span
margin = 0.25
# Approximate number of graduations per axis
graduation_ticks = 8
# Radius of the marker dot in pixels
dot_radius = 2
# Bitmap font scale for labels and graduations
label_scale = 1
# Gap between a label and its anchor in pixels
label_margin = 2

[colors]
# Theme: "light", "dark", "ocean", "mono"
theme = "light"
# Per-role overrides
# background = { r = 255, g = 255, b = 255 }
# grid = { r = 230, g = 230, b = 230 }
# axis = { r = 0, g = 0, b = 0 }
# graduation = { r = 80, g = 80, b = 80 }
# neutral_dark = { r = 90, g = 90, b = 90 }
# accent = { r = 235, g = 30, b = 30 }

[labels]
real = "re(z)"
imaginary = "im(z)"
magnitude = "|z|"
phase = "arg(z)"
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(mode) = args.mode {
            self.display.mode = mode;
        }
        if let Some(width) = args.width {
            self.display.width = Some(width);
        }
        if let Some(height) = args.height {
            self.display.height = Some(height);
        }
        if let Some(ref theme) = args.theme {
            match theme.parse() {
                Ok(theme) => self.colors.theme = theme,
                Err(e) => warn!("{}; keeping {}", e, self.colors.theme.name()),
            }
        }
        if let Some(ref color) = args.accent {
            match RgbColor::from_hex(color) {
                Some(c) => self.colors.overrides.accent = Some(c),
                None => warn!("Ignoring invalid accent color '{}'", color),
            }
        }
        if let Some(scale) = args.label_scale {
            self.graph.label_scale = scale;
        }
        if let Some(margin) = args.margin {
            self.graph.margin = margin.max(0.0);
        }
    }
}

/// Write the chosen theme back to the config file, keeping the user's
/// comments and layout. Creates the file from the template if missing.
pub fn save_theme(path: &Path, theme: Theme) -> Result<()> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Config::generate_config_template())?;
        info!("Created config file at {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let updated = set_theme_in_document(&content, theme)?;
    std::fs::write(path, updated).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn set_theme_in_document(content: &str, theme: Theme) -> Result<String> {
    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .context("config is not valid TOML")?;
    if !doc.contains_key("colors") {
        doc["colors"] = toml_edit::table();
    }
    doc["colors"]["theme"] = toml_edit::value(theme.name());
    Ok(doc.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let config: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(config.display.mode, DisplayMode::Terminal);
        assert_eq!(config.colors.theme, Theme::Light);
        assert_eq!(config.colors.overrides, ColorOverrides::default());
        assert_eq!(config.labels, LabelConfig::default());
        assert_eq!(config.graph.graduation_ticks, 8);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.graph.margin, 0.25);
        assert_eq!(config.labels.phase, "arg(z)");
    }

    #[test]
    fn color_overrides_sit_next_to_theme() {
        let config: Config = toml::from_str(
            r#"
            [colors]
            theme = "dark"
            accent = { r = 10, g = 20, b = 30 }
            "#,
        )
        .unwrap();
        assert_eq!(config.colors.theme, Theme::Dark);
        assert_eq!(config.colors.resolve().accent, (10, 20, 30));
        assert_eq!(config.colors.resolve().axis, Theme::Dark.colors().axis);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(RgbColor::from_hex("#FF8000"), Some(RgbColor { r: 255, g: 128, b: 0 }));
        assert_eq!(RgbColor::from_hex("12345"), None);
        assert_eq!(RgbColor::from_hex("GGGGGG"), None);
    }

    #[test]
    fn saving_theme_keeps_comments() {
        let original = "# my settings\n[colors]\ntheme = \"light\" # favourite\n";
        let updated = set_theme_in_document(original, Theme::Ocean).unwrap();
        assert!(updated.contains("# my settings"));
        let config: Config = toml::from_str(&updated).unwrap();
        assert_eq!(config.colors.theme, Theme::Ocean);
    }

    #[test]
    fn saving_theme_adds_missing_table() {
        let updated = set_theme_in_document("[graph]\nmargin = 0.5\n", Theme::Mono).unwrap();
        let config: Config = toml::from_str(&updated).unwrap();
        assert_eq!(config.colors.theme, Theme::Mono);
        assert_eq!(config.graph.margin, 0.5);
    }

    #[test]
    fn surface_options_clamp_degenerate_values() {
        let graph = GraphConfig {
            graduation_ticks: 0,
            label_scale: 0,
            ..GraphConfig::default()
        };
        let options = graph.surface_options();
        assert_eq!(options.graduation_ticks, 1);
        assert_eq!(options.label_scale, 1);

        let graph = GraphConfig {
            graduation_ticks: 1_000_000_000,
            dot_radius: usize::MAX,
            label_scale: 1_000,
            label_margin: usize::MAX,
            ..GraphConfig::default()
        };
        let options = graph.surface_options();
        assert_eq!(options.graduation_ticks, MAX_GRADUATION_TICKS);
        assert_eq!(options.dot_radius, MAX_DOT_RADIUS);
        assert_eq!(options.label_scale, MAX_LABEL_SCALE);
        assert_eq!(options.label_margin, MAX_LABEL_MARGIN);
    }

    #[test]
    fn huge_tick_count_renders_quickly() {
        let mut config = Config::default();
        config.graph.graduation_ticks = 1_000_000_000;
        let mut canvas = crate::renderer::Canvas::new(40, 30);
        crate::display::render_graph(&mut canvas, crate::complex::ComplexValue::new(3.0, 4.0), &config);
        assert!(canvas.data.chunks(4).all(|px| px[3] == 255));
    }
}
