use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::ColorOverrides;
use crate::renderer::StyleToken;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Ocean,
    Mono,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "ocean" => Ok(Self::Ocean),
            "mono" | "monochrome" => Ok(Self::Mono),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Ocean => "ocean",
            Theme::Mono => "mono",
        }
    }

    /// (hue, saturation, lightness) of background, axis, neutral-dark and accent.
    fn hsl_roles(&self) -> [(f32, f32, f32); 4] {
        match self {
            // White plot, dark grey curves, red accent
            Theme::Light => [
                (0.0, 0.0, 1.0),
                (0.0, 0.0, 0.0),
                (0.0, 0.0, 0.35),
                (0.0, 0.85, 0.5),
            ],
            Theme::Dark => [
                (220.0, 0.15, 0.1),
                (0.0, 0.0, 0.85),
                (0.0, 0.0, 0.65),
                (15.0, 0.9, 0.6),
            ],
            Theme::Ocean => [
                (200.0, 0.6, 0.12),
                (180.0, 0.3, 0.8),
                (190.0, 0.35, 0.6),
                (45.0, 0.95, 0.55),
            ],
            Theme::Mono => [
                (0.0, 0.0, 0.0),
                (0.0, 0.0, 0.9),
                (0.0, 0.0, 0.6),
                (0.0, 0.0, 1.0),
            ],
        }
    }

    /// Resolve every style token to an RGB color.
    pub fn colors(&self) -> ThemeColors {
        let [background, axis, neutral_dark, accent] = self.hsl_roles().map(hsl_to_rgb);
        ThemeColors {
            background,
            grid: lerp_color(background, axis, 0.12),
            axis,
            graduation: lerp_color(background, axis, 0.7),
            neutral_dark,
            accent,
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark, Theme::Ocean, Theme::Mono]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|t| t == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}

/// Concrete colors handed to a surface. Nothing in the renderer reads colors
/// from anywhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub background: (u8, u8, u8),
    pub grid: (u8, u8, u8),
    pub axis: (u8, u8, u8),
    pub graduation: (u8, u8, u8),
    pub neutral_dark: (u8, u8, u8),
    pub accent: (u8, u8, u8),
}

impl ThemeColors {
    pub fn resolve(&self, token: StyleToken) -> (u8, u8, u8) {
        match token {
            StyleToken::Background => self.background,
            StyleToken::Grid => self.grid,
            StyleToken::Axis => self.axis,
            StyleToken::Graduation => self.graduation,
            StyleToken::NeutralDark => self.neutral_dark,
            StyleToken::Accent => self.accent,
        }
    }

    /// Replace the colors the user pinned in the config file.
    pub fn with_overrides(mut self, overrides: &ColorOverrides) -> Self {
        let pick = |slot: &mut (u8, u8, u8), color: Option<crate::config::RgbColor>| {
            if let Some(c) = color {
                *slot = (c.r, c.g, c.b);
            }
        };
        pick(&mut self.background, overrides.background);
        pick(&mut self.grid, overrides.grid);
        pick(&mut self.axis, overrides.axis);
        pick(&mut self.graduation, overrides.graduation);
        pick(&mut self.neutral_dark, overrides.neutral_dark);
        pick(&mut self.accent, overrides.accent);
        self
    }
}

fn hsl_to_rgb((h, s, l): (f32, f32, f32)) -> (u8, u8, u8) {
    let rgb: Srgb = Hsl::new(h, s, l).into_color();
    (
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Interpolate between two colors
pub fn lerp_color(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    (
        (a.0 as f32 + (b.0 as f32 - a.0 as f32) * t) as u8,
        (a.1 as f32 + (b.1 as f32 - a.1 as f32) * t) as u8,
        (a.2 as f32 + (b.2 as f32 - a.2 as f32) * t) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RgbColor;

    #[test]
    fn light_theme_matches_classic_look() {
        let colors = Theme::Light.colors();
        assert_eq!(colors.background, (255, 255, 255));
        assert_eq!(colors.axis, (0, 0, 0));
        let (r, g, b) = colors.accent;
        assert!(r > 200 && g < 60 && b < 60);
    }

    #[test]
    fn grid_sits_between_background_and_axis() {
        let colors = Theme::Light.colors();
        assert!(colors.grid.0 < 255 && colors.grid.0 > colors.graduation.0);
    }

    #[test]
    fn themes_cycle() {
        let mut theme = Theme::Light;
        for _ in 0..Theme::all().len() {
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Light);
        assert_eq!("Monochrome".parse::<Theme>(), Ok(Theme::Mono));
        assert!("plaid".parse::<Theme>().is_err());
    }

    #[test]
    fn overrides_replace_only_given_tokens() {
        let overrides = ColorOverrides {
            accent: Some(RgbColor { r: 1, g: 2, b: 3 }),
            ..Default::default()
        };
        let base = Theme::Dark.colors();
        let colors = base.with_overrides(&overrides);
        assert_eq!(colors.resolve(StyleToken::Accent), (1, 2, 3));
        assert_eq!(colors.resolve(StyleToken::Axis), base.axis);
    }
}
