//! Configuration snapshot for one animation session.
//!
//! A [`Settings`] value is resolved once from caller-supplied
//! [`SettingsOverrides`] layered over a [`Preset`] and is never mutated
//! afterwards. Overrides arrive as JSON from the web front-end, so every field
//! is optional and keyed by its camelCase option name.

use serde::Deserialize;

use crate::color::Color;
use crate::error::ConfigError;

/// Ripple-specific knobs. Widths and distances are CSS pixels, times are ms.
#[derive(Clone, Debug, PartialEq)]
pub struct RippleSettings {
    pub speed: f32,
    pub duration_ms: f32,
    pub fade_distance: f32,
    pub core: f32,
    pub shoulder: f32,
    pub fade_steps: f32,
    pub core_width: f32,
    pub shoulder_width: f32,
    pub step_tiles: f32,
    pub variation: f32,
    pub hot_chance: f32,
    pub hot_boost: f32,
    pub wobble_speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub tile_size: f32,
    pub gap: f32,
    pub radius: f32,

    pub rise_ms: f32,
    pub hold_ms: f32,
    pub fade_ms: f32,

    pub bg_color: Color,
    pub tile_color: Color,
    pub tile_alpha: f32,
    pub illuminate_color: Color,
    pub illuminate_max_alpha: f32,

    pub grid_line_color: Color,
    pub grid_line_alpha: f32,
    pub grid_line_width: f32,

    /// Impulse jitter strength in \[0, 1\].
    pub variation: f32,

    pub ripple: RippleSettings,
}

impl Settings {
    /// Center-to-center spacing of cells (`tile_size + gap`), never below 1px.
    #[inline]
    pub fn pitch(&self) -> f32 {
        (self.tile_size + self.gap).max(1.0)
    }

    /// Resolve a snapshot from a JSON overrides document.
    ///
    /// An empty or whitespace-only document yields the default preset.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Preset::Default.settings());
        }
        let overrides: SettingsOverrides = serde_json::from_str(json)?;
        overrides.resolve()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Preset::Default.settings()
    }
}

/// Named starting points for [`SettingsOverrides::resolve`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    /// Stock component defaults: large tiles with a teal glow.
    #[default]
    Default,
    /// Dense gap-less header grid, dark palette.
    HeaderDark,
    /// Dense gap-less header grid, light palette.
    HeaderLight,
}

impl Preset {
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Preset::Default),
            "header-dark" => Ok(Preset::HeaderDark),
            "header-light" => Ok(Preset::HeaderLight),
            other => Err(ConfigError::UnknownPreset(other.to_owned())),
        }
    }

    pub fn settings(self) -> Settings {
        match self {
            Preset::Default => Settings {
                tile_size: 34.0,
                gap: 10.0,
                radius: 60.0,
                rise_ms: 90.0,
                hold_ms: 70.0,
                fade_ms: 260.0,
                bg_color: Color::rgb(0x05, 0x06, 0x08),
                tile_color: Color::rgb(0x0c, 0x10, 0x16),
                tile_alpha: 0.9,
                illuminate_color: Color::rgb(0x49, 0xf2, 0xb2),
                illuminate_max_alpha: 0.9,
                grid_line_color: Color::WHITE,
                grid_line_alpha: 0.08,
                grid_line_width: 1.0,
                variation: 0.35,
                ripple: RippleSettings {
                    speed: 650.0,
                    duration_ms: 1600.0,
                    fade_distance: 520.0,
                    core: 1.0,
                    shoulder: 0.5,
                    fade_steps: 6.0,
                    core_width: 12.0,
                    shoulder_width: 36.0,
                    step_tiles: 2.0,
                    variation: 0.55,
                    hot_chance: 0.22,
                    hot_boost: 1.35,
                    wobble_speed: 1.6,
                },
            },
            Preset::HeaderDark | Preset::HeaderLight => {
                let dark = self == Preset::HeaderDark;
                Settings {
                    tile_size: 15.0,
                    gap: 0.0,
                    radius: 50.0,
                    rise_ms: 90.0,
                    hold_ms: 70.0,
                    fade_ms: 260.0,
                    bg_color: if dark {
                        Color::rgb(0x02, 0x03, 0x05)
                    } else {
                        Color::WHITE
                    },
                    tile_color: if dark {
                        Color::rgb(0x0b, 0x0f, 0x14)
                    } else {
                        Color::WHITE
                    },
                    tile_alpha: 0.9,
                    illuminate_color: if dark {
                        Color::rgb(0xf1, 0xf1, 0xf1)
                    } else {
                        Color::rgb(0x99, 0x99, 0x99)
                    },
                    illuminate_max_alpha: 1.0,
                    grid_line_color: if dark { Color::WHITE } else { Color::BLACK },
                    grid_line_alpha: 1.0,
                    grid_line_width: 1.0,
                    variation: 0.55,
                    ripple: RippleSettings {
                        speed: 500.0,
                        duration_ms: 1000.0,
                        fade_distance: 800.0,
                        core: 2.0,
                        shoulder: 3.0,
                        fade_steps: 1.5,
                        core_width: 7.0,
                        shoulder_width: 14.0,
                        step_tiles: 3.0,
                        variation: 0.55,
                        hot_chance: 0.3,
                        hot_boost: 0.95,
                        wobble_speed: 0.6,
                    },
                }
            }
        }
    }
}

/// Caller-supplied partial configuration. Absent fields keep the preset value.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsOverrides {
    pub preset: Option<String>,

    pub tile_size: Option<f32>,
    pub gap: Option<f32>,
    pub radius: Option<f32>,

    pub rise_ms: Option<f32>,
    pub hold_ms: Option<f32>,
    pub fade_ms: Option<f32>,

    pub bg_color: Option<String>,
    pub tile_color: Option<String>,
    pub tile_alpha: Option<f32>,
    pub illuminate_color: Option<String>,
    pub illuminate_max_alpha: Option<f32>,

    pub grid_line_color: Option<String>,
    pub grid_line_alpha: Option<f32>,
    pub grid_line_width: Option<f32>,

    pub variation: Option<f32>,

    pub ripple_speed: Option<f32>,
    pub ripple_duration_ms: Option<f32>,
    pub ripple_fade_distance: Option<f32>,
    pub ripple_core: Option<f32>,
    pub ripple_shoulder: Option<f32>,
    pub ripple_fade_steps: Option<f32>,
    pub ripple_core_width: Option<f32>,
    pub ripple_shoulder_width: Option<f32>,
    pub ripple_step_tiles: Option<f32>,
    pub ripple_variation: Option<f32>,
    pub ripple_hot_chance: Option<f32>,
    pub ripple_hot_boost: Option<f32>,
    pub ripple_wobble_speed: Option<f32>,
}

impl SettingsOverrides {
    /// Merge over the requested preset (or [`Preset::Default`]).
    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let preset = match self.preset.as_deref() {
            Some(name) => Preset::from_name(name)?,
            None => Preset::default(),
        };
        let settings = self.apply(preset.settings())?;
        log::info!(
            "[settings] preset={:?} pitch={} radius={} ripple_duration_ms={}",
            preset,
            settings.pitch(),
            settings.radius,
            settings.ripple.duration_ms
        );
        Ok(settings)
    }

    /// Layer these overrides over `base`.
    pub fn apply(&self, mut base: Settings) -> Result<Settings, ConfigError> {
        fn set<T: Copy>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        fn set_color(
            slot: &mut Color,
            field: &'static str,
            value: Option<&str>,
        ) -> Result<(), ConfigError> {
            if let Some(v) = value {
                *slot = Color::parse_hex(field, v)?;
            }
            Ok(())
        }

        set(&mut base.tile_size, self.tile_size);
        set(&mut base.gap, self.gap);
        set(&mut base.radius, self.radius);
        set(&mut base.rise_ms, self.rise_ms);
        set(&mut base.hold_ms, self.hold_ms);
        set(&mut base.fade_ms, self.fade_ms);

        set_color(&mut base.bg_color, "bgColor", self.bg_color.as_deref())?;
        set_color(&mut base.tile_color, "tileColor", self.tile_color.as_deref())?;
        set(&mut base.tile_alpha, self.tile_alpha);
        set_color(
            &mut base.illuminate_color,
            "illuminateColor",
            self.illuminate_color.as_deref(),
        )?;
        set(&mut base.illuminate_max_alpha, self.illuminate_max_alpha);

        set_color(
            &mut base.grid_line_color,
            "gridLineColor",
            self.grid_line_color.as_deref(),
        )?;
        set(&mut base.grid_line_alpha, self.grid_line_alpha);
        set(&mut base.grid_line_width, self.grid_line_width);

        set(&mut base.variation, self.variation);

        let r = &mut base.ripple;
        set(&mut r.speed, self.ripple_speed);
        set(&mut r.duration_ms, self.ripple_duration_ms);
        set(&mut r.fade_distance, self.ripple_fade_distance);
        set(&mut r.core, self.ripple_core);
        set(&mut r.shoulder, self.ripple_shoulder);
        set(&mut r.fade_steps, self.ripple_fade_steps);
        set(&mut r.core_width, self.ripple_core_width);
        set(&mut r.shoulder_width, self.ripple_shoulder_width);
        set(&mut r.step_tiles, self.ripple_step_tiles);
        set(&mut r.variation, self.ripple_variation);
        set(&mut r.hot_chance, self.ripple_hot_chance);
        set(&mut r.hot_boost, self.ripple_hot_boost);
        set(&mut r.wobble_speed, self.ripple_wobble_speed);

        Ok(base)
    }
}
