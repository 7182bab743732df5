use std::time::Duration;

use log::warn;

/// Fixed simulation rate of the game loop.
pub const TICK_RATE: u32 = 120;
pub const FIXED_STEP: f32 = 1.0 / TICK_RATE as f32;

#[derive(Clone, Debug)]
pub struct BirdConfig {
    pub width: f32,
    pub height: f32,
    pub weight: f32,
    pub max_velocity: f32,
    pub jump_force: f32,
    /// Backward drift applied after death, units per second.
    pub bounce_speed: f32,
    /// Extra downward drift applied after death, units per second.
    pub fall_speed: f32,
    pub flap_interval: Duration,
    pub death_frame: usize,
}

impl Default for BirdConfig {
    fn default() -> Self {
        Self {
            width: 50.0 * 0.8,
            height: 28.0 * 0.8,
            weight: 1.0,
            max_velocity: 120.0,
            jump_force: 300.0,
            bounce_speed: 70.0,
            fall_speed: 30.0,
            flap_interval: Duration::from_millis(200),
            death_frame: 2,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PillarConfig {
    pub width: f32,
    pub gap: f32,
    pub base_speed: f32,
    pub speed_increment: f32,
    pub spawn_interval: Duration,
    /// Random vertical offset is drawn from `[-max_offset, max_offset)`.
    pub max_offset: f32,
    /// Horizontal distance between a pair and its score zone.
    pub score_zone_lead: f32,
}

impl Default for PillarConfig {
    fn default() -> Self {
        Self {
            width: 60.0,
            gap: 80.0,
            base_speed: 90.0,
            speed_increment: 0.5,
            spawn_interval: Duration::from_millis(2500),
            max_offset: 15.0,
            score_zone_lead: 60.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub scale: f32,
    pub background: [u8; 3],
    pub font: &'static str,
    pub gravity: f32,
    pub menu_arm_delay: Duration,
    pub game_over_delay: Duration,
    pub music_volume: f32,
    pub bird: BirdConfig,
    pub pillars: PillarConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 320.0,
            screen_height: 240.0,
            scale: 2.0,
            background: [41, 173, 255],
            font: "sink",
            gravity: 1600.0,
            menu_arm_delay: Duration::from_millis(500),
            game_over_delay: Duration::from_millis(1000),
            music_volume: 0.6,
            bird: BirdConfig::default(),
            pillars: PillarConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn floor_height(&self) -> f32 {
        self.screen_height / 8.0
    }

    pub fn floor_top(&self) -> f32 {
        self.screen_height - self.floor_height()
    }

    pub fn background_rgb(&self) -> [f32; 3] {
        let [r, g, b] = self.background;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}

/// Options read from the page URL query string at startup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaunchOptions {
    pub background: Option<[f32; 3]>,
    pub uncapped: bool,
    pub seed: Option<u64>,
    pub muted: bool,
}

impl LaunchOptions {
    /// Parses `?bg=rrggbb&uncapped=1&seed=42&mute=1`. Unknown keys are ignored and malformed
    /// values fall back to the defaults.
    pub fn from_query(query: &str) -> Self {
        let mut options = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "bg" => {
                    options.background = parse_hex_color(value);
                    if options.background.is_none() {
                        warn!("ignoring bad bg colour {value:?}");
                    }
                }
                "uncapped" => options.uncapped = is_truthy(value),
                "mute" => options.muted = is_truthy(value),
                "seed" => match value.parse() {
                    Ok(seed) => options.seed = Some(seed),
                    Err(_) => warn!("ignoring bad seed {value:?}"),
                },
                _ => {}
            }
        }
        options
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes")
}

fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_is_an_eighth_of_the_screen() {
        let config = GameConfig::default();
        assert_eq!(config.floor_height(), 30.0);
        assert_eq!(config.floor_top(), 210.0);
    }

    #[test]
    fn parses_all_launch_options() {
        let options = LaunchOptions::from_query("?bg=ff0080&uncapped=1&seed=42&mute=true");
        assert_eq!(options.background, Some([1.0, 0.0, 128.0 / 255.0]));
        assert!(options.uncapped);
        assert!(options.muted);
        assert_eq!(options.seed, Some(42));
    }

    #[test]
    fn malformed_options_fall_back() {
        let options = LaunchOptions::from_query("bg=zzz&seed=abc&uncapped=0&other");
        assert_eq!(options, LaunchOptions::default());

        // Multibyte characters must not split inside a char.
        assert_eq!(LaunchOptions::from_query("?bg=a\u{20ac}bc").background, None);
        assert_eq!(LaunchOptions::from_query("?bg=\u{e9}\u{e9}\u{e9}").background, None);
    }

    #[test]
    fn empty_query_is_default() {
        assert_eq!(LaunchOptions::from_query(""), LaunchOptions::default());
    }
}
