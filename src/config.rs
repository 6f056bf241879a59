//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`XR_ROOM_SECTION__KEY`)
//!
//! Every field has a default, so a missing file still yields the stock room.

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "XR_ROOM_";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    /// Orbit controls
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Room and ball layout
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Immersive (stereo) mode
    #[serde(default)]
    pub immersive: ImmersiveConfig,
    /// Frame statistics overlay
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`XR_ROOM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // XR_ROOM_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner width in logical pixels
    pub width: u32,
    /// Initial inner height in logical pixels
    pub height: u32,
    /// Start in borderless fullscreen
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "xr_room".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Starting position [x, y, z]
    pub position: [f32; 3],
    /// Point the camera orbits and looks at [x, y, z]
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 50.0,
            near: 0.1,
            far: 100.0,
            position: [0.0, 1.6, 3.0],
            target: [0.0, 1.6, 0.0],
        }
    }
}

/// Orbit controls configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_damping: bool,
    /// Fraction of the remaining motion applied per frame when damping
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            enable_damping: false,
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: f32::MAX,
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of spheres scattered in the room
    pub ball_count: usize,
    pub ball_radius: f32,
    /// Icosahedron subdivision level of each sphere
    pub ball_detail: u32,
    /// Balls are placed in [0, ball_spread) on each axis
    pub ball_spread: f32,
    /// Room size [width, height, depth]
    pub room_size: [f32; 3],
    /// Wireframe divisions along each axis
    pub room_segments: [u32; 3],
    /// Room line color as 0xRRGGBB
    pub room_color: u32,
    /// Background color as 0xRRGGBB
    pub background: u32,
    /// Fixed seed for a reproducible ball layout; entropy when unset
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ball_count: 200,
            ball_radius: 0.08,
            ball_detail: 2,
            ball_spread: 2.0,
            room_size: [6.0, 6.0, 6.0],
            room_segments: [10, 10, 10],
            room_color: 0x808080,
            background: 0x505050,
            seed: None,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Multisample antialiasing
    pub antialias: bool,
    /// Samples per pixel when antialiasing (1 or 4)
    pub msaa_samples: u32,
    /// Hemisphere light sky color as 0xRRGGBB
    pub hemisphere_sky: u32,
    /// Hemisphere light ground color as 0xRRGGBB
    pub hemisphere_ground: u32,
    /// Directional light color as 0xRRGGBB
    pub light_color: u32,
    /// Directional light position; the light shines from here towards the origin
    pub light_position: [f32; 3],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            msaa_samples: 4,
            hemisphere_sky: 0x606060,
            hemisphere_ground: 0x404040,
            light_color: 0xffffff,
            light_position: [1.0, 1.0, 1.0],
        }
    }
}

impl RenderingConfig {
    /// Effective MSAA sample count
    pub fn sample_count(&self) -> u32 {
        if self.antialias && self.msaa_samples > 1 {
            self.msaa_samples
        } else {
            1
        }
    }
}

/// Immersive mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImmersiveConfig {
    /// Whether the display supports immersive sessions
    pub enabled: bool,
    /// Interpupillary distance in meters
    pub eye_separation: f32,
}

impl Default for ImmersiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            eye_separation: 0.064,
        }
    }
}

/// Frame statistics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Show the overlay at startup
    pub visible: bool,
    /// Number of FPS samples kept for the graph
    pub history: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            visible: true,
            history: 74,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.camera.fov, 50.0);
        assert_eq!(config.camera.position, [0.0, 1.6, 3.0]);
        assert_eq!(config.scene.ball_count, 200);
        assert_eq!(config.scene.room_segments, [10, 10, 10]);
        assert_eq!(config.scene.background, 0x505050);
        assert!(config.scene.seed.is_none());
    }

    #[test]
    fn test_sample_count() {
        let mut rendering = RenderingConfig::default();
        assert_eq!(rendering.sample_count(), 4);

        rendering.antialias = false;
        assert_eq!(rendering.sample_count(), 1);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("ball_count"));
        assert!(toml.contains("eye_separation"));
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[scene]\nball_count = 5\n"))
            .extract()
            .unwrap();
        assert_eq!(config.scene.ball_count, 5);
        assert_eq!(config.scene.ball_radius, 0.08);
        assert_eq!(config.window.title, "xr_room");
    }
}
