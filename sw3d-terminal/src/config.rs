//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SW3D_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sw3d_core::{Camera, CameraSpeeds, Mesh, ModelTransform, ProjectionConfig, Scene, Vector3H};

use crate::logging::LoggingConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Terminal output settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Perspective projection
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Starting camera pose and speeds
    #[serde(default)]
    pub camera: CameraConfig,
    /// Mesh, model placement and lighting
    #[serde(default)]
    pub scene: SceneConfig,
    /// Log filter and destination
    #[serde(default)]
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SW3D_*`)
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

        // SW3D_PROJECTION__FOV_DEGREES=75 -> projection.fov_degrees = 75
        figment = figment.merge(Env::prefixed("SW3D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Build the scene for `mesh` on a surface with the given aspect ratio
    pub fn build_scene(&self, mesh: Mesh, aspect_ratio: f32) -> Scene {
        Scene::new(mesh, self.projection, aspect_ratio)
            .with_camera(Camera::new(
                Vector3H::from(self.camera.start_position),
                self.camera.yaw,
            ))
            .with_speeds(CameraSpeeds {
                move_speed: self.camera.move_speed,
                turn_speed: self.camera.turn_speed,
            })
            .with_model(ModelTransform {
                offset: Vector3H::from(self.scene.model_offset),
                spin_rate: self.scene.spin_rate,
            })
            .with_light(Vector3H::from(self.scene.light_direction))
    }
}

/// Terminal output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Frame rate the run loop sleeps toward
    pub target_fps: u32,
    /// Height/width ratio of one character cell
    pub cell_aspect: f32,
    /// Draw triangle edges on top of the fill
    pub outline: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            cell_aspect: 2.0,
            outline: false,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Starting yaw in radians
    pub yaw: f32,
    /// Movement speed (units per second)
    pub move_speed: f32,
    /// Turn speed (radians per second)
    pub turn_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let speeds = CameraSpeeds::default();
        Self {
            start_position: [0.0, 0.0, 0.0],
            yaw: 0.0,
            move_speed: speeds.move_speed,
            turn_speed: speeds.turn_speed,
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// OBJ file to render; the built-in cube when unset
    pub mesh_path: Option<PathBuf>,
    /// Edge length of the built-in cube
    pub cube_size: f32,
    /// World position of the model [x, y, z]
    pub model_offset: [f32; 3],
    /// Model spin in radians per second
    pub spin_rate: f32,
    /// Direction toward the light [x, y, z]
    pub light_direction: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            mesh_path: None,
            cube_size: 2.0,
            model_offset: [0.0, 0.0, 3.0],
            spin_rate: 1.0,
            light_direction: [0.0, 1.0, -1.0],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `env_logger` filter string; `RUST_LOG` is used when unset
    pub filter: Option<String>,
    /// Append log output to this file instead of stderr
    pub file: Option<PathBuf>,
}

impl LoggingSection {
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.filter.clone(),
            file: self.file.clone(),
            ..LoggingConfig::default()
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
