use std::path::{Path, PathBuf};

use anyhow::{Context, ensure};
use clap::ValueEnum;
use glam::Vec4;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// One triangle with a colour per corner
    Triangle,
    /// Indexed cube with a colour per face
    Cube,
    /// Phong-lit sphere with a procedural stripe texture
    Phong,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Ppm,
    Ascii,
}

/// Everything needed to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub scene: SceneKind,
    pub width: u32,
    pub height: u32,
    pub clear_color: Vec4,
    /// Distance from the camera to the scene origin. Below roughly 1.4 the
    /// cube's nearest corner crosses the near plane and gets clipped.
    pub camera_distance: f32,
    pub format: OutputFormat,
    /// Destination file; standard output when absent.
    pub output: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scene: SceneKind::Phong,
            width: 320,
            height: 240,
            clear_color: Vec4::new(0.5, 0.5, 0.5, 1.0),
            camera_distance: 3.0,
            format: OutputFormat::Ppm,
            output: None,
        }
    }
}

impl RenderConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening config {}", path.display()))?;
        let config: Self = serde_json::from_reader(file)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating config {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "framebuffer must be at least 1x1, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            self.camera_distance.is_finite() && self.camera_distance > 0.0,
            "camera distance must be positive, got {}",
            self.camera_distance
        );
        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
