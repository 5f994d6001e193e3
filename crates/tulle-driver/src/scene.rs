//! Scene files.
//!
//! A scene is a TOML document describing one simulation run:
//!
//! ```toml
//! [mesh]
//! source = "grid"
//! cols = 20
//! rows = 20
//! width = 2.0
//! height = 2.0
//!
//! [material]
//! preset = "damped_membrane"
//!
//! [solver]
//! gravity = [0.0, 0.0, -9.81]
//!
//! [compute]
//! backend = "rayon"
//!
//! [driver]
//! max_frames = 600
//!
//! [export]
//! path = "frames.json"
//! interval = 10
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tulle_compute::ComputeConfig;
use tulle_material::{ClothProperties, MaterialDatabase};
use tulle_mesh::generators::square_grid;
use tulle_mesh::ClothMesh;
use tulle_solver::SolverConfig;
use tulle_types::{TulleError, TulleResult};

use crate::config::DriverConfig;

/// Where the cloth surface comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MeshSource {
    /// Procedural square membrane with the standard groups.
    Grid {
        cols: usize,
        rows: usize,
        width: f32,
        height: f32,
    },
    /// JSON-encoded [`ClothMesh`].
    File { path: PathBuf },
}

impl Default for MeshSource {
    fn default() -> Self {
        MeshSource::Grid {
            cols: 20,
            rows: 20,
            width: 2.0,
            height: 2.0,
        }
    }
}

impl MeshSource {
    /// Produces the mesh. Relative file paths resolve against `base`.
    pub fn load(&self, base: Option<&Path>) -> TulleResult<ClothMesh> {
        match self {
            MeshSource::Grid {
                cols,
                rows,
                width,
                height,
            } => {
                if *cols == 0 || *rows == 0 {
                    return Err(TulleError::InvalidConfig(
                        "Grid needs at least one quad per side".into(),
                    ));
                }
                if !(*width > 0.0 && *height > 0.0) {
                    return Err(TulleError::InvalidConfig(format!(
                        "Grid size must be positive, got {width} x {height}"
                    )));
                }
                Ok(square_grid(*cols, *rows, *width, *height))
            }
            MeshSource::File { path } => {
                let resolved = match base {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.clone(),
                };
                ClothMesh::load(resolved)
            }
        }
    }
}

/// Material selection: a named preset, inline properties, or both
/// (inline wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub preset: Option<String>,
    pub properties: Option<ClothProperties>,
}

impl MaterialConfig {
    /// Resolves to concrete properties, defaulting to the damped membrane
    /// that matches the default grid's spacing.
    pub fn resolve(&self, db: &MaterialDatabase) -> TulleResult<ClothProperties> {
        if let Some(props) = &self.properties {
            props.validate()?;
            return Ok(props.clone());
        }
        match &self.preset {
            Some(name) => db.get(name).cloned().ok_or_else(|| {
                TulleError::InvalidConfig(format!(
                    "Unknown material preset '{name}' (available: {})",
                    db.names().join(", ")
                ))
            }),
            None => Ok(ClothProperties::damped_membrane()),
        }
    }
}

/// JSON frame export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub path: PathBuf,
    #[serde(default = "default_export_interval")]
    pub interval: u64,
}

fn default_export_interval() -> u64 {
    1
}

/// A complete simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed of the node colour palette.
    pub palette_seed: u64,
    pub mesh: MeshSource,
    pub material: MaterialConfig,
    pub solver: SolverConfig,
    pub compute: ComputeConfig,
    pub driver: DriverConfig,
    pub export: Option<ExportConfig>,
    /// Directory relative mesh paths resolve against (the scene file's).
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl SceneConfig {
    /// Parses a scene from TOML text.
    pub fn from_toml(text: &str) -> TulleResult<Self> {
        let scene: SceneConfig = toml::from_str(text)
            .map_err(|e| TulleError::InvalidConfig(format!("Scene parse error: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Loads a scene file.
    pub fn load(path: impl AsRef<Path>) -> TulleResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut scene = Self::from_toml(&text)?;
        scene.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(path = %path.display(), "scene loaded");
        Ok(scene)
    }

    /// Serializes the scene to TOML.
    pub fn to_toml(&self) -> TulleResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TulleError::Serialization(format!("Scene serialization failed: {e}")))
    }

    pub fn validate(&self) -> TulleResult<()> {
        self.solver.validate()?;
        self.driver.validate()?;
        if let Some(properties) = &self.material.properties {
            properties.validate()?;
        }
        Ok(())
    }

    pub fn build_mesh(&self) -> TulleResult<ClothMesh> {
        self.mesh.load(self.base_dir.as_deref())
    }

    pub fn resolve_material(&self) -> TulleResult<ClothProperties> {
        self.material.resolve(&MaterialDatabase::with_defaults())
    }
}
