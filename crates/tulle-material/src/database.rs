//! Material database with named cloth presets.

use std::collections::HashMap;

use crate::properties::ClothProperties;

/// A named collection of material presets.
///
/// Materials are looked up by name (e.g., "membrane", "cotton").
/// Custom materials can be registered at runtime.
#[derive(Debug, Clone)]
pub struct MaterialDatabase {
    materials: HashMap<String, ClothProperties>,
}

impl MaterialDatabase {
    /// Creates a new database with the built-in presets.
    pub fn with_defaults() -> Self {
        let mut db = Self::empty();

        db.register(ClothProperties::membrane());
        db.register(ClothProperties::damped_membrane());
        db.register(cotton());
        db.register(silk());
        db.register(denim());
        db.register(latex());

        db
    }

    /// Creates an empty database.
    pub fn empty() -> Self {
        Self {
            materials: HashMap::new(),
        }
    }

    /// Registers a material. Overwrites if the name already exists.
    pub fn register(&mut self, props: ClothProperties) {
        self.materials.insert(props.name.clone(), props);
    }

    /// Looks up a material by name. Returns `None` if not found.
    pub fn get(&self, name: &str) -> Option<&ClothProperties> {
        self.materials.get(name)
    }

    /// Returns all registered material names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns true if the database is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialDatabase {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── Built-in Presets ─────────────────────────────────────────────────

/// Woven cotton, ~0.5 mm.
fn cotton() -> ClothProperties {
    ClothProperties {
        name: "cotton".into(),
        thickness: 0.0005,
        density: 1500.0,
        young_modulus: 5.0e6,
        viscosity: 2000.0,
    }
}

/// Thin silk, light and lightly damped.
fn silk() -> ClothProperties {
    ClothProperties {
        name: "silk".into(),
        thickness: 0.0002,
        density: 1300.0,
        young_modulus: 2.0e6,
        viscosity: 500.0,
    }
}

/// Heavy denim, stiff and well damped.
fn denim() -> ClothProperties {
    ClothProperties {
        name: "denim".into(),
        thickness: 0.0012,
        density: 1400.0,
        young_modulus: 2.0e7,
        viscosity: 5000.0,
    }
}

/// Latex sheet: soft, dense, bouncy.
fn latex() -> ClothProperties {
    ClothProperties {
        name: "latex".into(),
        thickness: 0.001,
        density: 950.0,
        young_modulus: 1.5e6,
        viscosity: 100.0,
    }
}
