//! Input document schema definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Only document version understood by this crate.
pub const CURRENT_VERSION: u32 = 1;

/// Cell kind names accepted in `settings.cell_kind` and as mesh section keys.
pub const CELL_KINDS: &[&str] = &["line", "triangle"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub settings: SettingsDef,
    pub mesh: MeshDef,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsDef {
    #[serde(default = "default_cell_kind")]
    pub cell_kind: String,
    #[serde(default = "default_unit_scale")]
    pub unit_scale: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_passes")]
    pub max_passes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_simple_paths: Option<usize>,
    #[serde(default = "default_prune")]
    pub prune: bool,
}

impl Default for SettingsDef {
    fn default() -> Self {
        Self {
            cell_kind: default_cell_kind(),
            unit_scale: default_unit_scale(),
            tolerance: default_tolerance(),
            max_passes: default_max_passes(),
            max_simple_paths: None,
            prune: default_prune(),
        }
    }
}

fn default_cell_kind() -> String {
    "triangle".to_string()
}

fn default_unit_scale() -> f64 {
    1.0
}

fn default_tolerance() -> f64 {
    1e-9
}

fn default_max_passes() -> u32 {
    32
}

fn default_prune() -> bool {
    true
}

/// Mesh as written by the meshing step: points, cells grouped by kind name,
/// per-cell physical ids and named groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeshDef {
    pub points: Vec<[f64; 2]>,
    #[serde(default)]
    pub cells: BTreeMap<String, Vec<Vec<usize>>>,
    #[serde(default)]
    pub cell_data: BTreeMap<String, CellDataDef>,
    #[serde(default)]
    pub field_data: BTreeMap<String, FieldDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CellDataDef {
    #[serde(default)]
    pub physical: Vec<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDef {
    pub id: i64,
    pub dim: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementDef {
    pub name: String,
    pub kind: ElementKindDef,
    pub footprint: FootprintDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKindDef {
    DeviceInstance {
        reference: String,
        #[serde(default)]
        two_terminal: bool,
    },
    Port {
        #[serde(default)]
        terminal: bool,
    },
    ContactPort,
    BranchPort,
    EdgeConnector,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FootprintDef {
    Polygon {
        points: Vec<[f64; 2]>,
    },
    Point {
        at: [f64; 2],
        #[serde(default)]
        radius: f64,
    },
    /// All cells of a named physical group.
    Surface {
        group: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleDef {
    pub class: String,
    pub color: String,
}
