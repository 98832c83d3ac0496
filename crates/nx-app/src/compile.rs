//! Compilation of a validated document into extraction inputs.

use std::collections::BTreeMap;

use nx_core::Coord;
use nx_graph::{
    CellKind, DeviceAnnotation, Element, ExtractionConfig, FieldEntry, Footprint, MeshData,
    MeshGraphBuilder, Style,
};
use nx_project::schema::{
    ElementDef, ElementKindDef, FootprintDef, MeshDef, Project, SettingsDef, StyleDef,
};

use crate::error::{AppError, AppResult};

/// Everything the extractor needs, resolved from one document.
#[derive(Debug, Clone)]
pub struct CompiledProject {
    pub mesh: MeshData,
    pub elements: Vec<Element>,
    pub builder: MeshGraphBuilder,
    pub tolerance: f64,
    pub config: ExtractionConfig,
}

fn cell_kind(name: &str) -> AppResult<CellKind> {
    CellKind::from_name(name)
        .ok_or_else(|| AppError::Compile(format!("Unknown cell kind: {name}")))
}

pub fn compile_project(project: &Project) -> AppResult<CompiledProject> {
    let (builder, tolerance, config) = compile_settings(&project.settings)?;
    Ok(CompiledProject {
        mesh: compile_mesh(&project.mesh)?,
        elements: compile_elements(&project.elements),
        builder,
        tolerance,
        config,
    })
}

pub fn compile_settings(
    settings: &SettingsDef,
) -> AppResult<(MeshGraphBuilder, f64, ExtractionConfig)> {
    let builder = MeshGraphBuilder::new()
        .with_kind(cell_kind(&settings.cell_kind)?)
        .with_unit_scale(settings.unit_scale);
    let config = ExtractionConfig {
        max_passes: settings.max_passes,
        max_simple_paths: settings.max_simple_paths,
        prune: settings.prune,
    };
    Ok((builder, settings.tolerance, config))
}

pub fn compile_mesh(def: &MeshDef) -> AppResult<MeshData> {
    let mut cells = BTreeMap::new();
    for (name, list) in &def.cells {
        cells.insert(cell_kind(name)?, list.clone());
    }
    let mut physical = BTreeMap::new();
    for (name, data) in &def.cell_data {
        physical.insert(cell_kind(name)?, data.physical.clone());
    }
    let field_data = def
        .field_data
        .iter()
        .map(|(name, f)| {
            (
                name.clone(),
                FieldEntry {
                    id: f.id,
                    dim: f.dim,
                },
            )
        })
        .collect();

    Ok(MeshData {
        points: def.points.iter().copied().map(Coord::from).collect(),
        cells,
        physical,
        field_data,
    })
}

pub fn compile_elements(defs: &[ElementDef]) -> Vec<Element> {
    defs.iter().map(compile_element).collect()
}

fn compile_element(def: &ElementDef) -> Element {
    let name = def.name.clone();
    let device = match &def.kind {
        ElementKindDef::DeviceInstance {
            reference,
            two_terminal,
        } => DeviceAnnotation::DeviceInstance {
            name: name.clone(),
            reference: reference.clone(),
            two_terminal: *two_terminal,
        },
        ElementKindDef::Port { terminal } => DeviceAnnotation::Port {
            name: name.clone(),
            terminal: *terminal,
        },
        ElementKindDef::ContactPort => DeviceAnnotation::ContactPort { name: name.clone() },
        ElementKindDef::BranchPort => DeviceAnnotation::BranchPort { name: name.clone() },
        ElementKindDef::EdgeConnector => DeviceAnnotation::EdgeConnector { name: name.clone() },
    };
    let footprint = match &def.footprint {
        FootprintDef::Polygon { points } => {
            Footprint::Polygon(points.iter().copied().map(Coord::from).collect())
        }
        FootprintDef::Point { at, radius } => Footprint::Point {
            at: Coord::from(*at),
            radius: *radius,
        },
        FootprintDef::Surface { group } => Footprint::Surface(group.clone()),
    };
    let style = match &def.style {
        Some(StyleDef { class, color }) => Style::new(class.as_str(), color.as_str()),
        None => default_style(&device),
    };

    Element {
        name,
        footprint,
        device,
        style,
    }
}

fn default_style(device: &DeviceAnnotation) -> Style {
    let color = match device {
        DeviceAnnotation::DeviceInstance { .. } => "#696969",
        DeviceAnnotation::Port { terminal: true, .. } => "#ff8c00",
        DeviceAnnotation::Port { .. } => "#dc143c",
        DeviceAnnotation::ContactPort { .. } => "#9932cc",
        DeviceAnnotation::BranchPort { .. } => "#ffd700",
        DeviceAnnotation::Dummy { .. } => "#8fbc8f",
        DeviceAnnotation::EdgeConnector { .. } => "#20b2aa",
    };
    Style::new(device.kind_name(), color)
}
