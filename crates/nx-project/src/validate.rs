//! Input document validation logic.

use std::collections::HashSet;

use crate::schema::{
    CELL_KINDS, CURRENT_VERSION, ElementDef, FootprintDef, MeshDef, Project, SettingsDef,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn check_cell_kind(name: &str, context: &str) -> Result<(), ValidationError> {
    if CELL_KINDS.contains(&name) {
        Ok(())
    } else {
        Err(ValidationError::Unsupported {
            feature: format!("cell kind '{name}' in {context}"),
            reason: format!("expected one of {}", CELL_KINDS.join(", ")),
        })
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version != CURRENT_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_settings(&project.settings)?;
    validate_mesh(&project.mesh)?;

    let mut names = HashSet::new();
    for element in &project.elements {
        if !names.insert(&element.name) {
            return Err(ValidationError::DuplicateId {
                id: element.name.clone(),
                context: "elements".to_string(),
            });
        }
        validate_element(element, &project.mesh)?;
    }

    Ok(())
}

fn validate_settings(settings: &SettingsDef) -> Result<(), ValidationError> {
    check_cell_kind(&settings.cell_kind, "settings")?;
    if !settings.unit_scale.is_finite() || settings.unit_scale <= 0.0 {
        return Err(invalid(
            "settings.unit_scale",
            settings.unit_scale,
            "must be positive",
        ));
    }
    if !settings.tolerance.is_finite() || settings.tolerance < 0.0 {
        return Err(invalid(
            "settings.tolerance",
            settings.tolerance,
            "must be non-negative",
        ));
    }
    if settings.max_passes == 0 {
        return Err(invalid("settings.max_passes", 0, "must be at least 1"));
    }
    if settings.max_simple_paths == Some(0) {
        return Err(invalid("settings.max_simple_paths", 0, "must be at least 1"));
    }
    Ok(())
}

fn validate_mesh(mesh: &MeshDef) -> Result<(), ValidationError> {
    for (i, p) in mesh.points.iter().enumerate() {
        if !p[0].is_finite() || !p[1].is_finite() {
            return Err(invalid(
                format!("mesh.points[{i}]"),
                format!("{p:?}"),
                "coordinates must be finite",
            ));
        }
    }
    for kind in mesh.cells.keys() {
        check_cell_kind(kind, "mesh.cells")?;
    }
    for kind in mesh.cell_data.keys() {
        check_cell_kind(kind, "mesh.cell_data")?;
        if !mesh.cells.contains_key(kind) {
            return Err(ValidationError::MissingReference {
                id: kind.clone(),
                context: "mesh.cell_data".to_string(),
            });
        }
    }
    for (name, field) in &mesh.field_data {
        if !(1..=2).contains(&field.dim) {
            return Err(invalid(
                format!("mesh.field_data.{name}.dim"),
                field.dim,
                "must be 1 or 2",
            ));
        }
    }
    Ok(())
}

fn validate_element(element: &ElementDef, mesh: &MeshDef) -> Result<(), ValidationError> {
    let field = |what: &str| format!("elements.{}.{what}", element.name);
    match &element.footprint {
        FootprintDef::Polygon { points } => {
            if points.len() < 3 {
                return Err(invalid(
                    field("footprint"),
                    format!("{} points", points.len()),
                    "polygon needs at least 3 points",
                ));
            }
            if points.iter().flatten().any(|c| !c.is_finite()) {
                return Err(invalid(
                    field("footprint"),
                    "non-finite",
                    "coordinates must be finite",
                ));
            }
        }
        FootprintDef::Point { at, radius } => {
            if !at[0].is_finite() || !at[1].is_finite() {
                return Err(invalid(field("footprint.at"), format!("{at:?}"), "must be finite"));
            }
            if !radius.is_finite() || *radius < 0.0 {
                return Err(invalid(field("footprint.radius"), radius, "must be non-negative"));
            }
        }
        FootprintDef::Surface { group } => {
            if !mesh.field_data.contains_key(group) {
                return Err(ValidationError::MissingReference {
                    id: group.clone(),
                    context: field("footprint.group"),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ElementKindDef, FieldDef};

    fn project() -> Project {
        Project {
            version: CURRENT_VERSION,
            name: "t".into(),
            settings: SettingsDef::default(),
            mesh: MeshDef::default(),
            elements: vec![],
        }
    }

    fn port(name: &str, footprint: FootprintDef) -> ElementDef {
        ElementDef {
            name: name.into(),
            kind: ElementKindDef::Port { terminal: false },
            footprint,
            style: None,
        }
    }

    fn square() -> FootprintDef {
        FootprintDef::Polygon {
            points: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        }
    }

    #[test]
    fn empty_project_is_valid() {
        validate_project(&project()).unwrap();
    }

    #[test]
    fn version_must_match() {
        let mut p = project();
        p.version = 2;
        assert_eq!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion { version: 2 })
        );
    }

    #[test]
    fn duplicate_element_names() {
        let mut p = project();
        p.elements = vec![port("P1", square()), port("P1", square())];
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn degenerate_polygon() {
        let mut p = project();
        p.elements = vec![port(
            "P1",
            FootprintDef::Polygon {
                points: vec![[0.0, 0.0], [1.0, 0.0]],
            },
        )];
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn bad_settings() {
        let mut p = project();
        p.settings.unit_scale = 0.0;
        assert!(validate_project(&p).is_err());

        let mut p = project();
        p.settings.tolerance = -1.0;
        assert!(validate_project(&p).is_err());

        let mut p = project();
        p.settings.max_passes = 0;
        assert!(validate_project(&p).is_err());

        let mut p = project();
        p.settings.cell_kind = "tetra".into();
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::Unsupported { .. })
        ));
    }

    #[test]
    fn surface_must_name_a_group() {
        let mut p = project();
        p.elements = vec![port("C", FootprintDef::Surface { group: "M6".into() })];
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::MissingReference { .. })
        ));

        p.mesh
            .field_data
            .insert("M6".into(), FieldDef { id: 1, dim: 2 });
        validate_project(&p).unwrap();
    }

    #[test]
    fn cell_data_needs_cells() {
        let mut p = project();
        p.mesh.cell_data.insert("triangle".into(), Default::default());
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::MissingReference { .. })
        ));
    }
}
