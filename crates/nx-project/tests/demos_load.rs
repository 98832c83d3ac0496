use std::path::Path;

#[test]
fn demos_load_and_validate() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    for name in ["wire.yaml", "tee.yaml"] {
        let path = root.join(name);
        let project = nx_project::load_yaml(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        nx_project::validate_project(&project)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
        assert_eq!(
            project.mesh.cells["triangle"].len(),
            project.mesh.cell_data["triangle"].physical.len()
        );
    }
}

#[test]
fn tee_demo_has_three_ports() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/tee.yaml");
    let project = nx_project::load(&path).unwrap();
    let names: Vec<_> = project.elements.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["P1", "P2", "P3"]);
    assert_eq!(
        project.elements[2].kind,
        nx_project::ElementKindDef::Port { terminal: true }
    );
}
