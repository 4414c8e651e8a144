use std::path::Path;

#[test]
fn shipped_projects_load_and_validate() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../projects");
    let projects = ["solar_loop.yaml", "small_tank_realtime.yaml"];

    for name in projects {
        let path = root.join(name);
        let project = hl_project::load_yaml(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        hl_project::validate_project(&project)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
    }
}
