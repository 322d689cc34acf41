use dl_core::OpeningId;
use dl_project::schema::*;
use dl_project::{load_yaml, parse_yaml, save_yaml};
use dl_sim::CouplingOptions;

#[test]
fn roundtrip_yaml_scenario() {
    let scenario = Scenario {
        version: 1,
        name: "Roundtrip".to_string(),
        options: CouplingOptions {
            gravity: Some(9.81),
            ..CouplingOptions::default()
        },
        timestep: 0.5,
        steps: 4,
        nodes: vec![NodeDef {
            name: "J1".to_string(),
            invert_elev: 10.0,
            full_depth: 2.0,
            depth: 1.2,
            overland_depth: 0.1,
            coupling_area: 25.0,
            openings: vec![
                OpeningDef {
                    id: OpeningId(4),
                    kind: OpeningKindDef::Named(NamedKind::Combination),
                    area: 0.6,
                    width: 1.2,
                    orifice_coeff: 0.167,
                    free_weir_coeff: 0.54,
                    submerged_weir_coeff: 0.056,
                    closed: false,
                },
                OpeningDef {
                    id: OpeningId(9),
                    kind: OpeningKindDef::Code(42),
                    area: 0.3,
                    width: 0.8,
                    orifice_coeff: 0.6,
                    free_weir_coeff: 1.7,
                    submerged_weir_coeff: 0.3,
                    closed: true,
                },
            ],
        }],
    };

    let path = std::env::temp_dir().join("dl_project_roundtrip.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(scenario, loaded);
}

#[test]
fn minimal_scenario_uses_defaults() {
    let scenario = parse_yaml(
        r#"
version: 1
name: Minimal
nodes:
  - name: J1
    invert_elev: 0.0
    full_depth: 1.0
"#,
    )
    .unwrap();

    assert_eq!(scenario.options, CouplingOptions::default());
    assert_eq!(scenario.timestep, 1.0);
    assert_eq!(scenario.steps, 1);
    assert!(scenario.nodes[0].openings.is_empty());
    assert_eq!(scenario.nodes[0].coupling_area, 0.0);
}

#[test]
fn invalid_scenario_is_rejected_on_parse() {
    let err = parse_yaml(
        r#"
version: 1
name: Bad
nodes:
  - name: J1
    invert_elev: 0.0
    full_depth: 1.0
    openings:
      - id: 0
        area: -1.0
        width: 1.0
        orifice_coeff: 0.167
        free_weir_coeff: 0.54
        submerged_weir_coeff: 0.056
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("area"), "{err}");
}
