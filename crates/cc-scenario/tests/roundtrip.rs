use cc_ensemble::PerturbationSpec;
use cc_model::ParameterOverrides;
use cc_scenario::*;

#[test]
fn roundtrip_yaml_default_scenario() {
    let scenario = Scenario::new("Baseline");
    validate_scenario(&scenario).unwrap();

    let path = std::env::temp_dir().join("cc_scenario_roundtrip_default.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json_ensemble_scenario() {
    let mut scenario = Scenario::new("High sensitivity");
    scenario.years = YearRangeDef {
        start: 2020,
        end: 2024,
    };
    scenario.ensemble = Some(EnsembleDef {
        runs: 200,
        seed: Some(1234),
        perturbation: PerturbationSpec::default(),
    });
    scenario.parameters = ParameterOverrides {
        c0: Some(420.0),
        lambda_ecs: Some(4.5),
        ..Default::default()
    };

    let path = std::env::temp_dir().join("cc_scenario_roundtrip_ensemble.json");
    save_json(&path, &scenario).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(scenario, loaded);
    assert_eq!(loaded.resolved_params().lambda_ecs, 4.5);
}

#[test]
fn load_handwritten_yaml() {
    let yaml = r#"
version: 1
name: Streamlit defaults
years:
  start: 2020
  end: 2024
ensemble:
  runs: 200
parameters:
  c0: 420
  seasonal_amp: 50
  ice_coeff_cm_per_C: 18.0
"#;
    let path = std::env::temp_dir().join("cc_scenario_handwritten.yml");
    std::fs::write(&path, yaml).unwrap();

    let scenario = load(&path).unwrap();
    let ensemble = scenario.ensemble.as_ref().unwrap();
    assert_eq!(ensemble.runs, 200);
    assert_eq!(ensemble.seed, None);
    assert_eq!(ensemble.perturbation, PerturbationSpec::default());

    let params = scenario.resolved_params();
    assert_eq!(params.seasonal_amp, 50.0);
    assert_eq!(params.r, 0.0055);
}

#[test]
fn invalid_scenario_is_rejected_on_load() {
    let yaml = "version: 1\nname: bad\nyears:\n  start: 2100\n  end: 2000\n";
    let path = std::env::temp_dir().join("cc_scenario_invalid.yaml");
    std::fs::write(&path, yaml).unwrap();

    let err = load_yaml(&path).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::Validation(ValidationError::InvalidYearRange { .. })
    ));
}

#[test]
fn unknown_parameter_is_rejected() {
    let yaml = "version: 1\nname: typo\nparameters:\n  lambda: 3.0\n";
    let path = std::env::temp_dir().join("cc_scenario_typo.yaml");
    std::fs::write(&path, yaml).unwrap();

    assert!(matches!(load_yaml(&path), Err(ScenarioError::Yaml(_))));
}

#[test]
fn unsupported_extension() {
    let path = std::env::temp_dir().join("cc_scenario.toml");
    assert!(matches!(
        load(&path),
        Err(ScenarioError::UnsupportedFormat { .. })
    ));
}
