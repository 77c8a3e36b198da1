//! Simulation parameters and partial overrides.

use cc_core::units::{Length, Ratio, m, ppm};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full parameter set for one deterministic simulation.
///
/// No ranges are validated. Values such as `c0 <= 0` are accepted and show up
/// as non-finite temperatures downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParams {
    /// Initial CO2 concentration at the first year, ppm.
    pub c0: f64,
    /// Exponential growth rate of CO2 per year.
    pub r: f64,
    /// Amplitude of the 12-step seasonal cycle, ppm.
    pub seasonal_amp: f64,
    /// Equilibrium climate sensitivity, °C per CO2 doubling.
    pub lambda_ecs: f64,
    /// Thermal expansion coefficient of sea water, 1/°C.
    pub beta: f64,
    /// Effective depth of the warming ocean layer, m.
    pub ocean_depth_m: f64,
    /// Ice-melt contribution, cm per °C.
    #[serde(rename = "ice_coeff_cm_per_C")]
    pub ice_coeff_cm_per_c: f64,
}

impl SimulationParams {
    pub const DEFAULT_C0: f64 = 420.0;
    pub const DEFAULT_R: f64 = 0.0055;
    pub const DEFAULT_SEASONAL_AMP: f64 = 3.0;
    pub const DEFAULT_LAMBDA_ECS: f64 = 3.0;
    pub const DEFAULT_BETA: f64 = 2.1e-4;
    pub const DEFAULT_OCEAN_DEPTH_M: f64 = 3700.0;
    pub const DEFAULT_ICE_COEFF_CM_PER_C: f64 = 18.0;

    /// Copy with the two ensemble-perturbed parameters replaced.
    pub fn with_sensitivity(self, r: f64, lambda_ecs: f64) -> Self {
        Self {
            r,
            lambda_ecs,
            ..self
        }
    }

    pub fn initial_co2(&self) -> Ratio {
        ppm(self.c0)
    }

    pub fn ocean_depth(&self) -> Length {
        m(self.ocean_depth_m)
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            c0: Self::DEFAULT_C0,
            r: Self::DEFAULT_R,
            seasonal_amp: Self::DEFAULT_SEASONAL_AMP,
            lambda_ecs: Self::DEFAULT_LAMBDA_ECS,
            beta: Self::DEFAULT_BETA,
            ocean_depth_m: Self::DEFAULT_OCEAN_DEPTH_M,
            ice_coeff_cm_per_c: Self::DEFAULT_ICE_COEFF_CM_PER_C,
        }
    }
}

impl fmt::Display for SimulationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "c0={} ppm, r={}, seasonal_amp={} ppm, lambda_ecs={} °C, beta={}, ocean_depth={} m, ice={} cm/°C",
            self.c0,
            self.r,
            self.seasonal_amp,
            self.lambda_ecs,
            self.beta,
            self.ocean_depth_m,
            self.ice_coeff_cm_per_c
        )
    }
}

/// Partial parameter set; `None` keeps the base value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonal_amp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda_ecs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocean_depth_m: Option<f64>,
    #[serde(
        default,
        rename = "ice_coeff_cm_per_C",
        skip_serializing_if = "Option::is_none"
    )]
    pub ice_coeff_cm_per_c: Option<f64>,
}

impl ParameterOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply onto `base`, field by field.
    pub fn apply(&self, base: SimulationParams) -> SimulationParams {
        SimulationParams {
            c0: self.c0.unwrap_or(base.c0),
            r: self.r.unwrap_or(base.r),
            seasonal_amp: self.seasonal_amp.unwrap_or(base.seasonal_amp),
            lambda_ecs: self.lambda_ecs.unwrap_or(base.lambda_ecs),
            beta: self.beta.unwrap_or(base.beta),
            ocean_depth_m: self.ocean_depth_m.unwrap_or(base.ocean_depth_m),
            ice_coeff_cm_per_c: self.ice_coeff_cm_per_c.unwrap_or(base.ice_coeff_cm_per_c),
        }
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(&self, other: &ParameterOverrides) -> ParameterOverrides {
        ParameterOverrides {
            c0: other.c0.or(self.c0),
            r: other.r.or(self.r),
            seasonal_amp: other.seasonal_amp.or(self.seasonal_amp),
            lambda_ecs: other.lambda_ecs.or(self.lambda_ecs),
            beta: other.beta.or(self.beta),
            ocean_depth_m: other.ocean_depth_m.or(self.ocean_depth_m),
            ice_coeff_cm_per_c: other.ice_coeff_cm_per_c.or(self.ice_coeff_cm_per_c),
        }
    }

    /// Resolve against the built-in defaults.
    pub fn resolve(&self) -> SimulationParams {
        self.apply(SimulationParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_core::units::{as_cm, as_ppm};

    #[test]
    fn defaults_match_documented_values() {
        let p = SimulationParams::default();
        assert_eq!(p.c0, 420.0);
        assert_eq!(p.r, 0.0055);
        assert_eq!(p.seasonal_amp, 3.0);
        assert_eq!(p.lambda_ecs, 3.0);
        assert_eq!(p.beta, 2.1e-4);
        assert_eq!(p.ocean_depth_m, 3700.0);
        assert_eq!(p.ice_coeff_cm_per_c, 18.0);
    }

    #[test]
    fn with_sensitivity_only_touches_r_and_lambda() {
        let base = SimulationParams::default();
        let p = base.with_sensitivity(0.007, 2.5);
        assert_eq!(p.r, 0.007);
        assert_eq!(p.lambda_ecs, 2.5);
        assert_eq!(p.c0, base.c0);
        assert_eq!(p.seasonal_amp, base.seasonal_amp);
        assert_eq!(p.beta, base.beta);
        assert_eq!(p.ocean_depth_m, base.ocean_depth_m);
        assert_eq!(p.ice_coeff_cm_per_c, base.ice_coeff_cm_per_c);
    }

    #[test]
    fn overrides_apply_only_set_fields() {
        let overrides = ParameterOverrides {
            c0: Some(400.0),
            seasonal_amp: Some(0.0),
            ..Default::default()
        };
        let p = overrides.resolve();
        assert_eq!(p.c0, 400.0);
        assert_eq!(p.seasonal_amp, 0.0);
        assert_eq!(p.r, SimulationParams::DEFAULT_R);
        assert!(!overrides.is_empty());
        assert!(ParameterOverrides::default().is_empty());
    }

    #[test]
    fn merged_overrides_prefer_the_later_layer() {
        let file = ParameterOverrides {
            c0: Some(400.0),
            r: Some(0.01),
            ..Default::default()
        };
        let flags = ParameterOverrides {
            c0: Some(410.0),
            ..Default::default()
        };
        let merged = file.merged_with(&flags);
        assert_eq!(merged.c0, Some(410.0));
        assert_eq!(merged.r, Some(0.01));
        assert_eq!(merged.lambda_ecs, None);
    }

    #[test]
    fn typed_views() {
        let p = SimulationParams::default();
        assert!((as_ppm(p.initial_co2()) - 420.0).abs() < 1e-9);
        assert!((as_cm(p.ocean_depth()) - 370_000.0).abs() < 1e-6);
    }

    #[test]
    fn params_serde_uses_original_field_names() {
        let json = serde_json::to_string(&SimulationParams::default()).unwrap();
        assert!(json.contains("\"ice_coeff_cm_per_C\""));

        let partial: SimulationParams = serde_json::from_str(r#"{"c0": 300.0}"#).unwrap();
        assert_eq!(partial.c0, 300.0);
        assert_eq!(partial.lambda_ecs, SimulationParams::DEFAULT_LAMBDA_ECS);
    }

    #[test]
    fn overrides_reject_unknown_fields() {
        let result: Result<ParameterOverrides, _> = serde_json::from_str(r#"{"c_0": 300.0}"#);
        assert!(result.is_err());
    }
}
