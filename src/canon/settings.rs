#![allow(non_snake_case)]
use crate::algebra::{AsFloatT, FloatT};
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Error, Debug)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field {0}")]
    BadFieldValue(&'static str),
}

/// Engine behavior settings.
#[derive(Builder, Debug, Clone)]
pub struct EngineSettings {
    /// print progress while generating
    #[builder(default = "false")]
    pub verbose: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettingsBuilder::default().build().unwrap()
    }
}

/// Typed default value of one native solver setting, as embedded in the
/// generated artifact.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub enum SettingValue<T: FloatT> {
    Float(T),
    Int(u32),
    Bool(bool),
}

impl<T> SettingValue<T>
where
    T: FloatT,
{
    /// The C scalar type emitted code declares for this setting.
    pub fn ctype(&self) -> &'static str {
        match self {
            SettingValue::Float(_) => "c_float",
            SettingValue::Int(_) | SettingValue::Bool(_) => "c_int",
        }
    }
}

/// Descriptor for one native solver setting: its name and typed default.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct SettingDescriptor<T: FloatT> {
    pub name: String,
    pub value: SettingValue<T>,
}

impl<T> SettingDescriptor<T>
where
    T: FloatT,
{
    fn new(name: &str, value: SettingValue<T>) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// Native solver settings for the qp layout, with the target solver's
/// default values.
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct QpSolverSettings<T: FloatT> {
    ///ADMM penalty parameter
    #[builder(default = "(0.1).as_T()")]
    pub rho: T,

    ///maximum number of iterations
    #[builder(default = "4000")]
    pub max_iter: u32,

    ///absolute convergence tolerance
    #[builder(default = "(1e-3).as_T()")]
    pub eps_abs: T,

    ///relative convergence tolerance
    #[builder(default = "(1e-3).as_T()")]
    pub eps_rel: T,

    ///primal infeasibility tolerance
    #[builder(default = "(1e-4).as_T()")]
    pub eps_prim_inf: T,

    ///dual infeasibility tolerance
    #[builder(default = "(1e-4).as_T()")]
    pub eps_dual_inf: T,

    ///ADMM overrelaxation parameter
    #[builder(default = "(1.6).as_T()")]
    pub alpha: T,

    ///use scaled termination criteria
    #[builder(default = "false")]
    pub scaled_termination: bool,

    ///termination check interval
    #[builder(default = "25")]
    pub check_termination: u32,

    ///warm start from the previous solution
    #[builder(default = "true")]
    pub warm_start: bool,
}

impl<T> Default for QpSolverSettings<T>
where
    T: FloatT,
{
    fn default() -> Self {
        QpSolverSettingsBuilder::default().build().unwrap()
    }
}

impl<T> QpSolverSettings<T>
where
    T: FloatT,
{
    /// Descriptors for every setting, in the solver's declaration order.
    pub fn descriptors(&self) -> Vec<SettingDescriptor<T>> {
        vec![
            SettingDescriptor::new("rho", SettingValue::Float(self.rho)),
            SettingDescriptor::new("max_iter", SettingValue::Int(self.max_iter)),
            SettingDescriptor::new("eps_abs", SettingValue::Float(self.eps_abs)),
            SettingDescriptor::new("eps_rel", SettingValue::Float(self.eps_rel)),
            SettingDescriptor::new("eps_prim_inf", SettingValue::Float(self.eps_prim_inf)),
            SettingDescriptor::new("eps_dual_inf", SettingValue::Float(self.eps_dual_inf)),
            SettingDescriptor::new("alpha", SettingValue::Float(self.alpha)),
            SettingDescriptor::new(
                "scaled_termination",
                SettingValue::Bool(self.scaled_termination),
            ),
            SettingDescriptor::new(
                "check_termination",
                SettingValue::Int(self.check_termination),
            ),
            SettingDescriptor::new("warm_start", SettingValue::Bool(self.warm_start)),
        ]
    }
}

impl From<SettingsError> for QpSolverSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        QpSolverSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> QpSolverSettingsBuilder<T>
where
    T: FloatT,
{
    fn validate(&self) -> Result<(), SettingsError> {
        if let Some(rho) = self.rho {
            if rho <= T::zero() {
                return Err(SettingsError::BadFieldValue("rho"));
            }
        }
        if let Some(alpha) = self.alpha {
            if alpha <= T::zero() || alpha >= (2.0).as_T() {
                return Err(SettingsError::BadFieldValue("alpha"));
            }
        }
        for (field, value) in [
            ("eps_abs", &self.eps_abs),
            ("eps_rel", &self.eps_rel),
            ("eps_prim_inf", &self.eps_prim_inf),
            ("eps_dual_inf", &self.eps_dual_inf),
        ] {
            if let Some(v) = value {
                if *v < T::zero() {
                    return Err(SettingsError::BadFieldValue(field));
                }
            }
        }
        Ok(())
    }
}

/// Native solver settings for the conic layout, with the target solver's
/// default values.
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ConicSolverSettings<T: FloatT> {
    ///primal/dual feasibility tolerance
    #[builder(default = "(1e-8).as_T()")]
    pub feastol: T,

    ///absolute duality gap tolerance
    #[builder(default = "(1e-8).as_T()")]
    pub abstol: T,

    ///relative duality gap tolerance
    #[builder(default = "(1e-8).as_T()")]
    pub reltol: T,

    ///reduced feasibility tolerance
    #[builder(default = "(1e-4).as_T()")]
    pub feastol_inacc: T,

    ///reduced absolute gap tolerance
    #[builder(default = "(5e-5).as_T()")]
    pub abstol_inacc: T,

    ///reduced relative gap tolerance
    #[builder(default = "(5e-5).as_T()")]
    pub reltol_inacc: T,

    ///maximum number of iterations
    #[builder(default = "100")]
    pub maxit: u32,
}

impl<T> Default for ConicSolverSettings<T>
where
    T: FloatT,
{
    fn default() -> Self {
        ConicSolverSettingsBuilder::default().build().unwrap()
    }
}

impl<T> ConicSolverSettings<T>
where
    T: FloatT,
{
    /// Descriptors for every setting, in the solver's declaration order.
    pub fn descriptors(&self) -> Vec<SettingDescriptor<T>> {
        vec![
            SettingDescriptor::new("feastol", SettingValue::Float(self.feastol)),
            SettingDescriptor::new("abstol", SettingValue::Float(self.abstol)),
            SettingDescriptor::new("reltol", SettingValue::Float(self.reltol)),
            SettingDescriptor::new("feastol_inacc", SettingValue::Float(self.feastol_inacc)),
            SettingDescriptor::new("abstol_inacc", SettingValue::Float(self.abstol_inacc)),
            SettingDescriptor::new("reltol_inacc", SettingValue::Float(self.reltol_inacc)),
            SettingDescriptor::new("maxit", SettingValue::Int(self.maxit)),
        ]
    }
}

impl From<SettingsError> for ConicSolverSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        ConicSolverSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> ConicSolverSettingsBuilder<T>
where
    T: FloatT,
{
    fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("feastol", &self.feastol),
            ("abstol", &self.abstol),
            ("reltol", &self.reltol),
            ("feastol_inacc", &self.feastol_inacc),
            ("abstol_inacc", &self.abstol_inacc),
            ("reltol_inacc", &self.reltol_inacc),
        ] {
            if let Some(v) = value {
                if *v <= T::zero() {
                    return Err(SettingsError::BadFieldValue(field));
                }
            }
        }
        Ok(())
    }
}

// ---------- unit tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qp_defaults() {
        let s = QpSolverSettings::<f64>::default();
        assert_eq!(s.rho, 0.1);
        assert_eq!(s.max_iter, 4000);
        assert!(s.warm_start);

        let d = s.descriptors();
        assert_eq!(d.len(), 10);
        assert_eq!(d[0].name, "rho");
        assert_eq!(d[0].value.ctype(), "c_float");
        assert_eq!(d[1].value.ctype(), "c_int");
    }

    #[test]
    fn test_conic_defaults() {
        let s = ConicSolverSettings::<f64>::default();
        assert_eq!(s.maxit, 100);
        assert_eq!(s.descriptors().len(), 7);
    }

    #[test]
    fn test_builder_validation() {
        let bad = QpSolverSettingsBuilder::<f64>::default().rho(-1.0).build();
        assert!(bad.is_err());

        let good = QpSolverSettingsBuilder::<f64>::default()
            .rho(0.5)
            .max_iter(100)
            .build();
        assert!(good.is_ok());
    }
}
