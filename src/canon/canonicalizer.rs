use crate::algebra::FloatT;
use crate::canon::formats::{CanonicalArrayId, CanonicalFormat, SupportedFormat};
use crate::canon::{
    CanonError, CanonicalArray, CanonicalData, DependencyTable, EngineSettings, ParameterId,
    ParameterSpace, ParameterValues, ReducedProblem, StructuralConstants,
};

/// The generated canonicalization object.
///
/// Holds everything derived once at generation time (affine maps, fixed
/// sparsity structure, parameter dependency sets) together with the
/// current canonical values.   Per-solve work reduces to
/// [`update`](Self::update), which rewrites values in place and never
/// touches structure.
pub struct Canonicalizer<T: FloatT = f64> {
    pub(crate) format: SupportedFormat<T>,
    pub(crate) params: ParameterSpace,
    pub(crate) constants: StructuralConstants,
    pub(crate) arrays: Vec<CanonicalArray<T>>,
    pub(crate) deps: DependencyTable,
    pub(crate) data: Vec<CanonicalData<T>>,
}

impl<T> Canonicalizer<T>
where
    T: FloatT,
{
    /// Run the full generation pass: validate the reduction output, build
    /// every canonical array of the chosen layout, analyze dependencies and
    /// fix the encodings at the supplied default parameter values.
    ///
    /// All-or-nothing: any failure aborts with no partial output.
    pub fn new(
        format: SupportedFormat<T>,
        prob: ReducedProblem<T>,
        values: &ParameterValues<T>,
        settings: &EngineSettings,
    ) -> Result<Self, CanonError> {
        prob.validate()?;
        format.check_problem(&prob)?;

        if settings.verbose {
            println!(
                "canongen: deriving {} canonical arrays for the {} layout",
                format.array_ids().len(),
                format.name()
            );
        }

        let arrays: Vec<CanonicalArray<T>> = format
            .array_ids()
            .iter()
            .map(|&id| format.build_array(id, &prob))
            .collect::<Result<_, _>>()?;

        let deps = DependencyTable::analyze(&arrays, &prob.params);

        let flat = prob.params.flatten(values)?;
        let data: Vec<CanonicalData<T>> = arrays
            .iter()
            .map(|array| array.encode(&flat))
            .collect::<Result<_, _>>()?;

        if settings.verbose {
            let parametric = arrays.iter().filter(|a| a.is_parametric).count();
            println!(
                "canongen: {} of {} arrays vary with parameters",
                parametric,
                arrays.len()
            );
        }

        Ok(Self {
            format,
            params: prob.params,
            constants: prob.dims,
            arrays,
            deps,
            data,
        })
    }

    /// the canonical layout this object was generated for
    pub fn format(&self) -> &SupportedFormat<T> {
        &self.format
    }

    /// the parameter space the maps are defined over
    pub fn params(&self) -> &ParameterSpace {
        &self.params
    }

    /// the fixed structural sizes
    pub fn constants(&self) -> &StructuralConstants {
        &self.constants
    }

    /// all canonical arrays, in layout order
    pub fn arrays(&self) -> &[CanonicalArray<T>] {
        &self.arrays
    }

    /// the canonical array with the given id
    pub fn array(&self, id: CanonicalArrayId) -> Option<&CanonicalArray<T>> {
        self.arrays.iter().find(|a| a.id == id)
    }

    /// the current encoded values of the array with the given id
    pub fn data(&self, id: CanonicalArrayId) -> Option<&CanonicalData<T>> {
        let idx = self.arrays.iter().position(|a| a.id == id)?;
        Some(&self.data[idx])
    }

    /// the parameter/array dependency table
    pub fn dependencies(&self) -> &DependencyTable {
        &self.deps
    }

    /// The arrays to recompute when the given parameter changes, in layout
    /// order.   `None` for a foreign parameter id.
    pub fn outdated_set(&self, id: ParameterId) -> Option<&[CanonicalArrayId]> {
        let idx = self.params.index_of(id)?;
        Some(self.deps.outdated(idx))
    }
}
