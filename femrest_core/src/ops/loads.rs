//! Load cases, loads and combinations.
//!
//! Load directions use [`Dof`]; the application expects them as integers
//! 1-6. Whether a direction refers to the element's local axes or the
//! global axes is chosen per load with `local()` / `global()`.

use serde::{Deserialize, Serialize};

use crate::errors::{ClientResult, OperationKind};
use crate::ids::{ElementId, LoadCaseId, NodeId};
use crate::protocol::ApiRequest;
use crate::session::Session;
use crate::transport::Transport;

/// Degree of freedom / load direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dof {
    X = 1,
    Y = 2,
    Z = 3,
    RX = 4,
    RY = 5,
    RZ = 6,
}

impl Dof {
    /// Wire code (1-6)
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

// ============================================================================
// Load Definitions
// ============================================================================

/// Concentrated force or moment at a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodalLoad {
    pub node: NodeId,
    pub value: f64,
    pub direction: Dof,
    pub load_case: LoadCaseId,
    /// Default: false (global axes)
    pub local: bool,
}

impl NodalLoad {
    pub fn new(node: NodeId, value: f64, direction: Dof, load_case: impl Into<LoadCaseId>) -> Self {
        NodalLoad {
            node,
            value,
            direction,
            load_case: load_case.into(),
            local: false,
        }
    }

    pub fn local(mut self) -> Self {
        self.local = true;
        self
    }
}

/// Uniform line load over the full length of a beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamUniformLoad {
    pub element: ElementId,
    pub value: f64,
    pub direction: Dof,
    pub load_case: LoadCaseId,
    /// Default: true (element axes)
    pub local: bool,
}

impl BeamUniformLoad {
    pub fn new(element: ElementId, value: f64, direction: Dof, load_case: impl Into<LoadCaseId>) -> Self {
        BeamUniformLoad {
            element,
            value,
            direction,
            load_case: load_case.into(),
            local: true,
        }
    }

    pub fn global(mut self) -> Self {
        self.local = false;
        self
    }
}

/// Stations of a piecewise-linear beam load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Positions {
    /// Fractions of the element length, 0 to 1
    Relative(Vec<f64>),
    /// Distances from the first node in the session's length unit
    Absolute(Vec<f64>),
}

impl Positions {
    pub fn values(&self) -> &[f64] {
        match self {
            Positions::Relative(values) | Positions::Absolute(values) => values,
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, Positions::Absolute(_))
    }
}

/// Piecewise-linear line load: `values[i]` acts at `positions[i]`.
///
/// Two equal values at the element ends give a uniform load; repeated
/// positions give a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDistributedLoad {
    pub element: ElementId,
    pub values: Vec<f64>,
    pub positions: Positions,
    pub direction: Dof,
    pub load_case: LoadCaseId,
    /// Default: true (element axes)
    pub local: bool,
}

impl BeamDistributedLoad {
    pub fn new(
        element: ElementId,
        values: Vec<f64>,
        positions: Positions,
        direction: Dof,
        load_case: impl Into<LoadCaseId>,
    ) -> Self {
        BeamDistributedLoad {
            element,
            values,
            positions,
            direction,
            load_case: load_case.into(),
            local: true,
        }
    }

    pub fn global(mut self) -> Self {
        self.local = false;
        self
    }
}

/// Pressure on a surface element. One value is uniform; one per corner
/// varies it across the element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLoad {
    pub element: ElementId,
    pub values: Vec<f64>,
    pub direction: Dof,
    pub load_case: LoadCaseId,
    /// Default: false (global axes)
    pub local: bool,
}

impl SurfaceLoad {
    pub fn new(element: ElementId, values: Vec<f64>, direction: Dof, load_case: impl Into<LoadCaseId>) -> Self {
        SurfaceLoad {
            element,
            values,
            direction,
            load_case: load_case.into(),
            local: false,
        }
    }

    /// Same pressure over the whole element
    pub fn uniform(element: ElementId, value: f64, direction: Dof, load_case: impl Into<LoadCaseId>) -> Self {
        SurfaceLoad::new(element, vec![value], direction, load_case)
    }

    pub fn local(mut self) -> Self {
        self.local = true;
        self
    }
}

/// Temperature load on a beam: uniform change plus linear gradients across
/// the section depth in local z and y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalLoad {
    pub element: ElementId,
    pub uniform: f64,
    pub gradient_z: f64,
    pub gradient_y: f64,
    pub load_case: LoadCaseId,
}

impl ThermalLoad {
    pub fn new(element: ElementId, load_case: impl Into<LoadCaseId>) -> Self {
        ThermalLoad {
            element,
            uniform: 0.0,
            gradient_z: 0.0,
            gradient_y: 0.0,
            load_case: load_case.into(),
        }
    }

    pub fn with_uniform(mut self, delta: f64) -> Self {
        self.uniform = delta;
        self
    }

    pub fn with_gradient_z(mut self, delta: f64) -> Self {
        self.gradient_z = delta;
        self
    }

    pub fn with_gradient_y(mut self, delta: f64) -> Self {
        self.gradient_y = delta;
        self
    }
}

// ============================================================================
// Session Operations
// ============================================================================

impl<T: Transport> Session<T> {
    /// Create a named load case (also used as the name of a combination).
    ///
    /// Returns the identifier the application assigned, which is `name`
    /// unless the application reports another one.
    pub fn add_load_case(&self, name: &str) -> ClientResult<LoadCaseId> {
        let request = ApiRequest::new("add_load_case", OperationKind::Create, "/loadcase/add").param("name", name);
        self.call(&request)?.into_id_or(&request, name).map(LoadCaseId::from)
    }

    /// Include the structure's self weight in `load_case`.
    pub fn set_self_weight(&self, load_case: &LoadCaseId) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("set_self_weight", OperationKind::Mutate, "/loadcase/self-weight").param("load_case", load_case.as_str()),
        )
    }

    /// Convert the loads of `load_case` into masses for dynamic analysis.
    pub fn set_loads_to_mass(&self, load_case: &LoadCaseId) -> ClientResult<()> {
        self.mutate(ApiRequest::new("set_loads_to_mass", OperationKind::Mutate, "/loadcase/mass").param("load_case", load_case.as_str()))
    }

    /// Set the factor of `load_case` inside `combination`. Calling again
    /// overwrites the factor.
    pub fn set_combination(&self, combination: &LoadCaseId, load_case: &LoadCaseId, factor: f64) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("set_combination", OperationKind::Mutate, "/loadcase/combination")
                .param("combination", combination.as_str())
                .param("load_case", load_case.as_str())
                .param("factor", factor),
        )
    }

    pub fn add_nodal_load(&self, load: &NodalLoad) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("add_nodal_load", OperationKind::Create, "/load/nodal")
                .param("node", load.node.as_str())
                .param("value", load.value)
                .param("direction", load.direction.code())
                .param("load_case", load.load_case.as_str())
                .param("local", load.local),
        )
    }

    pub fn add_beam_uniform_load(&self, load: &BeamUniformLoad) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("add_beam_uniform_load", OperationKind::Create, "/load/beam/uniform")
                .param("element", load.element.as_str())
                .param("value", load.value)
                .param("direction", load.direction.code())
                .param("load_case", load.load_case.as_str())
                .param("local", load.local),
        )
    }

    pub fn add_beam_distributed_load(&self, load: &BeamDistributedLoad) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("add_beam_distributed_load", OperationKind::Create, "/load/beam/distributed")
                .param("element", load.element.as_str())
                .param("values", load.values.clone())
                .param("positions", load.positions.values().to_vec())
                .param("absolute", load.positions.is_absolute())
                .param("direction", load.direction.code())
                .param("load_case", load.load_case.as_str())
                .param("local", load.local),
        )
    }

    pub fn add_surface_load(&self, load: &SurfaceLoad) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("add_surface_load", OperationKind::Create, "/load/surface")
                .param("element", load.element.as_str())
                .param("values", load.values.clone())
                .param("direction", load.direction.code())
                .param("load_case", load.load_case.as_str())
                .param("local", load.local),
        )
    }

    pub fn add_thermal_load(&self, load: &ThermalLoad) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("add_thermal_load", OperationKind::Create, "/load/thermal")
                .param("element", load.element.as_str())
                .param("values", vec![load.uniform, load.gradient_z, load.gradient_y])
                .param("load_case", load.load_case.as_str()),
        )
    }
}
