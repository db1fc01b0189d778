//! # Model-Building Operations
//!
//! One method per domain verb, all on [`Session`](crate::Session):
//!
//! - [`model`] - new model, units, save/open, viewport refresh
//! - [`nodes`] - nodes and boundary conditions
//! - [`materials`] - isotropic and library materials
//! - [`sections`] - rectangular, circular, planar and library sections
//! - [`elements`] - beams, trusses, quads, springs, element properties
//! - [`mesh`] - server-side bulk geometry generation
//! - [`loads`] - load cases, loads and combinations
//! - [`analysis`] - modal/P-Delta setup and the blocking solve
//! - [`results`] - internal force queries

pub mod analysis;
pub mod elements;
pub mod loads;
pub mod materials;
pub mod mesh;
pub mod model;
pub mod nodes;
pub mod results;
pub mod sections;

pub use elements::SpringProperty;
pub use loads::{BeamDistributedLoad, BeamUniformLoad, Dof, NodalLoad, Positions, SurfaceLoad, ThermalLoad};
pub use materials::IsoMaterial;
pub use mesh::{MeshedWall, Plane};
pub use nodes::Restraints;
pub use results::{BeamForceQuery, ForceComponent};
