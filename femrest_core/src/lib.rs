//! # femrest_core - REST Client for a Running Structural-Analysis Application
//!
//! `femrest_core` drives an external finite-element application over its
//! local REST interface: build a model (nodes, sections, materials,
//! elements, restraints, loads), run the analysis, and read results back.
//! All computation happens inside the application; this crate only
//! marshals calls and replies.
//!
//! ## Design Philosophy
//!
//! - **One call, one request**: every session method is a single blocking
//!   round trip. No retries, no caching.
//! - **Explicit session**: the application's current model is addressed
//!   through a [`Session`] handle, never through globals.
//! - **Typed identifiers**: node, element, material and section tokens are
//!   distinct types.
//! - **Verbatim errors**: the application's rejection message is surfaced
//!   unchanged in [`ClientError::Application`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use femrest_core::{ClientConfig, Session};
//! use femrest_core::ops::{BeamForceQuery, BeamUniformLoad, Dof, ForceComponent, Restraints};
//! use femrest_core::units::{ForceUnit, LengthUnit};
//!
//! let mut session = Session::connect(ClientConfig::default())?;
//! session.new_model()?;
//! session.set_units(LengthUnit::Meter, ForceUnit::Kilonewton)?;
//!
//! let mat = session.add_material_from_library("C25/30")?;
//! let sec = session.add_rect_section(0.30, 0.40)?;
//! let n1 = session.add_node(0.0, 0.0, 0.0)?;
//! let n2 = session.add_node(5.0, 0.0, 0.0)?;
//! let beam = session.add_beam(&n1, &n2, &sec, &mat)?;
//!
//! let support = Restraints::fixed().with_ry(false);
//! session.set_bc(&n1, support)?;
//! session.set_bc(&n2, support.with_ux(false))?;
//!
//! let case = session.add_load_case("p")?;
//! session.add_beam_uniform_load(&BeamUniformLoad::new(beam.clone(), -10.0, Dof::Y, case.clone()))?;
//! session.run_model()?;
//!
//! let moment = session.beam_force(&BeamForceQuery::new(beam, case, ForceComponent::Mz, 3))?;
//! println!("Midspan moment: {:.2} kNm", moment);
//! # Ok::<(), femrest_core::ClientError>(())
//! ```
//!
//! ## Modules
//!
//! - [`session`] - The session handle
//! - [`ops`] - Model-building, analysis and query operations
//! - [`protocol`] - Request/reply marshaling
//! - [`transport`] - HTTP transport and the `Transport` seam
//! - [`config`] - Connection configuration (code, environment, JSON file)
//! - [`units`] - Unit selection
//! - [`ids`] - Typed entity identifiers
//! - [`errors`] - Structured error types

pub mod config;
pub mod errors;
pub mod ids;
pub mod ops;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use config::ClientConfig;
pub use errors::{ClientError, ClientResult, OperationKind};
pub use ids::{ElementId, LoadCaseId, MaterialId, NodeId, SectionId, SpringPropertyId};
pub use protocol::PropertyValue;
pub use session::Session;
pub use transport::{HttpTransport, Transport};
pub use units::{ForceUnit, LengthUnit, UnitSystem};
