//! Result queries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ClientResult, OperationKind};
use crate::ids::{ElementId, LoadCaseId};
use crate::protocol::ApiRequest;
use crate::session::Session;
use crate::transport::Transport;

/// Default result time step for static load cases
pub const DEFAULT_TIME: &str = "1";

/// Beam internal force component, in element axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceComponent {
    /// Axial force
    N = 1,
    /// Shear along local y
    Vy = 2,
    /// Shear along local z
    Vz = 3,
    /// Torsion
    Mt = 4,
    /// Bending about local y
    My = 5,
    /// Bending about local z
    Mz = 6,
}

impl ForceComponent {
    pub const ALL: [ForceComponent; 6] = [
        ForceComponent::N,
        ForceComponent::Vy,
        ForceComponent::Vz,
        ForceComponent::Mt,
        ForceComponent::My,
        ForceComponent::Mz,
    ];

    /// Wire code (1-6)
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ForceComponent::N => "N",
            ForceComponent::Vy => "Vy",
            ForceComponent::Vz => "Vz",
            ForceComponent::Mt => "Mt",
            ForceComponent::My => "My",
            ForceComponent::Mz => "Mz",
        }
    }

    /// Parse a symbol (`"Mz"`) or a wire code (`"6"`)
    pub fn parse(text: &str) -> Option<ForceComponent> {
        let text = text.trim();
        ForceComponent::ALL
            .iter()
            .copied()
            .find(|c| c.symbol().eq_ignore_ascii_case(text) || c.code().to_string() == text)
    }
}

impl fmt::Display for ForceComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Internal force of one beam at one output station.
///
/// Stations are the application's output points along the element,
/// numbered from 1 at the first node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamForceQuery {
    pub element: ElementId,
    pub load_case: LoadCaseId,
    /// Time step; "1" for static cases. Default: "1"
    pub time: String,
    pub component: ForceComponent,
    pub station: u32,
}

impl BeamForceQuery {
    pub fn new(element: ElementId, load_case: impl Into<LoadCaseId>, component: ForceComponent, station: u32) -> Self {
        BeamForceQuery {
            element,
            load_case: load_case.into(),
            time: DEFAULT_TIME.to_string(),
            component,
            station,
        }
    }

    pub fn at_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }
}

impl<T: Transport> Session<T> {
    /// Internal force at a station, in the session's units.
    ///
    /// # Errors
    ///
    /// An unknown load case, time or station is reported by the application
    /// as a query failure (`ClientError::is_query_failure`).
    pub fn beam_force(&self, query: &BeamForceQuery) -> ClientResult<f64> {
        let request = ApiRequest::new("beam_force", OperationKind::Query, "/result/beam-force")
            .param("element", query.element.as_str())
            .param("load_case", query.load_case.as_str())
            .param("time", query.time.as_str())
            .param("component", query.component.code())
            .param("station", query.station);
        self.call(&request)?.into_f64(&request)
    }
}
