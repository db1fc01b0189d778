//! Materials.

use serde::{Deserialize, Serialize};

use crate::errors::{ClientResult, OperationKind};
use crate::ids::{ElementId, MaterialId};
use crate::protocol::{ApiRequest, PropertyValue};
use crate::session::Session;
use crate::transport::Transport;

/// Default coefficient of thermal expansion (1/°C), typical of concrete and steel
pub const DEFAULT_THERMAL_EXPANSION: f64 = 1.0e-5;

/// Linear-elastic isotropic material.
///
/// `e` and `weight_density` are in the session's force/length units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsoMaterial {
    pub name: String,
    /// Young's modulus
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Weight per unit volume
    pub weight_density: f64,
    /// Coefficient of thermal expansion. Default: 1e-5
    pub thermal_expansion: f64,
    /// Characteristic strength, 0 when not used. Default: 0
    pub strength: f64,
}

impl IsoMaterial {
    pub fn new(name: impl Into<String>, e: f64, nu: f64, weight_density: f64) -> Self {
        IsoMaterial {
            name: name.into(),
            e,
            nu,
            weight_density,
            thermal_expansion: DEFAULT_THERMAL_EXPANSION,
            strength: 0.0,
        }
    }

    pub fn with_thermal_expansion(mut self, alpha: f64) -> Self {
        self.thermal_expansion = alpha;
        self
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }
}

impl<T: Transport> Session<T> {
    pub fn add_iso_material(&self, material: &IsoMaterial) -> ClientResult<MaterialId> {
        self.create(
            ApiRequest::new("add_iso_material", OperationKind::Create, "/material/add/isotropic")
                .param("name", material.name.as_str())
                .param("e", material.e)
                .param("nu", material.nu)
                .param("weight_density", material.weight_density)
                .param("thermal_expansion", material.thermal_expansion)
                .param("strength", material.strength),
        )
        .map(MaterialId::from)
    }

    /// Create a material from the application's library, e.g. `"C25/30"` or
    /// `"A36"`.
    pub fn add_material_from_library(&self, name: &str) -> ClientResult<MaterialId> {
        self.create(ApiRequest::new("add_material_from_library", OperationKind::Create, "/material/add/library").param("name", name))
            .map(MaterialId::from)
    }

    /// Read a material property such as `"E"` or `"alphaT"`.
    pub fn material_property(&self, material: &MaterialId, name: &str) -> ClientResult<PropertyValue> {
        let request = ApiRequest::new("material_property", OperationKind::Query, "/material/property")
            .param("material", material.as_str())
            .param("name", name);
        Ok(self.call(&request)?.into_property())
    }

    pub fn assign_material_to_element(&self, element: &ElementId, material: &MaterialId) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("assign_material_to_element", OperationKind::Mutate, "/element/material")
                .param("element", element.as_str())
                .param("material", material.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::protocol::RawReply;
    use crate::transport::mock::MockTransport;

    #[test]
    fn test_iso_material_defaults_are_sent() {
        let session = Session::with_transport(ClientConfig::default(), MockTransport::new().ok("1"));
        let id = session
            .add_iso_material(&IsoMaterial::new("concrete", 30e6, 0.2, 25.0))
            .unwrap();
        assert_eq!(id.as_str(), "1");

        let request = session.transport().last();
        assert_eq!(request.get("thermal_expansion"), Some(&json!(1.0e-5)));
        assert_eq!(request.get("strength"), Some(&json!(0.0)));
        assert_eq!(request.get("e"), Some(&json!(30e6)));
    }

    #[test]
    fn test_unknown_material_query_fails_with_message() {
        let session = Session::with_transport(
            ClientConfig::default(),
            MockTransport::new().reply(RawReply::new(404, "{\"error\":\"Material 42 not found\"}")),
        );
        let err = session.material_property(&MaterialId::from("42"), "E").unwrap_err();
        assert!(err.is_query_failure());
        assert_eq!(err.application_message(), Some("Material 42 not found"));
    }

    #[test]
    fn test_property_is_numeric_when_possible() {
        let session = Session::with_transport(ClientConfig::default(), MockTransport::new().ok("\"31475806\""));
        let value = session.material_property(&MaterialId::from("1"), "E").unwrap();
        assert_eq!(value.as_f64(), Some(31_475_806.0));
    }
}
