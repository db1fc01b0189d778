//! Cross sections.

use crate::errors::{ClientResult, OperationKind};
use crate::ids::{ElementId, SectionId};
use crate::protocol::{ApiRequest, PropertyValue};
use crate::session::Session;
use crate::transport::Transport;

impl<T: Transport> Session<T> {
    /// Solid rectangle, `lz` along the local z axis (width) and `ly` along
    /// the local y axis (depth).
    pub fn add_rect_section(&self, lz: f64, ly: f64) -> ClientResult<SectionId> {
        self.create(
            ApiRequest::new("add_rect_section", OperationKind::Create, "/section/add/rectangular")
                .param("lz", lz)
                .param("ly", ly),
        )
        .map(SectionId::from)
    }

    /// Solid circle.
    pub fn add_circ_section(&self, diameter: f64) -> ClientResult<SectionId> {
        self.create(ApiRequest::new("add_circ_section", OperationKind::Create, "/section/add/circular").param("diameter", diameter))
            .map(SectionId::from)
    }

    /// Plate/shell thickness for quads and meshed walls.
    pub fn add_planar_section(&self, thickness: f64) -> ClientResult<SectionId> {
        self.create(ApiRequest::new("add_planar_section", OperationKind::Create, "/section/add/planar").param("thickness", thickness))
            .map(SectionId::from)
    }

    /// Section from the application's profile library, e.g. `"w14x48"`.
    pub fn add_section_from_library(&self, name: &str) -> ClientResult<SectionId> {
        self.create(ApiRequest::new("add_section_from_library", OperationKind::Create, "/section/add/library").param("name", name))
            .map(SectionId::from)
    }

    /// Override one computed property, e.g. torsion constant `"Jt"`.
    pub fn set_section_property(&self, section: &SectionId, name: &str, value: f64) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("set_section_property", OperationKind::Mutate, "/section/property")
                .param("section", section.as_str())
                .param("name", name)
                .param("value", value),
        )
    }

    pub fn section_property(&self, section: &SectionId, name: &str) -> ClientResult<PropertyValue> {
        let request = ApiRequest::new("section_property", OperationKind::Query, "/section/property")
            .param("section", section.as_str())
            .param("name", name);
        Ok(self.call(&request)?.into_property())
    }

    pub fn assign_section_to_element(&self, element: &ElementId, section: &SectionId) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("assign_section_to_element", OperationKind::Mutate, "/element/section")
                .param("element", element.as_str())
                .param("section", section.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::protocol::{Method, RawReply};
    use crate::transport::mock::MockTransport;

    #[test]
    fn test_rect_section_dimensions() {
        let session = Session::with_transport(ClientConfig::default(), MockTransport::new().ok("\"1\""));
        let sec = session.add_rect_section(0.30, 0.40).unwrap();
        assert_eq!(sec, SectionId::from("1"));

        let request = session.transport().last();
        assert_eq!(request.get("lz"), Some(&json!(0.30)));
        assert_eq!(request.get("ly"), Some(&json!(0.40)));
    }

    #[test]
    fn test_negative_width_surfaces_application_error() {
        let session = Session::with_transport(
            ClientConfig::default(),
            MockTransport::new().reply(RawReply::new(400, "Section dimensions must be positive")),
        );
        let err = session.add_rect_section(-0.30, 0.40).unwrap_err();
        assert!(err.is_application());
        assert_eq!(err.error_code(), "APPLICATION_ERROR");
    }

    #[test]
    fn test_section_property_set_and_get_share_path() {
        let session = Session::with_transport(ClientConfig::default(), MockTransport::new().ok("True").ok("0"));
        let sec = SectionId::from("3");
        session.set_section_property(&sec, "Jt", 0.0).unwrap();
        assert_eq!(session.section_property(&sec, "Jt").unwrap().as_f64(), Some(0.0));

        let requests = session.transport().requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[1].method, Method::Get);
        assert_eq!(requests[0].path, requests[1].path);
    }
}
