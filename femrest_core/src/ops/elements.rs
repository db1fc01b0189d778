//! Line, surface and spring elements.

use serde::{Deserialize, Serialize};

use crate::errors::{ClientResult, OperationKind};
use crate::ids::{ElementId, MaterialId, NodeId, SectionId, SpringPropertyId};
use crate::protocol::{ApiRequest, PropertyValue};
use crate::session::Session;
use crate::transport::Transport;

/// Six-component linear spring.
///
/// Stiffnesses are in the session's force/length units; rotational terms
/// per radian.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpringProperty {
    pub name: String,
    pub kx: f64,
    pub ky: f64,
    pub kz: f64,
    pub krx: f64,
    pub kry: f64,
    pub krz: f64,
    /// Stiffnesses refer to the local axes. Default: false (global)
    pub local: bool,
}

impl SpringProperty {
    /// Spring with every stiffness zero
    pub fn new(name: impl Into<String>) -> Self {
        SpringProperty {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Translational stiffnesses
    pub fn with_translation(mut self, kx: f64, ky: f64, kz: f64) -> Self {
        self.kx = kx;
        self.ky = ky;
        self.kz = kz;
        self
    }

    /// Rotational stiffnesses
    pub fn with_rotation(mut self, krx: f64, kry: f64, krz: f64) -> Self {
        self.krx = krx;
        self.kry = kry;
        self.krz = krz;
        self
    }

    pub fn local(mut self) -> Self {
        self.local = true;
        self
    }
}

impl<T: Transport> Session<T> {
    fn add_line_element(
        &self,
        operation: &'static str,
        path: &'static str,
        n1: &NodeId,
        n2: &NodeId,
        section: &SectionId,
        material: &MaterialId,
    ) -> ClientResult<ElementId> {
        self.create(
            ApiRequest::new(operation, OperationKind::Create, path)
                .param("nodes", vec![n1.as_str(), n2.as_str()])
                .param("section", section.as_str())
                .param("material", material.as_str()),
        )
        .map(ElementId::from)
    }

    /// Frame element between two existing nodes.
    pub fn add_beam(&self, n1: &NodeId, n2: &NodeId, section: &SectionId, material: &MaterialId) -> ClientResult<ElementId> {
        self.add_line_element("add_beam", "/element/add/beam", n1, n2, section, material)
    }

    /// Axial-only element between two existing nodes.
    pub fn add_truss(&self, n1: &NodeId, n2: &NodeId, section: &SectionId, material: &MaterialId) -> ClientResult<ElementId> {
        self.add_line_element("add_truss", "/element/add/truss", n1, n2, section, material)
    }

    /// Four-node shell element; corners in perimeter order.
    ///
    /// Section and material may be assigned later with
    /// [`assign_section_to_element`](Session::assign_section_to_element) and
    /// [`assign_material_to_element`](Session::assign_material_to_element).
    pub fn add_quad(
        &self,
        corners: [&NodeId; 4],
        section: Option<&SectionId>,
        material: Option<&MaterialId>,
    ) -> ClientResult<ElementId> {
        let nodes: Vec<&str> = corners.iter().map(|node| node.as_str()).collect();
        self.create(
            ApiRequest::new("add_quad", OperationKind::Create, "/element/add/quad")
                .param("nodes", nodes)
                .optional_param("section", section.map(SectionId::as_str))
                .optional_param("material", material.map(MaterialId::as_str)),
        )
        .map(ElementId::from)
    }

    /// Read an element property such as its length `"lun"`.
    pub fn element_property(&self, element: &ElementId, name: &str) -> ClientResult<PropertyValue> {
        let request = ApiRequest::new("element_property", OperationKind::Query, "/element/property")
            .param("element", element.as_str())
            .param("name", name);
        Ok(self.call(&request)?.into_property())
    }

    pub fn elements_list(&self) -> ClientResult<Vec<ElementId>> {
        let request = ApiRequest::new("elements_list", OperationKind::Query, "/element/list");
        let ids = self.call(&request)?.into_ids(&request)?;
        Ok(ids.into_iter().map(ElementId::from).collect())
    }

    pub fn elements_count(&self) -> ClientResult<usize> {
        let request = ApiRequest::new("elements_count", OperationKind::Query, "/element/count");
        self.call(&request)?.into_count(&request)
    }

    pub fn add_spring_property(&self, spring: &SpringProperty) -> ClientResult<SpringPropertyId> {
        self.create(
            ApiRequest::new("add_spring_property", OperationKind::Create, "/spring/add")
                .param("name", spring.name.as_str())
                .param("kx", spring.kx)
                .param("ky", spring.ky)
                .param("kz", spring.kz)
                .param("krx", spring.krx)
                .param("kry", spring.kry)
                .param("krz", spring.krz)
                .param("local", spring.local),
        )
        .map(SpringPropertyId::from)
    }

    /// Attach a grounded spring with `property` to `node`.
    pub fn add_nodal_spring(&self, node: &NodeId, property: &SpringPropertyId) -> ClientResult<ElementId> {
        self.create(
            ApiRequest::new("add_nodal_spring", OperationKind::Create, "/spring/nodal")
                .param("node", node.as_str())
                .param("property", property.as_str()),
        )
        .map(ElementId::from)
    }
}
