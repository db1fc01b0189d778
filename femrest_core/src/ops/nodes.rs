//! Nodes and boundary conditions.

use serde::{Deserialize, Serialize};

use crate::errors::{ClientResult, OperationKind};
use crate::ids::NodeId;
use crate::protocol::ApiRequest;
use crate::session::Session;
use crate::transport::Transport;

/// Restrained degrees of freedom at a node. `true` means blocked.
///
/// # Example
///
/// ```rust
/// use femrest_core::ops::Restraints;
///
/// // Fully fixed except rotation about the out-of-plane (Y) axis
/// let support = Restraints::fixed().with_ry(false);
/// assert!(support.ux && support.rz);
/// assert!(!support.ry);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Restraints {
    pub ux: bool,
    pub uy: bool,
    pub uz: bool,
    pub rx: bool,
    pub ry: bool,
    pub rz: bool,
}

impl Restraints {
    pub fn new(ux: bool, uy: bool, uz: bool, rx: bool, ry: bool, rz: bool) -> Self {
        Restraints { ux, uy, uz, rx, ry, rz }
    }

    /// All six degrees of freedom blocked
    pub fn fixed() -> Self {
        Restraints::new(true, true, true, true, true, true)
    }

    /// Nothing blocked
    pub fn free() -> Self {
        Restraints::default()
    }

    /// Translations blocked, rotations free
    pub fn pinned() -> Self {
        Restraints::new(true, true, true, false, false, false)
    }

    pub fn with_ux(mut self, blocked: bool) -> Self {
        self.ux = blocked;
        self
    }

    pub fn with_uy(mut self, blocked: bool) -> Self {
        self.uy = blocked;
        self
    }

    pub fn with_uz(mut self, blocked: bool) -> Self {
        self.uz = blocked;
        self
    }

    pub fn with_rx(mut self, blocked: bool) -> Self {
        self.rx = blocked;
        self
    }

    pub fn with_ry(mut self, blocked: bool) -> Self {
        self.ry = blocked;
        self
    }

    pub fn with_rz(mut self, blocked: bool) -> Self {
        self.rz = blocked;
        self
    }

    pub fn as_array(&self) -> [bool; 6] {
        [self.ux, self.uy, self.uz, self.rx, self.ry, self.rz]
    }

    pub fn from_array(flags: [bool; 6]) -> Self {
        let [ux, uy, uz, rx, ry, rz] = flags;
        Restraints { ux, uy, uz, rx, ry, rz }
    }

    pub fn is_free(&self) -> bool {
        self.as_array().iter().all(|blocked| !blocked)
    }
}

impl<T: Transport> Session<T> {
    /// Create a node at `(x, y, z)` in the session's length unit.
    pub fn add_node(&self, x: f64, y: f64, z: f64) -> ClientResult<NodeId> {
        self.create(
            ApiRequest::new("add_node", OperationKind::Create, "/node/add")
                .param("x", x)
                .param("y", y)
                .param("z", z),
        )
        .map(NodeId::from)
    }

    pub fn node_coordinates(&self, node: &NodeId) -> ClientResult<[f64; 3]> {
        let request = ApiRequest::new("node_coordinates", OperationKind::Query, "/node/coordinates").param("node", node.as_str());
        self.call(&request)?.into_numbers(&request)
    }

    pub fn nodes_list(&self) -> ClientResult<Vec<NodeId>> {
        let request = ApiRequest::new("nodes_list", OperationKind::Query, "/node/list");
        let ids = self.call(&request)?.into_ids(&request)?;
        Ok(ids.into_iter().map(NodeId::from).collect())
    }

    pub fn nodes_count(&self) -> ClientResult<usize> {
        let request = ApiRequest::new("nodes_count", OperationKind::Query, "/node/count");
        self.call(&request)?.into_count(&request)
    }

    /// Set the restraints of `node`. Calling again overwrites.
    pub fn set_bc(&self, node: &NodeId, restraints: Restraints) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("set_bc", OperationKind::Mutate, "/node/bc/set")
                .param("node", node.as_str())
                .param("ux", restraints.ux)
                .param("uy", restraints.uy)
                .param("uz", restraints.uz)
                .param("rx", restraints.rx)
                .param("ry", restraints.ry)
                .param("rz", restraints.rz),
        )
    }

    /// Release every restraint of `node`.
    pub fn remove_bc(&self, node: &NodeId) -> ClientResult<()> {
        self.mutate(ApiRequest::new("remove_bc", OperationKind::Mutate, "/node/bc/remove").param("node", node.as_str()))
    }

    pub fn node_restraints(&self, node: &NodeId) -> ClientResult<Restraints> {
        let request = ApiRequest::new("node_restraints", OperationKind::Query, "/node/bc").param("node", node.as_str());
        let flags = self.call(&request)?.into_flags::<6>(&request)?;
        Ok(Restraints::from_array(flags))
    }
}
