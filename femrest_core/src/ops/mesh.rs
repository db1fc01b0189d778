//! Server-side bulk geometry generation.
//!
//! Each call here is one request; the application performs the whole
//! multi-step operation and answers with the complete, ordered list of
//! identifiers it produced.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ClientResult, OperationKind};
use crate::ids::{ElementId, NodeId};
use crate::protocol::ApiRequest;
use crate::session::Session;
use crate::transport::Transport;

/// Global plane a meshed wall lies in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plane::XY => "XY",
            Plane::XZ => "XZ",
            Plane::YZ => "YZ",
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rectangular wall or slab meshed into `div1 × div2` quads.
///
/// # Example
///
/// ```rust
/// use femrest_core::ops::{MeshedWall, Plane};
///
/// let slab = MeshedWall {
///     origin: [0.0, 0.0, 0.0],
///     plane: Plane::XY,
///     length: 27.0,
///     height: 27.0,
///     div1: 54,
///     div2: 54,
///     ..Default::default()
/// };
/// assert_eq!(slab.angle, 0.0);
/// assert!(!slab.horizontal);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshedWall {
    /// Wall number. Default: 1
    pub id: u32,
    pub origin: [f64; 3],
    pub plane: Plane,
    /// Extent along the first in-plane axis
    pub length: f64,
    /// Extent along the second in-plane axis
    pub height: f64,
    /// Divisions along `length`
    pub div1: u32,
    /// Divisions along `height`
    pub div2: u32,
    /// Rotation about the plane normal, degrees. Default: 0
    pub angle: f64,
    /// Tilt out of the plane, degrees. Default: 0
    pub tilt: f64,
    /// Offset applied to generated node numbering. Default: 0
    pub node_offset: u32,
    /// Generate as a horizontal slab. Default: false
    pub horizontal: bool,
}

impl Default for MeshedWall {
    fn default() -> Self {
        MeshedWall {
            id: 1,
            origin: [0.0; 3],
            plane: Plane::XZ,
            length: 1.0,
            height: 1.0,
            div1: 1,
            div2: 1,
            angle: 0.0,
            tilt: 0.0,
            node_offset: 0,
            horizontal: false,
        }
    }
}

impl<T: Transport> Session<T> {
    /// Split each line element at the given fractions of its length.
    ///
    /// `fractions` are cumulative, ending at 1.0: `[0.25, 0.5, 0.75, 1.0]`
    /// cuts a line into four equal parts.
    pub fn divide_line(&self, lines: &[ElementId], fractions: &[f64]) -> ClientResult<Vec<ElementId>> {
        let lines: Vec<&str> = lines.iter().map(ElementId::as_str).collect();
        let ids = self.generate(
            ApiRequest::new("divide_line", OperationKind::Generate, "/mesh/divide-line")
                .param("lines", lines)
                .param("fractions", fractions.to_vec()),
        )?;
        Ok(ids.into_iter().map(ElementId::from).collect())
    }

    /// Subdivide a quad into a `div_x × div_y` grid.
    pub fn divide_quad(&self, quad: &ElementId, div_x: u32, div_y: u32) -> ClientResult<Vec<ElementId>> {
        let ids = self.generate(
            ApiRequest::new("divide_quad", OperationKind::Generate, "/mesh/divide-quad")
                .param("quad", quad.as_str())
                .param("div_x", div_x)
                .param("div_y", div_y),
        )?;
        Ok(ids.into_iter().map(ElementId::from).collect())
    }

    /// Merge coincident nodes. Returns the identifiers of the nodes that
    /// were merged away.
    ///
    /// Without a tolerance the application uses its own.
    pub fn merge_overlapped_nodes(&self, tolerance: Option<f64>) -> ClientResult<Vec<NodeId>> {
        let ids = self.generate(
            ApiRequest::new("merge_overlapped_nodes", OperationKind::Generate, "/mesh/merge-nodes")
                .optional_param("tolerance", tolerance),
        )?;
        Ok(ids.into_iter().map(NodeId::from).collect())
    }

    /// Split line elements at mesh nodes lying on them so lines and
    /// surfaces share nodes. Returns the newly created line elements.
    pub fn check_line_elements(&self) -> ClientResult<Vec<ElementId>> {
        let ids = self.generate(ApiRequest::new("check_line_elements", OperationKind::Generate, "/mesh/check-lines"))?;
        Ok(ids.into_iter().map(ElementId::from).collect())
    }

    /// Generate a meshed wall. Returns the created quad elements.
    pub fn add_meshed_wall(&self, wall: &MeshedWall) -> ClientResult<Vec<ElementId>> {
        let ids = self.generate(
            ApiRequest::new("add_meshed_wall", OperationKind::Generate, "/mesh/wall")
                .param("id", wall.id)
                .param("origin", wall.origin.to_vec())
                .param("plane", wall.plane.as_str())
                .param("length", wall.length)
                .param("height", wall.height)
                .param("div1", wall.div1)
                .param("div2", wall.div2)
                .param("angle", wall.angle)
                .param("tilt", wall.tilt)
                .param("node_offset", wall.node_offset)
                .param("horizontal", wall.horizontal),
        )?;
        Ok(ids.into_iter().map(ElementId::from).collect())
    }
}
