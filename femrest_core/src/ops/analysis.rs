//! Analysis setup and the blocking solve.

use crate::errors::{ClientResult, OperationKind};
use crate::ids::LoadCaseId;
use crate::protocol::ApiRequest;
use crate::session::Session;
use crate::transport::Transport;

impl<T: Transport> Session<T> {
    /// Make `load_case` a modal analysis extracting `modes` modes.
    pub fn set_modal_analysis(&self, load_case: &LoadCaseId, modes: u32) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("set_modal_analysis", OperationKind::Solve, "/analysis/modal")
                .param("load_case", load_case.as_str())
                .param("modes", modes),
        )
    }

    /// Solve `load_case` with second-order (P-Delta) effects.
    pub fn set_pdelta_analysis(&self, load_case: &LoadCaseId) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("set_pdelta_analysis", OperationKind::Solve, "/analysis/pdelta").param("load_case", load_case.as_str()),
        )
    }

    /// Run every analysis defined in the model.
    ///
    /// Blocks until the application finishes or reports failure. Nothing
    /// reports progress in between.
    pub fn run_model(&self) -> ClientResult<()> {
        self.solve(ApiRequest::new("run_model", OperationKind::Solve, "/analysis/run"))
    }
}
