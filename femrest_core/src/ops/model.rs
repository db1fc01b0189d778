//! Model lifecycle: reset, units, save/open and viewport refresh.
//!
//! These are thin pass-throughs. The saved file format belongs to the
//! external application; the client only hands over a path.

use std::path::Path;

use tracing::info;

use crate::errors::{ClientResult, OperationKind};
use crate::protocol::ApiRequest;
use crate::session::Session;
use crate::transport::Transport;
use crate::units::{ForceUnit, LengthUnit, UnitSystem};

impl<T: Transport> Session<T> {
    /// Clear the application's current model.
    ///
    /// The remembered unit pair is dropped along with the model.
    pub fn new_model(&mut self) -> ClientResult<()> {
        self.mutate(ApiRequest::new("new_model", OperationKind::Persist, "/model/new"))?;
        self.remember_units(None);
        info!("model cleared");
        Ok(())
    }

    /// Select the units every later number is interpreted in.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use femrest_core::{ClientConfig, Session};
    /// use femrest_core::units::{ForceUnit, LengthUnit};
    ///
    /// let mut session = Session::connect(ClientConfig::default()).unwrap();
    /// session.new_model().unwrap();
    /// session.set_units(LengthUnit::Meter, ForceUnit::Kilonewton).unwrap();
    /// ```
    pub fn set_units(&mut self, length: LengthUnit, force: ForceUnit) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("set_units", OperationKind::Mutate, "/model/units")
                .param("length", length.symbol())
                .param("force", force.symbol()),
        )?;
        self.remember_units(Some(UnitSystem::new(length, force)));
        Ok(())
    }

    /// Save the model to `path` on the application's machine.
    ///
    /// Returns the path the application reports having written.
    pub fn save_model(&self, path: impl AsRef<Path>) -> ClientResult<String> {
        let requested = path.as_ref().to_string_lossy().into_owned();
        let request = ApiRequest::new("save_model", OperationKind::Persist, "/model/save").param("path", requested.as_str());
        let payload = self.call(&request)?;
        let saved = payload.clone().into_accepted(&request).map(|_| payload.into_text())?;
        let saved = if saved.is_empty() || saved.eq_ignore_ascii_case("true") {
            requested
        } else {
            saved
        };
        info!(path = %saved, "model saved");
        Ok(saved)
    }

    /// Load a model file into the application, replacing the current one.
    pub fn open_model(&mut self, path: impl AsRef<Path>) -> ClientResult<()> {
        let path = path.as_ref().to_string_lossy().into_owned();
        self.mutate(ApiRequest::new("open_model", OperationKind::Persist, "/model/open").param("path", path.as_str()))?;
        self.remember_units(None);
        info!(%path, "model opened");
        Ok(())
    }

    /// Redraw the application's viewport `view`, optionally zooming to fit.
    pub fn refresh_designer_view(&self, view: u32, resize: bool) -> ClientResult<()> {
        self.mutate(
            ApiRequest::new("refresh_designer_view", OperationKind::Persist, "/view/refresh")
                .param("view", view)
                .param("resize", resize),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::config::ClientConfig;
    use crate::protocol::{Method, RawReply};
    use crate::session::Session;
    use crate::transport::mock::MockTransport;
    use crate::units::{ForceUnit, LengthUnit, UnitSystem};

    #[test]
    fn test_units_are_sent_and_remembered() {
        let mut session = Session::with_transport(ClientConfig::default(), MockTransport::new());
        session.set_units(LengthUnit::Meter, ForceUnit::Kilonewton).unwrap();

        let request = session.transport().last();
        assert_eq!(request.path, "/model/units");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.get("length"), Some(&json!("m")));
        assert_eq!(request.get("force"), Some(&json!("kN")));
        assert_eq!(session.units(), Some(UnitSystem::new(LengthUnit::Meter, ForceUnit::Kilonewton)));

        session.new_model().unwrap();
        assert_eq!(session.units(), None);
    }

    #[test]
    fn test_rejected_units_are_not_remembered() {
        let mut session = Session::with_transport(ClientConfig::default(), MockTransport::new().ok("False"));
        assert!(session.set_units(LengthUnit::Foot, ForceUnit::Kip).is_err());
        assert_eq!(session.units(), None);
    }

    #[test]
    fn test_save_returns_confirmed_path() {
        let session = Session::with_transport(
            ClientConfig::default(),
            MockTransport::new().ok("\"C:\\\\models\\\\beam.nxf\"").ok("True"),
        );
        assert_eq!(session.save_model("C:\\models\\beam.nxf").unwrap(), "C:\\models\\beam.nxf");
        // A bare acknowledgement falls back to the requested path
        assert_eq!(session.save_model("frame.nxf").unwrap(), "frame.nxf");
    }

    #[test]
    fn test_save_failure_carries_message() {
        let session = Session::with_transport(
            ClientConfig::default(),
            MockTransport::new().reply(RawReply::new(403, "Access to the path is denied")),
        );
        let err = session.save_model("/root/x.nxf").unwrap_err();
        assert_eq!(err.application_message(), Some("Access to the path is denied"));
    }

    #[test]
    fn test_refresh_params() {
        let session = Session::with_transport(ClientConfig::default(), MockTransport::new());
        session.refresh_designer_view(0, true).unwrap();
        let request = session.transport().last();
        assert_eq!(request.get("view"), Some(&json!(0)));
        assert_eq!(request.get("resize"), Some(&json!(true)));
    }
}
