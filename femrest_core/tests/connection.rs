//! Behaviour when the application is not reachable.

use std::net::TcpListener;

use femrest_core::ops::Restraints;
use femrest_core::{ClientConfig, ClientError, NodeId, Session};

/// A local port nothing is listening on
fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn unreachable_session() -> Session {
    let config = ClientConfig::new(format!("http://127.0.0.1:{}", closed_port())).with_connect_timeout_secs(2);
    Session::connect(config).unwrap()
}

#[test]
fn test_refused_create_is_connection_error() {
    let session = unreachable_session();
    let err = session.add_node(0.0, 0.0, 0.0).unwrap_err();
    assert!(err.is_connection(), "got {:?}", err);
    assert!(!err.is_application());
    assert_eq!(err.error_code(), "CONNECTION_ERROR");
}

#[test]
fn test_refused_mutation_and_query_are_connection_errors() {
    let session = unreachable_session();
    let node = NodeId::from("1");

    for err in [
        session.set_bc(&node, Restraints::fixed()).unwrap_err(),
        session.nodes_count().unwrap_err(),
        session.run_model().unwrap_err(),
    ] {
        assert!(matches!(err, ClientError::Connection { .. }), "got {:?}", err);
        assert!(err.is_recoverable());
    }
}

#[test]
fn test_connect_does_not_touch_the_network() {
    // Building the session succeeds even though nothing listens yet
    let session = unreachable_session();
    assert!(session.units().is_none());
}

#[test]
fn test_invalid_url_is_config_error() {
    let err = Session::connect(ClientConfig::new("gopher://localhost:5151")).err().unwrap();
    assert!(matches!(err, ClientError::Config { .. }));
}
