//! In-process stand-in for the external analysis application.
//!
//! Serves the REST surface the client talks to with `rouille` on an
//! ephemeral local port. It keeps just enough model state to check that
//! identifiers, defaults and error replies flow through the client
//! correctly. The "solver" is the closed-form moment of a simply supported
//! beam under uniform load.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use femrest_core::{ClientConfig, Session};
use rouille::{Request, Response};
use serde_json::{json, Value};

/// Output stations per beam, numbered 1..=STATIONS from the first node
pub const STATIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub kind: &'static str,
    pub nodes: Vec<String>,
    pub section: Option<String>,
    pub material: Option<String>,
    pub props: HashMap<String, f64>,
}

#[derive(Debug, Clone)]
pub struct FakeMaterial {
    pub name: String,
    pub props: HashMap<String, f64>,
}

#[derive(Debug, Default)]
pub struct FakeModel {
    pub units: Option<(String, String)>,
    pub nodes: Vec<[f64; 3]>,
    pub restraints: HashMap<String, [bool; 6]>,
    pub materials: Vec<FakeMaterial>,
    pub sections: Vec<HashMap<String, f64>>,
    pub elements: Vec<FakeElement>,
    pub load_cases: Vec<String>,
    /// (element, load case, value)
    pub uniform_loads: Vec<(String, String, f64)>,
    pub solved: bool,
    /// Every path hit, in order
    pub log: Vec<String>,
}

impl FakeModel {
    fn node(&self, id: &str) -> Option<[f64; 3]> {
        index(id, self.nodes.len()).map(|i| self.nodes[i])
    }

    fn element(&self, id: &str) -> Option<&FakeElement> {
        index(id, self.elements.len()).map(|i| &self.elements[i])
    }

    fn material(&self, id: &str) -> Option<&FakeMaterial> {
        index(id, self.materials.len()).map(|i| &self.materials[i])
    }

    fn has_section(&self, id: &str) -> bool {
        index(id, self.sections.len()).is_some()
    }

    fn add_element(&mut self, element: FakeElement) -> String {
        self.elements.push(element);
        self.elements.len().to_string()
    }

    fn beam_length(&self, element: &FakeElement) -> Option<f64> {
        let a = self.node(element.nodes.first()?)?;
        let b = self.node(element.nodes.get(1)?)?;
        Some(((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2) + (b[2] - a[2]).powi(2)).sqrt())
    }
}

fn index(id: &str, len: usize) -> Option<usize> {
    id.trim().parse::<usize>().ok().filter(|&n| n >= 1 && n <= len).map(|n| n - 1)
}

fn library_material(name: &str) -> Option<FakeMaterial> {
    let props: &[(&str, f64)] = match name {
        "C25/30" => &[("E", 31_475_806.0), ("nu", 0.2), ("alphaT", 1e-5), ("Wden", 25.0)],
        "A36" => &[("E", 200_000_000.0), ("nu", 0.3), ("alphaT", 1.2e-5), ("Wden", 78.5)],
        _ => return None,
    };
    Some(FakeMaterial {
        name: name.to_string(),
        props: props.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
    })
}

/// A running fake application; stops when dropped.
pub struct FakeApp {
    pub model: Arc<Mutex<FakeModel>>,
    addr: SocketAddr,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl FakeApp {
    pub fn start() -> Self {
        Self::start_with_user(None)
    }

    /// Reject requests whose `user` header differs from `user`.
    pub fn start_with_user(user: Option<&str>) -> Self {
        let model = Arc::new(Mutex::new(FakeModel::default()));
        let shared = Arc::clone(&model);
        let user = user.map(str::to_string);

        let server = rouille::Server::new("127.0.0.1:0", move |request| {
            if let Some(expected) = &user {
                if request.header("user") != Some(expected.as_str()) {
                    return Response::text("Unauthorized user").with_status_code(401);
                }
            }
            let mut model = shared.lock().unwrap();
            model.log.push(request.url());
            handle(&mut model, request)
        })
        .expect("fake application should bind");

        let addr = server.server_addr();
        let (handle, stop) = server.stoppable();
        FakeApp {
            model,
            addr,
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.url()).with_timeout_secs(30)
    }

    pub fn session(&self) -> Session {
        Session::connect(self.config()).expect("valid config")
    }

    pub fn log(&self) -> Vec<String> {
        self.model.lock().unwrap().log.clone()
    }
}

impl Drop for FakeApp {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// ============================================================================
// Request handling
// ============================================================================

fn body(request: &Request) -> Value {
    rouille::input::json_input::<Value>(request).unwrap_or(Value::Null)
}

fn text(body: &Value, key: &str) -> String {
    match &body[key] {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn number(body: &Value, key: &str) -> f64 {
    body[key].as_f64().unwrap_or(f64::NAN)
}

fn param(request: &Request, key: &str) -> String {
    request.get_param(key).unwrap_or_default()
}

fn id(value: String) -> Response {
    Response::json(&Value::String(value))
}

fn ok() -> Response {
    Response::text("True")
}

fn not_found(what: &str) -> Response {
    Response::json(&json!({ "error": format!("{} not found", what), "code": 404 })).with_status_code(404)
}

fn bad_request(message: String) -> Response {
    Response::text(message).with_status_code(400)
}

fn handle(model: &mut FakeModel, request: &Request) -> Response {
    rouille::router!(request,
        (POST) ["/model/new"] => {
            let log = std::mem::take(&mut model.log);
            *model = FakeModel { log, ..Default::default() };
            ok()
        },
        (POST) ["/model/units"] => {
            let body = body(request);
            model.units = Some((text(&body, "length"), text(&body, "force")));
            ok()
        },
        (POST) ["/model/save"] => {
            let body = body(request);
            Response::json(&json!(text(&body, "path")))
        },
        (POST) ["/view/refresh"] => { ok() },

        (POST) ["/node/add"] => {
            let body = body(request);
            let xyz = [number(&body, "x"), number(&body, "y"), number(&body, "z")];
            if model.nodes.iter().any(|n| n == &xyz) {
                return bad_request(format!("Duplicate node at ({};{};{})", xyz[0], xyz[1], xyz[2]));
            }
            model.nodes.push(xyz);
            id(model.nodes.len().to_string())
        },
        (GET) ["/node/coordinates"] => {
            let node = param(request, "node");
            match model.node(&node) {
                Some(xyz) => Response::json(&json!(xyz)),
                None => not_found(&format!("Node {}", node)),
            }
        },
        (GET) ["/node/count"] => { Response::text(model.nodes.len().to_string()) },
        (GET) ["/node/list"] => {
            let ids: Vec<String> = (1..=model.nodes.len()).map(|i| i.to_string()).collect();
            Response::json(&ids)
        },
        (POST) ["/node/bc/set"] => {
            let body = body(request);
            let node = text(&body, "node");
            if model.node(&node).is_none() {
                return not_found(&format!("Node {}", node));
            }
            let flags = ["ux", "uy", "uz", "rx", "ry", "rz"].map(|k| body[k].as_bool().unwrap_or(false));
            model.restraints.insert(node, flags);
            ok()
        },
        (POST) ["/node/bc/remove"] => {
            let body = body(request);
            let node = text(&body, "node");
            if model.node(&node).is_none() {
                return not_found(&format!("Node {}", node));
            }
            model.restraints.remove(&node);
            ok()
        },
        (GET) ["/node/bc"] => {
            let node = param(request, "node");
            if model.node(&node).is_none() {
                return not_found(&format!("Node {}", node));
            }
            Response::json(&model.restraints.get(&node).copied().unwrap_or([false; 6]))
        },

        (POST) ["/material/add/library"] => {
            let body = body(request);
            let name = text(&body, "name");
            match library_material(&name) {
                Some(material) => {
                    model.materials.push(material);
                    Response::json(&json!(model.materials.len()))
                }
                None => not_found(&format!("Library material '{}'", name)),
            }
        },
        (POST) ["/material/add/isotropic"] => {
            let body = body(request);
            let props = [
                ("E", "e"),
                ("nu", "nu"),
                ("Wden", "weight_density"),
                ("alphaT", "thermal_expansion"),
                ("fk", "strength"),
            ]
                .iter()
                .map(|(prop, key)| (prop.to_string(), number(&body, key)))
                .collect();
            model.materials.push(FakeMaterial { name: text(&body, "name"), props });
            Response::json(&json!(model.materials.len()))
        },
        (GET) ["/material/property"] => {
            let material = param(request, "material");
            let name = param(request, "name");
            let Some(found) = model.material(&material) else {
                return not_found(&format!("Material {}", material));
            };
            if name == "name" {
                return Response::text(found.name.clone());
            }
            match found.props.get(&name) {
                Some(value) => Response::json(&json!(value)),
                None => bad_request(format!("Unknown material property '{}'", name)),
            }
        },

        (POST) ["/section/add/rectangular"] => {
            let body = body(request);
            let (lz, ly) = (number(&body, "lz"), number(&body, "ly"));
            if !(lz > 0.0 && ly > 0.0) {
                return bad_request("Section dimensions must be positive".to_string());
            }
            let props = [("Area", lz * ly), ("Jz", lz * ly.powi(3) / 12.0)]
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect();
            model.sections.push(props);
            id(model.sections.len().to_string())
        },
        (POST) ["/section/add/planar"] => {
            let body = body(request);
            let t = number(&body, "thickness");
            if !(t > 0.0) {
                return bad_request("Thickness must be positive".to_string());
            }
            model.sections.push([("t".to_string(), t)].into_iter().collect());
            id(model.sections.len().to_string())
        },

        (POST) ["/element/add/beam"] => {
            let body = body(request);
            let nodes: Vec<String> = body["nodes"]
                .as_array()
                .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
                .unwrap_or_default();
            if let Some(missing) = nodes.iter().find(|n| model.node(n).is_none()) {
                return not_found(&format!("Node {}", missing));
            }
            let section = text(&body, "section");
            if !model.has_section(&section) {
                return not_found(&format!("Section {}", section));
            }
            let material = text(&body, "material");
            if model.material(&material).is_none() {
                return not_found(&format!("Material {}", material));
            }
            let mut element = FakeElement {
                kind: "beam",
                nodes,
                section: Some(section),
                material: Some(material),
                props: HashMap::new(),
            };
            let length = model.beam_length(&element).unwrap_or(0.0);
            element.props.insert("lun".to_string(), length);
            id(model.add_element(element))
        },
        (GET) ["/element/property"] => {
            let element = param(request, "element");
            let name = param(request, "name");
            let Some(found) = model.element(&element) else {
                return not_found(&format!("Element {}", element));
            };
            match found.props.get(&name) {
                Some(value) => Response::json(&json!(value)),
                None => bad_request(format!("Unknown element property '{}'", name)),
            }
        },
        (GET) ["/element/count"] => { Response::json(&json!(model.elements.len())) },
        (GET) ["/element/list"] => {
            let ids: Vec<usize> = (1..=model.elements.len()).collect();
            Response::json(&ids)
        },
        (POST) ["/element/material"] => {
            let body = body(request);
            let (element, material) = (text(&body, "element"), text(&body, "material"));
            if model.material(&material).is_none() {
                return not_found(&format!("Material {}", material));
            }
            match index(&element, model.elements.len()) {
                Some(i) => {
                    model.elements[i].material = Some(material);
                    ok()
                }
                None => Response::text("False"),
            }
        },

        (POST) ["/mesh/wall"] => {
            let body = body(request);
            let (div1, div2) = (body["div1"].as_u64().unwrap_or(0), body["div2"].as_u64().unwrap_or(0));
            if div1 == 0 || div2 == 0 {
                return bad_request("Divisions must be at least 1".to_string());
            }
            let mut ids = Vec::new();
            for _ in 0..div1 * div2 {
                let props = [("angle", number(&body, "angle")), ("tilt", number(&body, "tilt"))]
                    .iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect();
                ids.push(model.add_element(FakeElement {
                    kind: "quad",
                    nodes: Vec::new(),
                    section: None,
                    material: None,
                    props,
                }));
            }
            Response::json(&ids)
        },

        (POST) ["/loadcase/add"] => {
            let body = body(request);
            let name = text(&body, "name");
            if model.load_cases.contains(&name) {
                return bad_request(format!("Load case '{}' already exists", name));
            }
            model.load_cases.push(name);
            ok()
        },
        (POST) ["/load/beam/uniform"] => {
            let body = body(request);
            let (element, load_case) = (text(&body, "element"), text(&body, "load_case"));
            if model.element(&element).is_none() {
                return not_found(&format!("Element {}", element));
            }
            if !model.load_cases.contains(&load_case) {
                return not_found(&format!("Load case '{}'", load_case));
            }
            model.uniform_loads.push((element, load_case, number(&body, "value")));
            ok()
        },

        (POST) ["/analysis/run"] => {
            if model.restraints.values().all(|flags| flags.iter().all(|f| !f)) {
                return Response::json(&json!({ "error": "Structure is labile", "code": 7 }));
            }
            model.solved = true;
            ok()
        },
        (GET) ["/result/beam-force"] => { beam_force(model, request) },

        _ => Response::text("Unknown endpoint").with_status_code(404)
    )
}

/// Mz of a simply supported beam under the uniform loads of one case.
fn beam_force(model: &FakeModel, request: &Request) -> Response {
    if !model.solved {
        return bad_request("Model has not been solved".to_string());
    }
    let element = param(request, "element");
    let load_case = param(request, "load_case");
    let Some(found) = model.element(&element) else {
        return not_found(&format!("Element {}", element));
    };
    if !model.load_cases.contains(&load_case) {
        return not_found(&format!("Load case '{}'", load_case));
    }
    // Static cases only have the first time step
    let time = param(request, "time");
    if time != "1" {
        return bad_request(format!("Time step '{}' not available for '{}'", time, load_case));
    }
    let station: u32 = param(request, "station").parse().unwrap_or(0);
    if station < 1 || station > STATIONS {
        return bad_request(format!("Station {} not available", station));
    }
    let component: u32 = param(request, "component").parse().unwrap_or(0);

    let length = model.beam_length(found).unwrap_or(0.0);
    let q: f64 = model
        .uniform_loads
        .iter()
        .filter(|(e, lc, _)| *e == element && *lc == load_case)
        .map(|(_, _, value)| value)
        .sum();
    let x = length * f64::from(station - 1) / f64::from(STATIONS - 1);

    let value = match component {
        2 => q * (length / 2.0 - x),
        6 => q * x * (length - x) / 2.0,
        _ => 0.0,
    };
    Response::json(&json!(value))
}
