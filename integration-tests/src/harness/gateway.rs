use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// A canned reply served by the [`FakeGateway`] for one path.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ScriptedResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200).body(body)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// What the fake gateway saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct GatewayState {
    responses: HashMap<String, ScriptedResponse>,
    requests: Vec<RecordedRequest>,
}

/// Minimal HTTP/1.1 upstream on a std `TcpListener`.
///
/// Paths without a scripted response get `404 not found`. Every reply closes the connection.
pub struct FakeGateway {
    port: u16,
    state: Arc<Mutex<GatewayState>>,
}

impl FakeGateway {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind fake gateway");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(GatewayState::default()));

        thread::spawn({
            let state = state.clone();
            move || {
                for stream in listener.incoming() {
                    let Ok(stream) = stream else { continue };
                    let state = state.clone();
                    thread::spawn(move || handle_connection(stream, &state));
                }
            }
        });

        Self { port, state }
    }

    /// Scripts the reply for `path` (query string excluded).
    pub fn respond(&self, path: &str, response: ScriptedResponse) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(path.to_string(), response);
        self
    }

    pub fn origin(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

fn handle_connection(stream: TcpStream, state: &Mutex<GatewayState>) {
    let Some(request) = read_request(&stream) else {
        return;
    };

    let path = request
        .path
        .split('?')
        .next()
        .unwrap_or_default()
        .to_string();

    let response = {
        let mut state = state.lock().unwrap();
        state.requests.push(request.clone());
        state
            .responses
            .get(&path)
            .cloned()
            .unwrap_or_else(|| ScriptedResponse::new(404).body("not found"))
    };

    let _ = write_response(stream, &response, request.method == "HEAD");
}

fn read_request(stream: &TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    Some(RecordedRequest {
        method,
        path,
        headers,
    })
}

fn write_response(
    mut stream: TcpStream,
    response: &ScriptedResponse,
    head: bool,
) -> std::io::Result<()> {
    let reason = reqwest::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");

    let mut out = format!("HTTP/1.1 {} {}\r\n", response.status, reason);
    for (name, value) in &response.headers {
        out.push_str(&format!("{name}: {value}\r\n"));
    }
    let has_length = response
        .headers
        .iter()
        .any(|(k, _)| k.eq_ignore_ascii_case("content-length"));
    if !has_length {
        out.push_str(&format!("Content-Length: {}\r\n", response.body.len()));
    }
    out.push_str("Connection: close\r\n\r\n");

    stream.write_all(out.as_bytes())?;
    if !head {
        stream.write_all(&response.body)?;
    }
    stream.flush()
}
