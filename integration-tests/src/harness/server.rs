use crate::harness::config::patch_runtime;
use crate::harness::{CapturedEvent, FakeGateway, init_test_tracing};
use cidway_core::conf::load_config_with_env;
use cidway_core::server::{build_pingora_server, build_runtime_state};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use std::net::TcpStream;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

const FIXTURE: &str = "cidway.hcl";

/// Handle to a running cidway test server.
pub struct TestServer {
    base_url: String,
    client: Client,
}

impl TestServer {
    /// Start cidway with both default gateways pointing at `gateway`.
    pub fn start(gateway: &FakeGateway) -> Self {
        let origin = gateway.origin();
        Self::start_with_gateways(&origin, &origin)
    }

    /// Start cidway from the fixture config with explicit default gateway origins.
    ///
    /// The listen port is allocated dynamically, so servers can run in parallel.
    pub fn start_with_gateways(ipfs_gateway: &str, grove_gateway: &str) -> Self {
        // Initialize tracing (this must happen first).
        init_test_tracing(events());

        // Allocate a free port for the server.
        let listen_port = free_port();

        let fixture = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("config")
            .join(FIXTURE);

        assert!(
            fixture.exists(),
            "fixture config does not exist: {:?}",
            fixture
        );

        // Never read the real environment: DEFAULT_GATEWAY must not leak into tests.
        let cfg = load_config_with_env(&fixture, |_| None).expect("failed to load fixture config");

        // patch config in memory (no copying, no temp dir)
        let cfg = patch_runtime(cfg, listen_port, ipfs_gateway, grove_gateway);

        let runtime_state = build_runtime_state(&cfg).expect("failed to build runtime state");

        let server = build_pingora_server(&cfg, Arc::new(runtime_state))
            .expect("failed to build cidway server");

        // Run server in background thread
        thread::spawn(move || {
            server.run_forever();
        });

        let base_url = format!("http://127.0.0.1:{listen_port}");

        // Wait for server to accept connections
        wait_for_server(&base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build client");

        Self { base_url, client }
    }

    /// Convenience helper for GET requests.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn head(&self, path: &str) -> RequestBuilder {
        self.request(Method::HEAD, path)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Poll until the server responds (or panic).
fn wait_for_server(listen_addr: &str) {
    let addr = listen_addr.strip_prefix("http://").unwrap_or(listen_addr);

    let deadline = Instant::now() + Duration::from_secs(5);

    loop {
        match TcpStream::connect(addr) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start at {}", listen_addr);
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}

/// Waits for a captured event matching `predicate`; the access log is emitted after the response.
pub fn wait_for_event<F>(predicate: F) -> Option<CapturedEvent>
where
    F: Fn(&CapturedEvent) -> bool,
{
    let deadline = Instant::now() + Duration::from_secs(2);

    loop {
        if let Some(found) = events().lock().unwrap().iter().find(|e| predicate(e)) {
            return Some(found.clone());
        }
        if Instant::now() > deadline {
            return None;
        }
        thread::sleep(Duration::from_millis(10));
    }
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
