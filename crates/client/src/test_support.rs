use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::{Health, Product, ProductInput};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

use crate::api::ProductApi;
use crate::errors::TransportError;

const BASE_URL: &str = "http://catalog.test";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Health,
    List,
    Create(ProductInput),
    Update(i32, ProductInput),
    Delete(i32),
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    products: Vec<Product>,
    last_id: i32,
    health_failures: u32,
}

/// In-memory [`ProductApi`] that records every call.
#[derive(Default)]
pub struct RecordingApi {
    state: Mutex<State>,
    health_status: Option<String>,
    broken: bool,
}

impl RecordingApi {
    /// The first `n` health checks fail with a refused connection.
    pub fn with_health_failures(self, n: u32) -> Self {
        self.state.lock().unwrap().health_failures = n;
        self
    }

    pub fn with_health_status(mut self, status: &str) -> Self {
        self.health_status = Some(status.to_string());
        self
    }

    /// Every product call answers with HTTP 500.
    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.last_id = products.iter().map(|p| p.id).max().unwrap_or(0);
            state.products = products;
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls other than health checks.
    pub fn product_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| *c != Call::Health).collect()
    }

    pub fn products(&self) -> Vec<Product> {
        self.state.lock().unwrap().products.clone()
    }

    fn record(&self, call: Call) -> Result<(), TransportError> {
        self.state.lock().unwrap().calls.push(call);
        if self.broken {
            return Err(TransportError::Status { url: format!("{BASE_URL}/products"), status: 500 });
        }
        Ok(())
    }
}

#[async_trait]
impl ProductApi for RecordingApi {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn health(&self) -> Result<Health, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Health);
        if state.health_failures > 0 {
            state.health_failures -= 1;
            return Err(TransportError::Connect {
                url: format!("{BASE_URL}/health"),
                message: "connection refused".into(),
            });
        }
        Ok(match &self.health_status {
            Some(status) => Health { status: status.clone() },
            None => Health::up(),
        })
    }

    async fn list(&self) -> Result<Vec<Product>, TransportError> {
        self.record(Call::List)?;
        Ok(self.products())
    }

    async fn create(&self, input: &ProductInput) -> Result<Product, TransportError> {
        self.record(Call::Create(input.clone()))?;
        let mut state = self.state.lock().unwrap();
        state.last_id += 1;
        let product = Product {
            id: state.last_id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, input: &ProductInput) -> Result<ProductInput, TransportError> {
        self.record(Call::Update(id, input.clone()))?;
        let mut state = self.state.lock().unwrap();
        for p in state.products.iter_mut().filter(|p| p.id == id) {
            *p = p.with_input(input);
        }
        Ok(input.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), TransportError> {
        self.record(Call::Delete(id))?;
        self.state.lock().unwrap().products.retain(|p| p.id != id);
        Ok(())
    }
}

/// In-memory sink for console logging.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Install, for the current thread, the console subscriber the client
/// binary uses, filtered at `level`.
pub fn capture_console(level: &str) -> (DefaultGuard, CapturedLogs) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (tracing::subscriber::set_default(subscriber), logs)
}
