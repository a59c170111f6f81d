use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub url: String,
}

/// Local stand-in for `GET /vacancies`, answering every request with the same
/// status and body.
pub struct HhStub {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl HhStub {
    pub fn spawn(status: u16, body: impl Into<String>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start hh stub server");
        let base_url = format!("http://{}/vacancies", server.server_addr());
        let body = body.into();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_server = Arc::clone(&seen);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            seen_by_server
                .lock()
                .expect("stub mutex poisoned")
                .push(SeenRequest {
                    url: request.url().to_string(),
                });

            let _ = request.respond(
                tiny_http::Response::from_string(body.clone()).with_status_code(status),
            );
        });

        Self {
            base_url,
            seen,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("stub mutex poisoned").clone()
    }
}

impl Drop for HhStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
