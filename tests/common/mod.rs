//! Shared helpers for the integration tests

#![allow(dead_code)]

use genomic_search::elastic::ElasticClient;
use std::io::{self, Cursor, Read};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Client pointed at a mock index service
pub fn client_for(server: &mockito::ServerGuard) -> ElasticClient {
    ElasticClient::new(server.url(), 5).unwrap()
}

pub fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Expected bulk body for `(id, document)` pairs
pub fn bulk_body(pairs: &[(u64, &str)]) -> String {
    pairs
        .iter()
        .map(|(id, doc)| format!("{{\"index\": {{\"_id\": \"{}\"}}}}\n{}\n", id, doc))
        .collect()
}

/// Reader that yields `data` and then fails instead of reporting EOF
pub struct FailingReader {
    data: Cursor<Vec<u8>>,
}

impl FailingReader {
    pub fn new(data: &str) -> Self {
        Self {
            data: Cursor::new(data.as_bytes().to_vec()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::Other, "stream interrupted")),
            n => Ok(n),
        }
    }
}

/// Server that reads each request and hangs up without answering
pub struct HangUpServer {
    url: String,
    requests: Arc<AtomicUsize>,
}

impl HangUpServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf);
            }
        });

        Self { url, requests }
    }

    pub fn client(&self) -> ElasticClient {
        ElasticClient::new(self.url.clone(), 5).unwrap()
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}
