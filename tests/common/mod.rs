//! Shared helpers for the integration tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use request_logger::logger::{CaptureBackend, Logger, LoggerConfig};

/// Logger that keeps every record in memory.
#[allow(dead_code)]
pub fn capture_logger(config: LoggerConfig) -> (Logger, CaptureBackend) {
    let backend = CaptureBackend::new();
    let logger = Logger::with_backend(config, Arc::new(backend.clone()));
    (logger, backend)
}

/// In-memory writer whose clones share one buffer.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl SharedBuf {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
