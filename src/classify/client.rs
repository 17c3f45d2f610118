//! Client for the hand-shape classification service.

use crate::hand::{LandmarkFrame, Letter};
use crate::integration::config::ClassifyConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Serialize)]
struct PredictRequest {
    landmarks: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    letter: Option<String>,
}

/// Issues `POST /predict` requests against the classification service.
///
/// Every failure path resolves to `None` — callers treat `None` as "no
/// usable prediction this round" and never retry. The blocking call is only
/// ever made from the classifier worker thread.
pub struct ClassifyClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl ClassifyClient {
    pub fn new(config: &ClassifyConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout(config.request_timeout)
            .build();

        Self {
            agent,
            endpoint: format!("{}/predict", config.base_url.trim_end_matches('/')),
        }
    }

    /// Classify one admitted hand frame.
    pub fn classify(&self, frame: &LandmarkFrame) -> Option<Letter> {
        let request = PredictRequest {
            landmarks: frame.flatten(),
        };

        let response = match self.agent.post(&self.endpoint).send_json(&request) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                warn!("Classification service returned status {}", code);
                return None;
            }
            Err(e) => {
                warn!("Classification request failed: {}", e);
                return None;
            }
        };

        let body: PredictResponse = match response.into_json() {
            Ok(body) => body,
            Err(e) => {
                warn!("Malformed classification response: {}", e);
                return None;
            }
        };

        let Some(letter) = body.letter else {
            warn!("Classification response missing letter field");
            return None;
        };

        match letter.parse() {
            Ok(letter) => Some(letter),
            Err(_) => {
                warn!("Service returned unrecognized letter {:?}", letter);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Landmark;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    fn frame() -> LandmarkFrame {
        LandmarkFrame::from_hand(&vec![Landmark::new(0.5, 0.5, 0.0); 21]).unwrap()
    }

    fn client_for(base_url: &str) -> ClassifyClient {
        ClassifyClient::new(&ClassifyConfig {
            base_url: base_url.to_string(),
            ..ClassifyConfig::default()
        })
    }

    /// Read one HTTP request fully (headers plus content-length body).
    fn read_request(stream: &mut TcpStream) {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            data.extend_from_slice(&buf[..n]);

            let Some(header_end) = data.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&data[..header_end]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    fn serve_once(status_line: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                read_request(&mut stream);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    #[test]
    fn parses_letter_from_success_response() {
        let url = serve_once("HTTP/1.1 200 OK", r#"{"letter": "A"}"#);
        assert_eq!(client_for(&url).classify(&frame()), Some(Letter::A));
    }

    #[test]
    fn server_error_resolves_to_none() {
        let url = serve_once("HTTP/1.1 500 Internal Server Error", "{}");
        assert_eq!(client_for(&url).classify(&frame()), None);
    }

    #[test]
    fn missing_letter_field_resolves_to_none() {
        let url = serve_once("HTTP/1.1 200 OK", r#"{"status": "ok"}"#);
        assert_eq!(client_for(&url).classify(&frame()), None);
    }

    #[test]
    fn unrecognized_letter_resolves_to_none() {
        let url = serve_once("HTTP/1.1 200 OK", r#"{"letter": "J"}"#);
        assert_eq!(client_for(&url).classify(&frame()), None);
    }

    #[test]
    fn malformed_json_resolves_to_none() {
        let url = serve_once("HTTP/1.1 200 OK", "not json");
        assert_eq!(client_for(&url).classify(&frame()), None);
    }

    #[test]
    fn unreachable_service_resolves_to_none() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}", addr));
        assert_eq!(client.classify(&frame()), None);
    }
}
