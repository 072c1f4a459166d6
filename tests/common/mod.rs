//! In-process stub of the Filelocker HTTP API for integration tests.

#![allow(dead_code, clippy::expect_used)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

pub const TEST_USER: &str = "testuser";
pub const TEST_KEY: &str = "secretsecret";
pub const TEST_ORIGIN: &str = "123requestorigin321";
pub const SESSION_COOKIE: &str = "filelocker=123sessiontoken321";

pub const LOGIN_OK: &str = r#"
    <?xml version="1.0"?>
    <cli_response>
        <messages><info>123requestorigin321</info></messages>
        <data></data>
    </cli_response>
"#;

/// A canned answer for one path.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub set_cookie: Option<&'static str>,
}

impl Reply {
    pub fn xml(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "application/xml",
            body: body.to_string(),
            set_cookie: None,
        }
    }

    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
            set_cookie: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_cookie(mut self, cookie: &'static str) -> Self {
        self.set_cookie = Some(cookie);
        self
    }
}

/// What the stub saw for one request.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path including the query string
    pub target: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Decoded value of a form field in the body.
    pub fn form(&self, key: &str) -> Option<String> {
        decode_pairs(&String::from_utf8_lossy(&self.body), key)
    }

    /// Decoded value of a query parameter.
    pub fn query(&self, key: &str) -> Option<String> {
        let query = self.target.split_once('?').map(|(_, q)| q)?;
        decode_pairs(query, key)
    }
}

fn decode_pairs(encoded: &str, key: &str) -> Option<String> {
    encoded.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        let k = urlencoding::decode(&k.replace('+', " ")).ok()?.into_owned();
        if k == key {
            urlencoding::decode(&v.replace('+', " ")).ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

/// A stub server answering fixed replies per path.
pub struct StubServer {
    pub url: String,
    requests: Receiver<Recorded>,
}

impl StubServer {
    /// Start serving `routes`; unknown paths get a 404 with an empty body.
    pub fn start(routes: Vec<(&'static str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));
        let routes: HashMap<&'static str, Reply> = routes.into_iter().collect();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                handle(stream, &routes, &tx);
            }
        });

        Self { url, requests: rx }
    }

    /// Next request the stub received.
    pub fn next_request(&self) -> Recorded {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("stub server saw no request")
    }
}

fn handle(stream: TcpStream, routes: &HashMap<&'static str, Reply>, tx: &Sender<Recorded>) {
    let Some(request) = read_request(&stream) else {
        return;
    };
    let reply = routes.get(request.path()).cloned().unwrap_or(Reply {
        status: 404,
        content_type: "text/plain",
        body: String::new(),
        set_cookie: None,
    });
    let _ = tx.send(request);

    let mut response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        reply.status,
        if reply.status == 200 { "OK" } else { "Error" },
        reply.content_type,
        reply.body.len()
    );
    if let Some(cookie) = reply.set_cookie {
        response.push_str(&format!("Set-Cookie: {cookie}; Path=/\r\n"));
    }
    response.push_str("\r\n");
    response.push_str(&reply.body);

    let mut stream = stream;
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn read_request(stream: &TcpStream) -> Option<Recorded> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let _ = headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).ok()?;

    Some(Recorded {
        method,
        target,
        headers,
        body,
    })
}
