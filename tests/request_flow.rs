mod common;

use common::{closed_port_url, http_response, StubServer};
use reqline::cmd::run_with_io;
use reqline::config::AppConfig;
use reqline::CommandLineArgs;
use std::io::Cursor;
use std::process::ExitCode;
use tempfile::TempDir;

fn run(args: &[&str], dir: &TempDir) -> (ExitCode, String) {
    let args = CommandLineArgs::parse_from(std::iter::once("reqline").chain(args.iter().copied()));
    let config = AppConfig {
        output_dir: dir.path().to_path_buf(),
    };
    let mut out = Vec::new();
    let code = run_with_io(&args, &config, Cursor::new(""), &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn get_with_params_shows_the_dispatched_url() {
    let server = StubServer::respond_once(http_response("200 OK", "application/json", r#"{"a":1}"#));
    let dir = TempDir::new().unwrap();
    let url = server.url("/search");

    let (code, out) = run(
        &["get", &url, "--params", "q=x y", "--headers", "X-Token=abc"],
        &dir,
    );
    let requests = server.requests();

    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(requests[0].request_line, "GET /search?q=x+y HTTP/1.1");
    assert_eq!(requests[0].header("x-token"), Some("abc"));

    let shown = format!("=== Request URL ===\n{url}?q=x+y\n");
    assert!(out.contains(&shown), "output was:\n{out}");
    assert!(out.contains("Status Code: 200\n"));
    assert!(out.contains("x-stub: yes\n"));
    assert!(out.ends_with("=== Body ===\n{\n  \"a\": 1\n}\n"));
}

#[test]
fn repeated_headers_are_grouped_with_lowercase_names() {
    let response = "HTTP/1.1 200 OK\r\n\
                    Set-Cookie: a=1\r\n\
                    X-Trace: t\r\n\
                    Set-Cookie: b=2\r\n\
                    Content-Length: 0\r\n\
                    Connection: close\r\n\r\n";
    let server = StubServer::respond_once(response.to_string());
    let dir = TempDir::new().unwrap();

    let (code, out) = run(&["get", &server.url("/")], &dir);
    server.requests();

    assert_eq!(code, ExitCode::SUCCESS);
    assert!(
        out.contains("set-cookie: a=1\nset-cookie: b=2\nx-trace: t\n"),
        "output was:\n{out}"
    );
}

#[test]
fn post_sends_form_data_url_encoded() {
    let server = StubServer::respond_once(http_response("201 Created", "text/plain", "created"));
    let dir = TempDir::new().unwrap();

    let (code, out) = run(&["post", &server.url("/items"), "--data", "a=1,b=two words"], &dir);
    let request = &server.requests()[0];

    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(request.request_line, "POST /items HTTP/1.1");
    assert_eq!(
        request.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.body, "a=1&b=two+words");
    assert!(out.contains("Status Code: 201\n"));
    assert!(out.ends_with("=== Body ===\ncreated\n"));
}

#[test]
fn key_value_whitespace_is_sent_unchanged() {
    let server = StubServer::respond_once(http_response("200 OK", "text/plain", "ok"));
    let dir = TempDir::new().unwrap();

    let (code, _) = run(&["post", &server.url("/"), "--json", "msg= hello "], &dir);
    let request = &server.requests()[0];

    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(request.body, r#"{"msg":" hello "}"#);
}

#[test]
fn json_payload_wins_over_form_data() {
    let server = StubServer::respond_once(http_response("200 OK", "text/plain", "ok"));
    let dir = TempDir::new().unwrap();

    let (code, _) = run(
        &["put", &server.url("/"), "--data", "f=1", "--json", "name=test,n=1"],
        &dir,
    );
    let request = &server.requests()[0];

    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.body, r#"{"name":"test","n":"1"}"#);
}

#[test]
fn malformed_headers_are_reported_and_request_still_sent() {
    let server = StubServer::respond_once(http_response("204 No Content", "text/plain", ""));
    let dir = TempDir::new().unwrap();

    let (code, out) = run(&["delete", &server.url("/items/1"), "--headers", "oops"], &dir);
    let request = &server.requests()[0];

    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(request.request_line, "DELETE /items/1 HTTP/1.1");
    assert!(out.starts_with("Error: Invalid format for key-value pairs: oops\n"));
    assert!(out.contains("Expected format: key1=value1,key2=value2\n"));
    assert!(out.contains("Status Code: 204\n"));
}

#[test]
fn long_body_is_saved_to_output_dir() {
    let body = "x".repeat(250);
    let server = StubServer::respond_once(http_response("200 OK", "text/plain", &body));
    let dir = TempDir::new().unwrap();

    let (code, out) = run(&["patch", &server.url("/")], &dir);
    server.requests();

    assert_eq!(code, ExitCode::SUCCESS);
    let saved: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(saved.len(), 1);
    assert_eq!(std::fs::read_to_string(&saved[0]).unwrap(), body);

    let name = saved[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("response_") && name.ends_with(".txt"));
    let expected = format!(
        "{}... [Output too long. Saved to {}]\n",
        "x".repeat(100),
        saved[0].display()
    );
    assert!(out.ends_with(&expected), "output was:\n{out}");
}

#[test]
fn connection_refused_fails_the_run() {
    let dir = TempDir::new().unwrap();

    let (code, out) = run(&["get", &closed_port_url()], &dir);

    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.starts_with("Error: "), "output was:\n{out}");
    assert!(!out.contains("=== Response ==="));
}

#[test]
fn missing_url_prints_help_and_fails() {
    let dir = TempDir::new().unwrap();

    let (code, out) = run(&["post"], &dir);

    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.starts_with("Error: You must either use --interactive mode or provide method and URL.\n"));
    assert!(out.contains("Usage:"));
}
