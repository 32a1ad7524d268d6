use std::net::TcpListener;
use std::process::{Command, Output};

fn check(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_check_webcheck"))
        .args(args)
        .env_remove("GENERATE_ICINGA_COMMAND")
        .env("WEBCHECK_LOG", "off")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_ok_line_and_exit_code() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/").with_status(200).create();
    let host = server.host_with_port();

    let output = check(&["--host", &host, "--protocol", "http"]);

    assert_eq!(
        stdout(&output),
        format!("OK: OK- {host} responded with HTTP/1.1 200 OK\n")
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_critical_line_and_exit_code() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/").with_status(503).create();
    let host = server.host_with_port();

    let output = check(&["--host", &host, "--protocol", "http"]);

    assert_eq!(
        stdout(&output),
        format!("CRITICAL: CRITICAL- {host} HTTP/1.1 503 Service Unavailable\n")
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_refused_connection() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let host = format!("127.0.0.1:{port}");

    let output = check(&["--host", &host, "--protocol", "http"]);

    assert_eq!(stdout(&output), "CRITICAL: CRITICAL- host did not respond\n");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_protocol_is_unknown() {
    let output = check(&["--protocol", "ftp"]);
    let out = stdout(&output);

    assert!(out.starts_with("UNKNOWN: invalid arguments: "), "{out}");
    assert_eq!(out.lines().count(), 1);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_generate_icinga_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_check_webcheck"))
        .env("GENERATE_ICINGA_COMMAND", "1")
        .output()
        .unwrap();
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.starts_with("object CheckCommand \"webcheck\" {"), "{out}");
    assert!(out.contains("\"--host\" = {"));
    assert!(out.contains("value = \"$protocol$\""));
    assert!(out.contains("vars.host = \"somedomain.com\""));
    assert!(out.contains("vars.protocol = \"https\""));
}
