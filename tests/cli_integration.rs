//! Integration tests that run the CLI binary.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

fn bin() -> std::process::Command {
    // CARGO_BIN_EXE_<name> uses the binary target name; hyphens require concat! for env!()
    let bin = env!(concat!("CARGO_BIN_EXE_ask", "-", "form"));
    let mut cmd = std::process::Command::new(bin);
    cmd.env_remove("ASK_FORM_BASE_URL");
    cmd.env_remove("ASK_FORM_CHAT_PATH");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Serve one HTTP response with a JSON body on a random local port.
/// Returns the base URL and a handle yielding the raw request.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("addr"));
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).expect("read");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).expect("write");
        String::from_utf8_lossy(&buf).into_owned()
    });
    (base, handle)
}

/// A local URL nothing listens on.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let output = bin()
        .arg("--help")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--prompt"), "expected usage text in output");
    assert!(stdout.contains("ASK_FORM_BASE_URL"));
}

#[test]
fn cli_version_succeeds() {
    let output = bin()
        .arg("--version")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ask-form"));
}

#[test]
fn cli_prompt_prints_normalized_answer() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let (base, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"messages":[{"content":"\"Line one\\nLine two\""},{"content":"**done**"}]}"#,
    );
    let output = bin()
        .args(["-p", "  how many orders?  ", "--url", &base])
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "Line one\nLine two\n**done**\n");

    let request = server.join().expect("server thread");
    assert!(request.starts_with("POST /threads/chat "));
    assert!(request.contains(r#"{"messages":[{"role":"user","content":"how many orders?"}]}"#));
}

#[test]
fn cli_prompt_reads_question_from_stdin() {
    use std::process::Stdio;

    let tmp = tempfile::TempDir::new().expect("temp dir");
    let (base, server) = serve_once("HTTP/1.1 200 OK", r#"{"messages":[{"content":"ok"}]}"#);
    let mut child = bin()
        .args(["-p", "-", "--url", &base])
        .current_dir(tmp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary not found - run cargo build first");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"question from a pipe\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "ok\n");
    let request = server.join().expect("server thread");
    assert!(request.contains("question from a pipe"));
}

#[test]
fn cli_prompt_empty_payload_prints_fallback() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let (base, _server) = serve_once("HTTP/1.1 200 OK", "{}");
    let output = bin()
        .args(["-p", "hello", "--url", &base])
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "No response.\n");
}

#[test]
fn cli_prompt_server_error_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let (base, _server) = serve_once(
        "HTTP/1.1 500 Internal Server Error",
        r#"{"error":"database unavailable"}"#,
    );
    let output = bin()
        .args(["-p", "hello", "--url", &base])
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: HTTP 500: database unavailable"),
        "got: {}",
        stderr
    );
}

#[test]
fn cli_prompt_unreachable_backend_exits_with_error() {
    // Run from temp dir so dotenv() won't load .env from project root
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .args(["-p", "hello", "--url", &closed_port_url()])
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.lines().any(|l| l.starts_with("Error: ")),
        "got: {}",
        stderr
    );
}

#[test]
fn cli_invalid_url_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .args(["-p", "hello", "--url", "ftp://example.com"])
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.lines().any(|l| l.starts_with("Error: invalid endpoint")));
}

#[test]
fn cli_config_shows_endpoint() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .arg("config")
        .env("ASK_FORM_BASE_URL", "http://10.0.0.5:8080")
        .env("ASK_FORM_CHAT_PATH", "/api/chat")
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("http://10.0.0.5:8080/api/chat (from ASK_FORM_BASE_URL)"),
        "got: {}",
        stdout
    );
}

#[test]
fn cli_completions_bash() {
    let output = bin()
        .args(["completions", "bash"])
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("ask-form"));
}
