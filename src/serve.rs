//! HTTP server for interactive upload mode
//!
//! `resumatch serve` → starts a local server, opens the browser, shows the
//! upload form. Submissions are forwarded to the remote analysis service and
//! answered with the rendered results page; the stored-result link is relayed
//! through this server so it stays same-origin.

use crate::chart::ChartAdapter;
use crate::client::{status_line, UploadClient, UploadError, UPLOAD_FIELD, UPLOAD_PATH};
use crate::report::html::{self, View};
use multipart::server::Multipart;
use std::io::{self, Read};
use tiny_http::{Header, Method, Request, Response, Server};

/// Start server, open browser, serve the upload form.
///
/// `endpoint` is the base URL of the analysis service every submission is
/// forwarded to.
pub fn start(port: u16, endpoint: String) -> io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let client = UploadClient::new(endpoint)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    // One adapter for the life of the server: every submission re-renders
    // the same single chart instance.
    let mut chart = ChartAdapter::new();

    let url = format!("http://localhost:{}", port);

    eprintln!("\n\x1b[1;32m📄 Resumatch\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   Analysis service: {}\n", client.base());

    // Open browser
    let _ = open::that(&url);

    // Handle requests
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &client, &mut chart) {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

fn handle_request(
    mut request: Request,
    client: &UploadClient,
    chart: &mut ChartAdapter,
) -> io::Result<()> {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("/");
    let method = request.method().clone();

    match (&method, path) {
        // Upload form
        (&Method::Get, "/") => respond_html(request, html::render_page(&View::Form, "", chart)),

        // Browser form submission, forwarded to the analysis service
        (&Method::Post, UPLOAD_PATH) => {
            let view = match read_upload(&mut request) {
                Ok((filename, bytes)) => match client.upload_bytes(filename, bytes) {
                    Ok(result) => {
                        eprintln!("→ {}", result.filename);
                        View::Loaded(result)
                    }
                    Err(e) => View::Failed(status_line(&e)),
                },
                Err(e) => View::Failed(status_line(&e)),
            };
            respond_html(request, html::render_page(&view, "", chart))
        }

        // Stored-result relay
        (&Method::Get, p) if parse_results_id(p).is_some() => {
            let id = parse_results_id(p).unwrap_or_default();
            let (status, body) = match client.fetch_stored(id) {
                Ok(stored) => (stored.status, stored.body),
                Err(e) => (
                    502,
                    serde_json::json!({ "error": e.to_string() }).to_string(),
                ),
            };
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
                );
            request.respond(response)
        }

        // 404
        _ => {
            let response = Response::from_string("Not found").with_status_code(404);
            request.respond(response)
        }
    }
}

fn respond_html(request: Request, page: String) -> io::Result<()> {
    let response = Response::from_string(page)
        .with_header(Header::from_bytes(&b"Content-Type"[..], &b"text/html"[..]).unwrap());
    request.respond(response)
}

/// Pull the `resume` file out of the browser's multipart body.
///
/// A submission without a named file maps to [`UploadError::NoFileSelected`]
/// and never reaches the analysis service.
fn read_upload(request: &mut Request) -> Result<(String, Vec<u8>), UploadError> {
    let boundary = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .and_then(|h| extract_boundary(h.value.as_str()))
        .ok_or_else(|| {
            UploadError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "request is not multipart/form-data",
            ))
        })?;

    let mut form = Multipart::with_body(request.as_reader(), boundary);

    while let Some(mut field) = form.read_entry()? {
        if &*field.headers.name != UPLOAD_FIELD {
            continue;
        }

        let filename = field.headers.filename.clone().unwrap_or_default();
        if filename.is_empty() {
            return Err(UploadError::NoFileSelected);
        }

        let mut bytes = Vec::new();
        field.data.read_to_end(&mut bytes)?;
        return Ok((filename, bytes));
    }

    Err(UploadError::NoFileSelected)
}

fn extract_boundary(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        part.trim()
            .strip_prefix("boundary=")
            .map(|b| b.trim_matches('"').to_string())
    })
}

fn parse_results_id(path: &str) -> Option<i64> {
    path.strip_prefix("/api/results/")?.parse().ok()
}
