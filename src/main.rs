//! Web frontend: fetches the schedule on every page view and renders it.

use chrono::{DateTime, Local};
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use palinsesto::data_structs::ScheduleSet;
use palinsesto::error::*;
use palinsesto::http_client::Downloader;
use palinsesto::presenter::{format_italian_date, logo_file_name};
use palinsesto::schedule::{current_program_index, fetch_schedule};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tera::{Context, Tera};
use tiny_http::{Header, Method, Request, Response, Server};
use url::form_urlencoded;

const DEFAULT_PORT: u16 = 5001;

const MANIFEST: &str = include_str!("../static/manifest.webmanifest");
const SERVICE_WORKER: &str = include_str!("../static/sw.js");

/// Served when even the empty-data template render fails.
const FALLBACK_PAGE: &str =
    "<!doctype html><html><body><p>Nessun palinsesto disponibile.</p></body></html>";

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template("index.html", include_str!("../templates/index.html"))
        .expect("malformed index template");
    tera
});

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let downloader = Downloader::new()?;
    let server = Server::http(("0.0.0.0", port))
        .map_err(|e| Error::from(format!("failed to bind port {}: {}", port, e)))?;

    info!("listening on http://0.0.0.0:{}", port);

    for request in server.incoming_requests() {
        handle_request(request, &downloader);
    }

    Ok(())
}

fn handle_request(request: Request, downloader: &Downloader) {
    let url = request.url().to_string();
    let (path, query) = match url.find('?') {
        Some(i) => (&url[..i], &url[i + 1..]),
        None => (url.as_str(), ""),
    };

    debug!("{} {}", request.method(), path);

    let response = match (request.method(), path) {
        (&Method::Get, "/") => page_response(
            index_page(downloader, &channel_param(query)),
            "text/html; charset=utf-8",
        ),
        (&Method::Get, "/manifest.webmanifest") => {
            page_response(MANIFEST.into(), "application/manifest+json")
        }
        (&Method::Get, "/sw.js") => page_response(SERVICE_WORKER.into(), "application/javascript"),
        (&Method::Get, path) if path.starts_with("/static/") => static_response(path),
        _ => not_found(),
    };

    if let Err(e) = request.respond(response) {
        warn!("failed to send response: {}", e);
    }
}

/// Extracts the `channel` query parameter, if any.
fn channel_param(query: &str) -> String {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "channel")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Renders the schedule page. Never fails: a failed render falls back to the
/// empty-data page, and failing that to a canned response.
fn index_page(downloader: &Downloader, channel_filter: &str) -> String {
    let schedule = fetch_schedule(downloader);
    let now = Local::now();

    render_index(&schedule, channel_filter, &now)
        .or_else(|e| {
            warn!("render failed, serving empty page: {}", e);
            render_index(&ScheduleSet::default(), "", &now)
        })
        .unwrap_or_else(|e| {
            warn!("empty-page render failed: {}", e);
            FALLBACK_PAGE.into()
        })
}

fn render_index(
    schedule: &ScheduleSet,
    channel_filter: &str,
    now: &DateTime<Local>,
) -> Result<String> {
    let active_channel = if schedule.channels.iter().any(|c| c == channel_filter) {
        channel_filter.to_string()
    } else {
        schedule.channels.first().cloned().unwrap_or_default()
    };

    let logo_map: HashMap<&String, String> = schedule
        .channels
        .iter()
        .map(|c| (c, logo_file_name(c)))
        .collect();

    let current_index = schedule
        .programs
        .get(&active_channel)
        .map(|programs| current_program_index(programs, now.time()))
        .unwrap_or(0);

    let mut context = Context::new();
    context.insert("channels", &schedule.channels);
    context.insert("channel_filter", channel_filter);
    context.insert("logo_map", &logo_map);
    context.insert("programs_by_channel", &schedule.programs);
    context.insert("active_channel", &active_channel);
    context.insert("italian_date", &format_italian_date(now));
    context.insert("current_program_index", &current_index);

    Ok(TEMPLATES.render("index.html", &context)?)
}

fn page_response(body: String, content_type: &str) -> Response<Cursor<Vec<u8>>> {
    Response::from_string(body).with_header(content_type_header(content_type))
}

/// Serves a file from the `static/` directory next to the binary's working
/// directory. Path segments that would escape it are rejected.
fn static_response(path: &str) -> Response<Cursor<Vec<u8>>> {
    let relative = &path["/static/".len()..];

    if relative
        .split('/')
        .any(|part| part.is_empty() || part == "." || part == "..")
    {
        return not_found();
    }

    let file = Path::new("static").join(relative);

    match fs::read(&file) {
        Ok(bytes) => Response::from_data(bytes).with_header(content_type_header(content_type_for(&file))),
        Err(_) => not_found(),
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webmanifest") => "application/manifest+json",
        _ => "application/octet-stream",
    }
}

fn content_type_header(value: &str) -> Header {
    Header::from_bytes(&b"Content-Type"[..], value.as_bytes()).expect("malformed header value")
}

fn not_found() -> Response<Cursor<Vec<u8>>> {
    Response::from_string("Not Found").with_status_code(404)
}
