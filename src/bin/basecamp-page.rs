//! Renders an HTML page listing the account's projects, or the files of one
//! project, and prints it to stdout.

use anyhow::{Context, Result};
use basecamp_classic::transcode::records;
use basecamp_classic::{BasecampClient, ConfigLoader, Endpoint, ResponseFormat};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

const STYLE: &str = r#"  body { font-family: helvetica, sans-serif; margin: 30px; }
  h1 { display: inline-block; padding: 5px 10px; }
  .archived, .active, .inactive { color: white; display: inline-block; padding: 5px 10px; text-align: center; }
  .active   { background: green; }
  .inactive { background: red; }
  .archived { background: #ccc; color: #555; }"#;

#[derive(Parser, Debug)]
#[command(name = "basecamp-page", version, about = "Render Basecamp projects as HTML")]
struct Args {
    /// Show the files of this project instead of the project list
    #[arg(long)]
    project: Option<u64>,

    /// Credentials file (JSON); environment variables still apply
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let loader = match &args.config {
        Some(path) => ConfigLoader::from_path(path)?,
        None => ConfigLoader::new()?,
    };
    let client = BasecampClient::new(loader.into_credentials())?;

    let body = match args.project {
        Some(id) => project_files(&client, id).await?,
        None => project_list(&client).await?,
    };

    println!("{}", page(&body));
    Ok(())
}

async fn fetch_map(client: &BasecampClient, endpoint: Endpoint) -> Result<Value> {
    let response = client
        .fetch_as(endpoint, ResponseFormat::Map)
        .await
        .with_context(|| format!("fetching {}", endpoint))?;
    Ok(response.into_map().unwrap_or_default())
}

async fn project_list(client: &BasecampClient) -> Result<String> {
    let projects = fetch_map(client, Endpoint::Projects).await?;
    Ok(render_projects(&projects))
}

async fn project_files(client: &BasecampClient, id: u64) -> Result<String> {
    let project = fetch_map(client, Endpoint::Project(id)).await?;
    let files = fetch_map(
        client,
        Endpoint::Files {
            project_id: id,
            offset: None,
        },
    )
    .await?;
    Ok(render_files(&project, &files))
}

fn field<'a>(record: &'a Value, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("")
}

fn render_projects(projects: &Value) -> String {
    let mut out = String::new();
    for project in records(projects, "project") {
        let id = escape(field(project, "id"));
        let name = escape(field(project, "name"));
        let status = escape(field(project, "status"));
        out.push_str(&format!("<h1><a href=\"?id={}\">{}</a></h1>\n", id, name));
        out.push_str(&format!("<div class=\"{}\">{}</div>\n", status, status));
        out.push_str("<hr>\n");
    }
    out
}

fn render_files(project: &Value, files: &Value) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<h1>Project Files for {}</h1>\n",
        escape(field(project, "name"))
    ));
    out.push_str("<ol>\n");
    for file in records(files, "attachment") {
        out.push_str(&format!(
            "  <li><a href=\"{}\">{}</a></li>\n",
            escape(field(file, "download-url")),
            escape(field(file, "name"))
        ));
    }
    out.push_str("</ol>\n");
    out
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n{}\n</style>\n</head>\n<body>\n{}</body>\n</html>",
        STYLE, body
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
