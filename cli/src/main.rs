mod render;
mod take;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use exam::{ExamError, ModeKind};
use models::stats::{AdminStats, StudentDashboard};
use models::table::{SortDirection, TableQuery};
use models::{ApiError, Id, ResourceKind};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("exam error: {0}")]
    Exam(#[from] ExamError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "academy-cli", about = "Academy REST API CLI")]
struct Cli {
    #[arg(long, env = "ACADEMY_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Bearer token sent as `Authorization`.
    #[arg(long, env = "ACADEMY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "ACADEMY_TIMEOUT_SECS", default_value_t = 15)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ACADEMY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Resource(ResourceCommand),
    Stats {
        #[arg(value_enum)]
        dashboard: Dashboard,
    },
    Exam(ExamCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Dashboard {
    Admin,
    Student,
}

#[derive(Args, Debug)]
struct ResourceCommand {
    #[command(subcommand)]
    command: ResourceSubcommand,
}

#[derive(Subcommand, Debug)]
enum ResourceSubcommand {
    List {
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
        #[arg(long, default_value = "")]
        search: String,
        /// 1-based column to sort by.
        #[arg(long)]
        sort: Option<usize>,
        #[arg(long, default_value_t = false)]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Show {
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
        id: Id,
    },
    Delete {
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
        id: Id,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct ExamCommand {
    #[command(subcommand)]
    command: ExamSubcommand,
}

#[derive(Subcommand, Debug)]
enum ExamSubcommand {
    Take {
        certification_id: Id,
        #[arg(long, default_value = "learning", value_parser = parse_mode)]
        mode: ModeKind,
    },
}

fn parse_kind(raw: &str) -> Result<ResourceKind, String> {
    ResourceKind::from_segment(raw.trim()).ok_or_else(|| {
        let known: Vec<&str> = ResourceKind::ALL.iter().map(|kind| kind.segment()).collect();
        format!("unknown resource `{raw}` (expected one of: {})", known.join(", "))
    })
}

fn parse_mode(raw: &str) -> Result<ModeKind, String> {
    raw.parse::<ModeKind>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if !(cli.base_url.starts_with("http://") || cli.base_url.starts_with("https://")) {
        return Err(CliError::InvalidBaseUrl(cli.base_url));
    }
    let ctx = CliContext {
        base_url: cli.base_url,
        token: cli.token,
        timeout: Duration::from_secs(cli.timeout_secs.max(1)),
    };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Login { email, password } => run_login(&ctx, &email, &password).await,
        Command::Resource(resource) => run_resource(&ctx, resource).await,
        Command::Stats { dashboard } => run_stats(&ctx, dashboard).await,
        Command::Exam(exam) => match exam.command {
            ExamSubcommand::Take { certification_id, mode } => take::run(&ctx, certification_id, mode).await,
        },
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let (status, body) = api_request(cli, reqwest::Method::GET, "/healthz", None).await?;
    if !(200..300).contains(&status) {
        return Err(models::envelope::error_from_status(status, &body).into());
    }
    println!("ok");
    Ok(())
}

async fn run_login(cli: &CliContext, email: &str, password: &str) -> Result<(), CliError> {
    let body = serde_json::json!({ "email": email, "password": password });
    let (status, body) = api_request(cli, reqwest::Method::POST, "/api/v1/auth/login", Some(body)).await?;
    let value: Value = models::decode_response(status, &body)?;
    print_json(&value)
}

async fn run_resource(cli: &CliContext, resource: ResourceCommand) -> Result<(), CliError> {
    match resource.command {
        ResourceSubcommand::List { kind, search, sort, desc, page } => {
            let path = format!("/api/v1/admin/{}", kind.segment());
            let (status, body) = api_request(cli, reqwest::Method::GET, &path, None).await?;
            let rows = models::decode_rows(kind, status, &body)?;

            let mut query = TableQuery::default();
            query.set_search(&search);
            query.sort = sort
                .filter(|column| (1..=kind.columns().len()).contains(column))
                .map(|column| (column - 1, if desc { SortDirection::Descending } else { SortDirection::Ascending }));
            query.page = page.max(1);

            let page = models::table::apply(&rows, &query);
            print!("{}", render::render_table(kind.columns(), &page));
            Ok(())
        }
        ResourceSubcommand::Show { kind, id } => {
            let path = format!("/api/v1/admin/{}/{id}", kind.segment());
            let (status, body) = api_request(cli, reqwest::Method::GET, &path, None).await?;
            let value: Value = models::decode_response(status, &body)?;
            print_json(&value)
        }
        ResourceSubcommand::Delete { kind, id, yes } => {
            let path = format!("/api/v1/admin/{}/{id}", kind.segment());
            if !yes {
                let (status, body) = api_request(cli, reqwest::Method::GET, &path, None).await?;
                let value: Value = models::decode_response(status, &body)?;
                let question = format!("Delete {} \"{}\"? [y/N] ", kind.singular(), render::label_of(&value, id));
                if !render::is_confirmation(&prompt(&question)?) {
                    println!("cancelled");
                    return Ok(());
                }
            }
            let (status, body) = api_request(cli, reqwest::Method::DELETE, &path, None).await?;
            models::decode_response::<Value>(status, &body)?;
            println!("deleted {} {id}", kind.singular());
            Ok(())
        }
    }
}

async fn run_stats(cli: &CliContext, dashboard: Dashboard) -> Result<(), CliError> {
    let cards = match dashboard {
        Dashboard::Admin => {
            let (status, body) = api_request(cli, reqwest::Method::GET, "/api/v1/admin/stats", None).await?;
            let stats: AdminStats = models::decode_response(status, &body)?;
            let mut out = render::render_cards(&stats.cards());
            out.push_str(&render::render_bars(&stats.monthly_revenue));
            out
        }
        Dashboard::Student => {
            let (status, body) = api_request(cli, reqwest::Method::GET, "/api/v1/student/dashboard", None).await?;
            let dashboard: StudentDashboard = models::decode_response(status, &body)?;
            render::render_cards(&dashboard.cards())
        }
    };
    print!("{cards}");
    Ok(())
}

/// Send one request and return `(status, body)`; classification is left to
/// `models::envelope` so the browser and the CLI agree on errors.
async fn api_request(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<(u16, String), CliError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = cli.token.as_deref() {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
    }

    let client = reqwest::Client::builder().default_headers(headers).timeout(cli.timeout).build()?;
    let url = format!("{}{}", cli.base_url.trim_end_matches('/'), path);

    tracing::debug!(%method, %url, "request");
    let request = client.request(method, &url);
    let request = if let Some(json) = body { request.json(&json) } else { request };

    let response = request.send().await?;
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    tracing::debug!(status, bytes = text.len(), "response");
    Ok((status, text))
}

fn prompt(question: &str) -> Result<String, CliError> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
