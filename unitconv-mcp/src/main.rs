//! unitconv MCP Server
//!
//! Newline-delimited JSON-RPC 2.0 over stdio. Logs go to stderr; stdout
//! carries only protocol messages.
//!
//! Tools:
//! - convert: Convert a value between units of a category
//! - convert_expression: Convert "12 km -> mi" style expressions
//! - list_units: List units by category
//! - help: Get documentation for the conversion functions

mod config;
mod protocol;
mod tools;

use serde_json::{json, Value as JsonValue};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};
use unitconv_plugin::PluginRegistry;

use config::ServerConfig;
use protocol::{McpError, McpRequest, McpResponse};

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

struct Server {
    registry: PluginRegistry,
    config: ServerConfig,
}

impl Server {
    fn new(config: ServerConfig) -> Self {
        Self {
            registry: unitconv_units::standard_registry(),
            config,
        }
    }

    /// Handle one input line. Returns `None` when nothing should be written.
    fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!(bytes = line.len(), "received");

        let raw: JsonValue = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "malformed json");
                return Some(McpResponse::failure(None, McpError::parse_error(e)));
            }
        };

        // Well-formed JSON that is not a request object (batches included)
        let id = raw.get("id").cloned();
        let request: McpRequest = match serde_json::from_value(raw) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "invalid request");
                return Some(McpResponse::failure(
                    id,
                    McpError::invalid_request(format!("Invalid request: {}", e)),
                ));
            }
        };

        let response = self.handle_request(&request);

        if request.is_notification() {
            debug!(method = %request.method, "notification processed");
            return None;
        }
        Some(response)
    }

    fn handle_request(&self, request: &McpRequest) -> McpResponse {
        if request.jsonrpc != "2.0" {
            return McpResponse::failure(
                request.id.clone(),
                McpError::invalid_request(format!("Unsupported jsonrpc version: '{}'", request.jsonrpc)),
            );
        }

        debug!(method = %request.method, "processing");
        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => self.handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => Ok(tools::tools_list()),
            "tools/call" => tools::call_tool(&self.registry, &request.params),

            _ => {
                warn!(method = %request.method, "unknown method");
                Err(McpError::method_not_found(&request.method))
            }
        };

        match result {
            Ok(r) => McpResponse::success(request.id.clone(), r),
            Err(e) => McpResponse::failure(request.id.clone(), e),
        }
    }

    fn handle_initialize(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let client_info = params
            .as_ref()
            .and_then(|p| p.get("clientInfo"))
            .and_then(|c| c.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("unknown");

        // Use client's protocol version for compatibility
        let client_protocol = params
            .as_ref()
            .and_then(|p| p.get("protocolVersion"))
            .and_then(|v| v.as_str())
            .unwrap_or(PROTOCOL_VERSION);

        info!(client = client_info, protocol = client_protocol, "client connected");

        Ok(json!({
            "protocolVersion": client_protocol,
            "serverInfo": {
                "name": self.config.server_name,
                "version": SERVER_VERSION,
                "description": "Length, weight and temperature unit conversion"
            },
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "instructions": "Use 'convert' with a category (Length, Weight, Temperature), a value and two unit names, or 'convert_expression' with text like '12 km -> mi'. 'list_units' shows the accepted units."
        }))
    }
}

async fn write_response<W: AsyncWrite + Unpin>(out: &mut W, response: &McpResponse) -> std::io::Result<()> {
    let mut bytes = serde_json::to_vec(response)?;
    bytes.push(b'\n');
    out.write_all(&bytes).await?;
    out.flush().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .init();

    if let Some(raw) = &config.rejected_log_level {
        warn!(level = %raw, "unrecognized log level, using info");
    }

    info!(
        name = %config.server_name,
        version = SERVER_VERSION,
        protocol = PROTOCOL_VERSION,
        "server started"
    );

    let server = Server::new(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("client disconnected (EOF)");
                break;
            }
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        };

        let Some(response) = server.handle_line(&line) else {
            continue;
        };

        if let Err(e) = write_response(&mut stdout, &response).await {
            error!(error = %e, "failed to write response");
            break;
        }
    }

    info!("server shutting down");
}
