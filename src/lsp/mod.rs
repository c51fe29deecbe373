//! Language Server Protocol implementation for sassfmt
//!
//! This module provides a Language Server Protocol (LSP) implementation for
//! sassfmt, exposing sass-convert-backed document and range formatting to
//! editors and IDEs.
//!
//! Following Ruff's approach, this is built directly into the main sassfmt
//! binary and can be started with `sassfmt server`.

pub mod server;
pub mod types;

pub use server::SassfmtLanguageServer;
pub use types::SassfmtLspConfig;

use anyhow::Result;
use tokio::net::TcpListener;
use tower_lsp::{LspService, Server};

/// Start the Language Server Protocol server on stdio
/// This is the main entry point for `sassfmt server`
pub async fn start_server(config_path: Option<&str>) -> Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let config_path = config_path.map(str::to_string);
    let (service, socket) = LspService::new(move |client| SassfmtLanguageServer::new(client, config_path.clone()));

    log::info!("Starting sassfmt Language Server Protocol server");

    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}

/// Start the LSP server over TCP (useful for debugging)
pub async fn start_tcp_server(port: u16, config_path: Option<&str>) -> Result<()> {
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    log::info!("sassfmt LSP server listening on 127.0.0.1:{port}");

    let config_path = config_path.map(str::to_string);
    loop {
        let (stream, _) = listener.accept().await?;
        let config_path = config_path.clone();
        let (service, socket) = LspService::new(move |client| SassfmtLanguageServer::new(client, config_path.clone()));

        tokio::spawn(async move {
            let (read, write) = tokio::io::split(stream);
            Server::new(read, write, socket).serve(service).await;
        });
    }
}
