use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use searchq_lsp::Backend;

/// Language server for structured code-search queries.
///
/// Speaks LSP over stdio; diagnostics and logs go to stderr.
#[derive(Parser)]
#[command(name = "searchq_lsp", version, about)]
struct Cli {
    /// Log filter directive (overridden by RUST_LOG), e.g. `info` or
    /// `searchq_lsp=debug`.
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // stdout carries the LSP transport, so logging must stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log)),
        )
        .with_writer(std::io::stderr)
        .init();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
}
