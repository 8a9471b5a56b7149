//! text-bridge command line
//!
//! Resolves document references against a live instance and prints one JSON
//! descriptor per reference.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use text_bridge::models::{ResolverContext, Session, User};
use text_bridge::AttachmentResolver;

#[derive(Parser, Debug)]
#[command(name = "text-bridge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve image/attachment references to download URLs
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// References as they appear in the document
    #[arg(value_name = "REFERENCE", required = true)]
    references: Vec<String>,

    /// Directory of the document, for relative references
    #[arg(long, default_value = "/")]
    dir: String,

    /// Acting user id; omit for share access
    #[arg(long)]
    user: Option<String>,

    #[arg(long)]
    share_token: Option<String>,

    #[arg(long)]
    session_id: Option<u64>,

    #[arg(long)]
    session_token: Option<String>,

    /// Document id the session belongs to
    #[arg(long)]
    document_id: Option<u64>,

    /// Explicit document id, overriding the session's
    #[arg(long)]
    file_id: Option<u64>,

    /// Do not refetch the attachment list when an attachment is missing
    #[arg(long)]
    no_refetch: bool,
}

impl ResolveArgs {
    fn context(&self) -> ResolverContext {
        let mut context = ResolverContext::new(self.dir.clone());
        if self.session_id.is_some() || self.session_token.is_some() || self.document_id.is_some() {
            context = context.with_session(Session {
                id: self.session_id,
                token: self.session_token.clone(),
                document_id: self.document_id,
            });
        }
        if let Some(uid) = &self.user {
            context = context.with_user(User::new(uid.clone()));
        }
        if let Some(token) = &self.share_token {
            context = context.with_share_token(token.clone());
        }
        if let Some(file_id) = self.file_id {
            context = context.with_file_id(file_id);
        }
        context
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "text_bridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = text_bridge::config::init();
    tracing::debug!(base_url = %config.server.base_url, "Configuration loaded");

    match cli.command {
        Command::Resolve(args) => {
            let resolver = AttachmentResolver::from_config(args.context(), config)
                .context("Failed to create attachment resolver")?;

            for reference in &args.references {
                let resolved = resolver
                    .resolve_with(reference, !args.no_refetch)
                    .await
                    .with_context(|| format!("Failed to resolve {}", reference))?;
                println!("{}", serde_json::to_string(&resolved)?);
            }
        }
    }

    Ok(())
}
