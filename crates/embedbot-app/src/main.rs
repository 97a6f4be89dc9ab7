mod cli;
mod host;
mod terminal;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use embedbot_client::{AnalyticsSink, HttpBackend, NoopAnalytics};
use embedbot_common::WidgetError;
use embedbot_engine::WidgetEngine;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use terminal::TerminalView;

const DEFAULT_LOG_DIRECTIVE: &str = "embedbot=info";

/// Time left for the unload beacon before the runtime goes away.
const UNLOAD_GRACE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Logs go to stderr so they never interleave with the transcript.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(args.log_level.as_deref()))
        .init();

    tracing::info!("Starting embedbot v{}", env!("CARGO_PKG_VERSION"));

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        // The engine already reported the missing key.
        Err(WidgetError::Config(embedbot_common::ConfigError::MissingChatbotKey)) => {
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("embedbot failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` plus the `--log-level` directive. An unparseable directive
/// falls back to the default alone.
fn log_filter(directive: Option<&str>) -> EnvFilter {
    match directive.unwrap_or(DEFAULT_LOG_DIRECTIVE).parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::new(DEFAULT_LOG_DIRECTIVE),
    }
}

async fn run(args: cli::Args) -> embedbot_common::Result<()> {
    let mut settings = embedbot_config::load_settings(args.config.as_deref())?;
    if let Some(ref api_base) = args.api_base {
        settings = settings.with_api_base(api_base.clone());
        embedbot_config::validation::validate(&settings)?;
    }

    let backend = HttpBackend::new(&settings)
        .map(Arc::new)
        .map_err(|e| WidgetError::Network(e.to_string()))?;
    tracing::info!(chat = backend.chat_url(), "backend configured");

    let analytics: Arc<dyn AnalyticsSink> = if args.no_analytics {
        Arc::new(NoopAnalytics)
    } else {
        backend.clone()
    };

    let reply_delay = settings.response_delay();
    let handle = WidgetEngine::mount(
        &args.embed_attributes(),
        settings,
        backend,
        analytics,
        Box::new(TerminalView::stdout()),
    )?;

    let stdin = BufReader::new(tokio::io::stdin());
    let interrupted = tokio::select! {
        result = host::drive(&handle, stdin) => {
            result?;
            false
        }
        _ = tokio::signal::ctrl_c() => true,
    };

    if !interrupted {
        tokio::select! {
            _ = host::wait_for_reply(&handle, reply_delay) => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    }

    handle.unload();
    tokio::time::sleep(UNLOAD_GRACE).await;
    handle.shutdown();
    tokio::time::sleep(Duration::from_millis(10)).await;
    Ok(())
}
