//! MediaDeck application.
//!
//! Supports both WASM (for web browsers) and native modes.

#![warn(clippy::all, rust_2018_idioms)]

// ============================================================================
// WASM Entry Point
// ============================================================================

#[cfg(target_arch = "wasm32")]
fn main() {
    use mediadeck_frontend::{api::ApiClient, MediaDeckApp};
    use wasm_bindgen::JsCast;

    // Initialize panic handler for better error messages in browser console
    console_error_panic_hook::set_once();

    tracing_wasm::set_as_global_default();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            tracing::error!("No document available");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("mediadeck_canvas")
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            tracing::error!("Canvas element 'mediadeck_canvas' not found");
            return;
        };

        let api = ApiClient::new(mediadeck_types::DEFAULT_API_URL);
        tracing::info!("REST API URL: {}", api.base_url());

        if let Err(e) = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(MediaDeckApp::new(cc, api)))),
            )
            .await
        {
            tracing::error!("Failed to start eframe: {:?}", e);
        }
    });
}

// ============================================================================
// Native Entry Point
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "mediadeck", version, about = "Media catalog and playlist manager")]
struct Args {
    /// Origin of the REST API (e.g. https://localhost:7202)
    #[arg(long)]
    api_url: Option<String>,

    /// Accept self-signed TLS certificates from the API
    #[arg(long)]
    accept_invalid_certs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use mediadeck_frontend::{api::ApiClient, config::Config};

    let args = Args::parse();
    let config = Config::from_figment(
        args.api_url,
        args.accept_invalid_certs.then_some(true),
        args.log_level,
    )?;

    // RUST_LOG wins unless a level was configured explicitly
    let filter = match config.log_level {
        Some(ref level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting MediaDeck in native mode");

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()?;
    if config.accept_invalid_certs {
        tracing::warn!("Accepting invalid TLS certificates from {}", config.api_url);
    }
    let api = ApiClient::with_client(config.api_url, client);

    mediadeck_frontend::run_native_gui(api)
        .map_err(|e| anyhow::anyhow!("GUI exited with error: {}", e))
}
