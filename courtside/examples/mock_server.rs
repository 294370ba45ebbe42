//! Run the HTTP endpoint against a canned provider, no API key needed.
//!
//! ```bash
//! cargo run --example mock_server
//! curl -s localhost:5000/analyze -H 'content-type: application/json' \
//!   -d '{"court_b64": "iVBORw0KGgo=", "transcript": "Q4 02:11 Smith makes 3-pt shot", "quarter": "Q4"}'
//! ```

use std::sync::Arc;

use courtside::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("courtside=debug,tower_http=debug").init();

    let provider = MockProvider::new([
        "Top of the key \u{2014} Q4, 2:11, Smith, pull-up three to take the lead.",
    ]);
    let analyst = Analyst::new(Arc::new(provider), AnalysisOptions::for_server());

    serve(&ServeConfig::default(), analyst, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}
