use std::sync::Arc;

use netdiag_core::Diagnostics;
use netdiag_core::ipc;
use tokio::io::BufReader;
use tracing::info;

/// Runs the request loop on stdin/stdout until stdin is closed.
pub async fn serve(diag: Diagnostics) -> anyhow::Result<()> {
    info!("Serving requests on stdin ({})", diag.platform());
    ipc::serve(Arc::new(diag), BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
    Ok(())
}
