//! Live generation: stream a real response into the event loop.

use crate::pipeline::{Decoder, PatchLineDecoder};
use crate::session::{CancelHandle, Event, EventSender};
use crate::transport::GenerationClient;
use crate::{Error, Result};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Producer task for one live run.
///
/// Reports `LiveFinished` on success or genuine failure. A cancelled run
/// reports nothing: the loop already finalized its state when it cancelled.
pub(crate) async fn run_live(
    client: Arc<GenerationClient>,
    prompt: String,
    generation: u64,
    cancel: CancelHandle,
    events: EventSender,
) {
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        r = stream_patches(&client, &prompt, generation, &events) => r,
    };

    let result = match outcome {
        Ok(()) => Ok(()),
        Err(e) if e.is_cancelled() || cancel.is_cancelled() => {
            debug!(generation, "live generation cancelled");
            return;
        }
        Err(e) => {
            warn!(generation, error = %e, "live generation failed");
            Err(e.to_string())
        }
    };
    let _ = events.send(Event::LiveFinished { generation, result });
}

async fn stream_patches(
    client: &GenerationClient,
    prompt: &str,
    generation: u64,
    events: &EventSender,
) -> Result<()> {
    let body = client.execute_stream(prompt).await?;
    let mut patches = PatchLineDecoder.decode_stream(body).await?;

    let mut count = 0usize;
    while let Some(item) = patches.next().await {
        let patch = item?;
        count += 1;
        if events.send(Event::LivePatch { generation, patch }).is_err() {
            // Event loop is gone; nobody is left to render.
            return Err(Error::Cancelled);
        }
    }
    info!(generation, patches = count, "generation stream ended");
    Ok(())
}
