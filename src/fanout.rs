// src/fanout.rs
//! Settle-all fan-out over adapter invocations.

use std::sync::Arc;

use anyhow::anyhow;
use futures::future::join_all;
use metrics::{counter, histogram};

use crate::adapters::{BoardFetcher, Invocation};
use crate::jobs::NormalizedJob;

/// Outcome of one fan-out: jobs in invocation order plus labeled failures.
#[derive(Debug, Default)]
pub struct FanOut {
    pub jobs: Vec<NormalizedJob>,
    pub failures: Vec<String>,
}

/// Run every invocation as its own task and wait for all of them to settle.
///
/// Adapter errors become failure strings (`"Greenhouse(airbnb): 404"`) and never
/// short-circuit the others. Only a task that panics or is cancelled escalates.
pub async fn fan_out(
    fetcher: Arc<dyn BoardFetcher>,
    invocations: Vec<Invocation>,
) -> anyhow::Result<FanOut> {
    let t0 = std::time::Instant::now();

    let handles = invocations.iter().cloned().map(|inv| {
        let fetcher = Arc::clone(&fetcher);
        counter!("jobs_fetch_total", "source" => inv.source().as_str()).increment(1);
        tokio::spawn(async move { fetcher.fetch(&inv).await })
    });
    let settled = join_all(handles).await;

    let mut out = FanOut::default();
    for (inv, res) in invocations.iter().zip(settled) {
        match res {
            Ok(Ok(mut jobs)) => out.jobs.append(&mut jobs),
            Ok(Err(e)) => {
                let label = inv.label();
                tracing::warn!(error = %e, adapter = %label, "adapter fetch failed");
                counter!("jobs_fetch_errors_total", "source" => e.board().as_str()).increment(1);
                out.failures.push(format!("{label}: {e}"));
            }
            Err(join) => {
                return Err(anyhow!("adapter task {} did not complete: {join}", inv.label()));
            }
        }
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("jobs_fanout_ms").record(ms);
    Ok(out)
}
