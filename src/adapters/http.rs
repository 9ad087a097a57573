// src/adapters/http.rs
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use reqwest::{Client, Url};

use super::{greenhouse, lever, remotive, BoardFetcher, Invocation};
use crate::config::AggregatorConfig;
use crate::error::FetchError;
use crate::jobs::{NormalizedJob, Source};

/// Production fetcher: one shared `reqwest::Client`, base URLs from config.
#[derive(Clone)]
pub struct HttpBoardFetcher {
    client: Client,
    greenhouse_base: String,
    lever_base: String,
    remotive_base: String,
}

impl HttpBoardFetcher {
    pub fn from_config(cfg: &AggregatorConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .connect_timeout(Duration::from_secs(cfg.http_timeout_secs.min(5)))
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()
            .context("building reqwest client")?;

        Ok(Self {
            client,
            greenhouse_base: cfg.greenhouse_base_url.clone(),
            lever_base: cfg.lever_base_url.clone(),
            remotive_base: cfg.remotive_base_url.clone(),
        })
    }

    async fn get(&self, board: Source, url: Url) -> Result<Vec<u8>, FetchError> {
        let t0 = std::time::Instant::now();
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|cause| FetchError::Transport { board, cause })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { board, status });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|cause| FetchError::Transport { board, cause })?;

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("jobs_upstream_ms", "source" => board.as_str()).record(ms);
        Ok(body.to_vec())
    }
}

#[async_trait]
impl BoardFetcher for HttpBoardFetcher {
    async fn fetch(&self, invocation: &Invocation) -> Result<Vec<NormalizedJob>, FetchError> {
        let board = invocation.source();

        match invocation {
            Invocation::Greenhouse(token) => {
                let url = greenhouse::endpoint(&self.greenhouse_base, token)?;
                let body = self.get(board, url).await?;
                greenhouse::parse(token, &body)
            }
            Invocation::Lever(token) => {
                let url = lever::endpoint(&self.lever_base, token)?;
                let body = self.get(board, url).await?;
                lever::parse(token, &body)
            }
            Invocation::Remotive(query) => {
                let url = remotive::endpoint(&self.remotive_base, query)?;
                let body = self.get(board, url).await?;
                remotive::parse(&body)
            }
        }
    }
}
