use std::time::Duration;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use log::{debug, warn};
use nonzero_ext::nonzero;
use reqwest::{Client, header};
use snafu::ResultExt;

use crate::config::Config;
use crate::models::{query::BarsQuery, time_series::TimeSeries};
use crate::providers::{
    ApiSnafu, ClientBuildSnafu, DataProvider, InvalidUserAgentSnafu, ProviderError,
    ProviderInitError, ReqwestSnafu,
    yahoo::{
        params::{Interval, construct_params, validate_query},
        response::{ChartEnvelope, collapse_bars},
    },
};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BASE_DELAY_MS: u64 = 250;

/// Bounded retry schedule for transport failures.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per attempt.
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
        }
    }
}

/// Daily-bar provider backed by the public chart endpoint.
pub struct YahooProvider {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
    retry: RetryPolicy,
}

impl YahooProvider {
    /// Creates a provider with default settings.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_config(&Config::default())
    }

    /// Creates a provider from explicit configuration; unset fields fall back
    /// to the defaults.
    pub fn with_config(config: &Config) -> Result<Self, ProviderInitError> {
        let user_agent = match &config.user_agent {
            Some(ua) => header::HeaderValue::from_str(ua).context(InvalidUserAgentSnafu)?,
            None => header::HeaderValue::from_static(DEFAULT_USER_AGENT),
        };
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, user_agent);

        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context(ClientBuildSnafu)?;

        let rate = config
            .max_requests_per_minute
            .and_then(std::num::NonZeroU32::new)
            .unwrap_or(nonzero!(30u32));

        let retry = RetryPolicy {
            max_retries: config.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            base_delay_ms: config.base_delay_ms.unwrap_or(DEFAULT_BASE_DELAY_MS),
        };

        Ok(Self {
            client,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            limiter: RateLimiter::direct(Quota::per_minute(rate)),
            retry,
        })
    }

    async fn get_chart(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<ChartEnvelope, ProviderError> {
        let mut attempt = 0u32;
        loop {
            match self.get_chart_once(url, params).await {
                Ok(envelope) => return Ok(envelope),
                Err(error) if attempt < self.retry.max_retries && is_transient(&error) => {
                    let delay = self
                        .retry
                        .base_delay_ms
                        .saturating_mul(1u64 << attempt.min(6));
                    attempt += 1;
                    warn!(
                        "transient error fetching {url} (attempt {attempt}), retrying in {delay}ms: {error}"
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn get_chart_once(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<ChartEnvelope, ProviderError> {
        self.limiter.until_ready().await;

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            // The endpoint reports its diagnostic inside the envelope even on
            // non-2xx responses; prefer that over the raw body.
            if let Ok(envelope) = serde_json::from_str::<ChartEnvelope>(&body) {
                if let Some(error) = envelope.chart.error {
                    return ApiSnafu {
                        message: format!("{}: {}", error.code, error.description),
                    }
                    .fail();
                }
            }
            return ApiSnafu {
                message: format!("HTTP {status}: {body}"),
            }
            .fail();
        }

        response.json::<ChartEnvelope>().await.context(ReqwestSnafu)
    }
}

fn is_transient(error: &ProviderError) -> bool {
    match error {
        ProviderError::Reqwest { source, .. } => source.is_timeout() || source.is_connect(),
        _ => false,
    }
}

#[async_trait]
impl DataProvider for YahooProvider {
    async fn fetch_daily_bars(&self, query: &BarsQuery) -> Result<TimeSeries, ProviderError> {
        validate_query(query)?;

        let url = format!("{}/v8/finance/chart/{}", self.base_url, query.symbol);
        let params = construct_params(query, Interval::OneDay);
        debug!(
            "fetching daily bars for {} from {} to {}",
            query.symbol, query.start, query.end
        );

        let envelope = self.get_chart(&url, &params).await?;

        if let Some(error) = envelope.chart.error {
            return ApiSnafu {
                message: format!("{}: {}", error.code, error.description),
            }
            .fail();
        }

        let bars = envelope
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(collapse_bars)
            .unwrap_or_default();

        debug!("collapsed {} bars for {}", bars.len(), query.symbol);
        Ok(TimeSeries::new(&query.symbol, bars))
    }
}
