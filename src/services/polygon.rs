//! Polygon.io market data provider.
//!
//! Intraday granularities are fetched in three chunked range queries (the
//! aggregates endpoint caps each response), merged, deduplicated and sorted.
//! Transient transport failures retry with exponential backoff; a
//! non-success response degrades to an empty table for that call rather
//! than propagating an error.

use crate::error::EngineError;
use crate::models::candle::Candle;
use crate::models::table::SeriesTable;
use crate::services::market_data::{AssetType, MarketDataProvider, Timespan};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::{error, info};

const DEFAULT_BASE_URL: &str = "https://api.polygon.io";
const CHUNKS: usize = 3;
const CHUNK_WINDOW_MINUTES: i64 = 50_000;
const RESULT_LIMIT: &str = "50000";
const CHUNK_PAUSE: std::time::Duration = std::time::Duration::from_millis(500);

pub struct PolygonDataProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl PolygonDataProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_single_chunk(
        &self,
        ticker: &str,
        timespan: Timespan,
        multiplier: u32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<SeriesTable, EngineError> {
        let url = format!(
            "{}/v2/aggs/ticker/{}/range/{}/{}/{}/{}",
            self.base_url,
            ticker,
            multiplier,
            timespan.as_str(),
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        );

        info!(ticker, multiplier, timespan = %timespan, %start, %end, "fetching aggregate data");

        let request = || async {
            self.client
                .get(&url)
                .query(&[("apiKey", self.api_key.as_str()), ("limit", RESULT_LIMIT)])
                .send()
                .await
        };
        let response = request.retry(ExponentialBuilder::default()).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, ticker, "aggregate request failed");
            return Ok(SeriesTable::new());
        }

        let payload: AggregatesResponse = response.json().await?;
        let candles: Vec<Candle> = payload
            .results
            .into_iter()
            .filter_map(AggregateRow::into_candle)
            .collect();

        Ok(SeriesTable::from_candles(&candles))
    }

    /// Fetch intraday data in overlapping chunks and combine them into a
    /// single table, pausing between requests to stay under the rate limit.
    async fn fetch_in_chunks(
        &self,
        ticker: &str,
        timespan: Timespan,
        multiplier: u32,
    ) -> Result<SeriesTable, EngineError> {
        let mut combined = SeriesTable::new();
        let mut end = Utc::now();

        for chunk in 0..CHUNKS {
            let start = end - chrono::Duration::minutes(CHUNK_WINDOW_MINUTES);
            let table = self
                .fetch_single_chunk(ticker, timespan, multiplier, start, end)
                .await?;
            combined.merge(table);

            end = end - chrono::Duration::minutes(CHUNK_WINDOW_MINUTES + 1);
            if chunk + 1 < CHUNKS {
                tokio::time::sleep(CHUNK_PAUSE).await;
            }
        }

        Ok(combined)
    }
}

#[async_trait]
impl MarketDataProvider for PolygonDataProvider {
    async fn fetch_table(
        &self,
        ticker: &str,
        timespan: Timespan,
        multiplier: u32,
    ) -> Result<SeriesTable, EngineError> {
        if timespan.is_intraday() {
            self.fetch_in_chunks(ticker, timespan, multiplier).await
        } else {
            let end = Utc::now();
            let start = end - timespan.default_lookback();
            self.fetch_single_chunk(ticker, timespan, multiplier, start, end)
                .await
        }
    }

    async fn fetch_current_price(
        &self,
        ticker: &str,
        asset_type: AssetType,
    ) -> Result<f64, EngineError> {
        let url = match asset_type {
            AssetType::Stock => format!(
                "{}/v2/snapshot/locale/us/markets/stocks/tickers/{}",
                self.base_url, ticker
            ),
            AssetType::Crypto => format!(
                "{}/v2/snapshot/locale/global/markets/crypto/tickers/{}",
                self.base_url, ticker
            ),
        };

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EngineError::SnapshotFailed {
                ticker: ticker.to_string(),
                status: response.status().as_u16(),
            });
        }

        let payload: SnapshotResponse = response.json().await?;
        Ok(payload.ticker.min.o)
    }
}

#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    #[serde(default)]
    results: Vec<AggregateRow>,
}

#[derive(Debug, Deserialize)]
struct AggregateRow {
    o: f64,
    h: f64,
    l: f64,
    c: f64,
    v: f64,
    t: i64,
}

impl AggregateRow {
    fn into_candle(self) -> Option<Candle> {
        let timestamp = Utc.timestamp_millis_opt(self.t).single()?;
        Some(Candle::new(
            self.o, self.h, self.l, self.c, self.v, timestamp,
        ))
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    ticker: SnapshotTicker,
}

#[derive(Debug, Deserialize)]
struct SnapshotTicker {
    min: SnapshotMinute,
}

#[derive(Debug, Deserialize)]
struct SnapshotMinute {
    o: f64,
}
