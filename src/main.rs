use chrono::{Duration, TimeZone, Utc};
use triframe::config::Config;
use triframe::framework::TradingFramework;
use triframe::models::candle::Candle;
use triframe::models::strategy::{IndicatorSpec, StrategySpec};
use triframe::models::table::{SeriesTable, COL_CLOSE};
use triframe::services::market_data::AssetType;
use triframe::services::polygon::PolygonDataProvider;
use triframe::signals::score::ScoreSpec;
use triframe::signals::signal::Signal;
use triframe::signals::group::SignalGroup;
use triframe::watchlist::Watchlist;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    triframe::logging::init_logging();
    let config = Config::from_env();

    let daily = SeriesTable::from_candles(&demo_candles(180, 1440));
    let hourly = SeriesTable::from_candles(&demo_candles(500, 60));

    let mut framework = TradingFramework::new("Demo Framework").with_roles(
        vec!["daily".to_string()],
        vec!["hourly".to_string()],
    );

    let strategy = StrategySpec::new(
        "Swing",
        vec![
            IndicatorSpec::Rsi { period: 14 },
            IndicatorSpec::Macd { fast: 12, slow: 26, signal: 9 },
            IndicatorSpec::Sma { period: 20 },
            IndicatorSpec::Sma { period: 50 },
        ],
    )
    .with_description("RSI + MACD + moving average crosses");

    framework.add_timeframe("daily", daily, Some(strategy.clone()));
    framework.add_timeframe("hourly", hourly, Some(strategy));
    framework.set_active_time_frame("daily");

    let mut momentum = SignalGroup::new("Momentum");
    momentum.add_signal(Signal::new(
        "RSI",
        ScoreSpec::threshold("RSI_14", 70.0, 30.0).inverted(),
    ));
    momentum.add_signal(Signal::new(
        "MACD Cross",
        ScoreSpec::crossover("MACD_12_26_9", "MACDs_12_26_9"),
    ));

    let mut trend = SignalGroup::new("Trend");
    trend.add_signal(Signal::new(
        "Price over SMA20",
        ScoreSpec::crossover(COL_CLOSE, "SMA_20"),
    ));
    trend.add_signal(Signal::new(
        "SMA20 over SMA50",
        ScoreSpec::crossover("SMA_20", "SMA_50"),
    ));

    framework.add_signal_group_to_timeframe("daily", momentum);
    framework.add_signal_group_to_timeframe("daily", trend);

    let provider = PolygonDataProvider::new(config.polygon_api_key.clone());
    let mut watchlist = Watchlist::new(provider);
    watchlist.add_item("Demo Asset", "DEMO", AssetType::Stock, Some(framework));

    if !config.polygon_api_key.is_empty() {
        watchlist.update_prices().await;
    }

    watchlist.evaluate_frameworks();
    watchlist.perform_backtests(10_000.0);

    println!("Watchlist:");
    watchlist.show();

    if let Some(item) = watchlist.item("DEMO") {
        if let Some(results) = &item.framework_results {
            println!("\nTimeframe statuses:");
            for (timeframe, report) in &results.timeframe_statuses {
                println!("  {timeframe}: {}", report.overall);
                for (group, group_result) in &report.groups {
                    println!("    {group}: {}", group_result.overall);
                }
            }
            println!("Overall status: {}", results.overall_status);
        }
        if let Some(portfolio) = &item.backtest_results {
            println!("\nBacktest:");
            println!("  Final value:   ${:.2}", portfolio.final_value());
            println!("  Total return:  {:.2}%", portfolio.total_return() * 100.0);
            println!("  Trades:        {}", portfolio.trade_count());
            println!("  Max drawdown:  {:.2}%", portfolio.max_drawdown() * 100.0);
        }
    }

    Ok(())
}

/// Synthetic bars: a rising trend with a cyclical swing, enough history to
/// warm up every indicator in the demo strategy.
fn demo_candles(count: usize, minutes_per_bar: i64) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let drift = i as f64 * 0.15;
            let swing = (i as f64 / 9.0).sin() * 4.0;
            let close = 100.0 + drift + swing;
            Candle::new(
                close - 0.4,
                close + 0.8,
                close - 0.9,
                close,
                1_000.0 + (i as f64 * 3.0),
                start + Duration::minutes(minutes_per_bar * i as i64),
            )
        })
        .collect()
}
