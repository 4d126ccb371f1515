//! 매매일지 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 로컬 파일의 월별 손익 집계
//! journal aggregate -i demos/trades.json -g months
//!
//! # 거래가 있는 날만 남기고 단일 포인트 패딩 적용
//! journal aggregate -i demos/trades.json -g days --sparse
//!
//! # 막대 차트 지오메트리 (JSON)
//! journal --format json chart bar -i demos/trades.json -g weeks
//!
//! # 초기 자본 대비 최근 1개월 성과
//! journal performance -i demos/trades.json --capital 10000 --filter last_month
//!
//! # 백엔드 로그인 후 INDIAN 시장 통계
//! journal login -e trader@example.com -p secret
//! journal stats -m INDIAN
//!
//! # 거래 스크린샷 추출 및 저장
//! journal extract --image screenshot.png --save
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};

use journal_analytics::{pad_single_point_with, ChartSlot, TimeFilter};
use journal_cli::commands::analyze::{
    build_chart, build_comparison, build_series, ChartKind, SeriesOptions,
};
use journal_cli::commands::remote::{self, ExtractOptions};
use journal_cli::commands::report::{build_performance, build_stats};
use journal_cli::input::{backend, load_trades, SourceArgs};
use journal_cli::output::{
    emit, format_buckets, format_comparison, format_extraction, format_maintenance,
    format_performance, format_slots, format_stats, print_json, OutputFormat,
};
use journal_cli::session::{open_session, resolve_token};
use journal_client::TradeQuery;
use journal_core::{
    init_logging, journal_span, AppConfig, Currency, Granularity, LogConfig, MarketType,
};

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Trading journal CLI - 기간별 손익 집계와 차트 지오메트리", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (없으면 기본값과 JOURNAL__ 환경변수 사용)
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: PathBuf,

    /// 출력 형식 (table, json)
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// 기준 날짜 (YYYY-MM-DD, 기본: 설정 시간대의 오늘)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 기간별 손익 집계 (빈 기간은 0으로 채움)
    Aggregate {
        /// 집계 단위 (days, weeks, months, quarters)
        #[arg(short, long, default_value = "days")]
        granularity: Granularity,

        /// 거래가 있는 기간만 남기고 단일 포인트를 패딩
        #[arg(long)]
        sparse: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// 단일 데이터 포인트 패딩
    Pad {
        /// 기간 레이블 (예: 2025-06-15)
        #[arg(short, long)]
        label: String,

        /// 값
        #[arg(short, long)]
        value: Decimal,

        /// 전체 슬롯 수 (기본: analytics.pad_slots)
        #[arg(long)]
        slots: Option<usize>,
    },

    /// 차트 지오메트리 계산 (line, bar, pie)
    Chart {
        /// 차트 종류
        #[arg(value_enum)]
        kind: ChartKind,

        /// 집계 단위 (days, weeks, months, quarters)
        #[arg(short, long, default_value = "days")]
        granularity: Granularity,

        /// 거래가 있는 기간만 남기고 단일 포인트를 패딩
        #[arg(long)]
        sparse: bool,

        /// 차트 너비
        #[arg(long, default_value = "600")]
        width: f64,

        /// 차트 높이
        #[arg(long, default_value = "300")]
        height: f64,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// 대시보드 통계
    Stats {
        /// 기간 필터 (all, today, last_week, last_month, last_3months)
        #[arg(short, long, default_value = "all")]
        filter: TimeFilter,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// 초기 자본 대비 성과 계산
    Performance {
        /// 초기 자본금
        #[arg(long)]
        capital: Decimal,

        /// 기간 필터 (all, today, last_week, last_month, last_3months)
        #[arg(short, long, default_value = "all")]
        filter: TimeFilter,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// 현재 기간과 직전 기간 비교
    Compare {
        /// 집계 단위 (days, weeks, months, quarters)
        #[arg(short, long, default_value = "months")]
        granularity: Granularity,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// 백엔드에서 거래 조회 (파일로 저장 가능)
    Fetch {
        /// 시장 필터 (FOREX, INDIAN)
        #[arg(short, long)]
        market: Option<MarketType>,

        /// 최대 건수 (기본: api.default_limit)
        #[arg(long)]
        limit: Option<u32>,

        /// 저장할 JSON 파일 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 백엔드 인증 토큰
        #[arg(long)]
        token: Option<String>,
    },

    /// 거래 스크린샷에서 거래 추출
    Extract {
        /// 이미지 파일
        #[arg(long)]
        image: PathBuf,

        /// 시장 유형 (기본: FOREX)
        #[arg(short, long)]
        market: Option<MarketType>,

        /// 검증을 통과하면 백엔드에 저장
        #[arg(long, default_value = "false")]
        save: bool,

        /// 백엔드 인증 토큰
        #[arg(long)]
        token: Option<String>,
    },

    /// 예정된 시스템 점검 일정
    Maintenance,

    /// 백엔드 로그인 (세션 저장)
    Login {
        /// 이메일
        #[arg(short, long)]
        email: String,

        /// 비밀번호
        #[arg(short, long)]
        password: String,
    },

    /// 저장된 세션 삭제
    Logout,
}

fn currency_for(market: Option<&MarketType>) -> Currency {
    market.map(|m| m.currency()).unwrap_or(Currency::Usd)
}

fn market_label(source: &SourceArgs) -> &str {
    source.market.as_ref().map(|m| m.as_str()).unwrap_or("ALL")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config.display()))?;
    init_logging(LogConfig::from_config(&config.logging))
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    let today = match cli.today {
        Some(today) => today,
        None => config.analytics.today()?,
    };
    let format = cli.format;

    if let Err(e) = run(cli.command, &config, format, today).await {
        error!("Command failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(
    command: Commands,
    config: &AppConfig,
    format: OutputFormat,
    today: NaiveDate,
) -> Result<()> {
    let pad_slots = config.analytics.pad_slots;

    match command {
        Commands::Aggregate {
            granularity,
            sparse,
            source,
        } => {
            let trades = load_trades(&source, config).await?;
            let _span = journal_span!("aggregate", market_label(&source), granularity).entered();
            let currency = currency_for(source.market.as_ref());
            let series = build_series(
                &trades,
                SeriesOptions {
                    granularity,
                    sparse,
                    pad_slots,
                },
                today,
            );
            if sparse {
                emit(format, &series.slots, |s| format_slots(s, currency))?;
            } else {
                emit(format, &series.buckets, |b| format_buckets(b, currency))?;
            }
        }

        Commands::Pad { label, value, slots } => {
            let slots = pad_single_point_with(
                &[ChartSlot::new(label, value)],
                slots.unwrap_or(pad_slots),
            );
            emit(format, &slots, |s| format_slots(s, Currency::Usd))?;
        }

        Commands::Chart {
            kind,
            granularity,
            sparse,
            width,
            height,
            source,
        } => {
            let trades = load_trades(&source, config).await?;
            let _span = journal_span!("chart", market_label(&source), granularity).entered();
            let options = SeriesOptions {
                granularity,
                sparse,
                pad_slots,
            };
            match build_chart(kind, &trades, options, today, width, height) {
                Some(chart) => print_json(&chart)?,
                None => println!("No data to chart"),
            }
        }

        Commands::Stats { filter, source } => {
            let trades = load_trades(&source, config).await?;
            let currency = currency_for(source.market.as_ref());
            let stats = build_stats(&trades, filter, today);
            emit(format, &stats, |s| format_stats(s, currency))?;
        }

        Commands::Performance {
            capital,
            filter,
            source,
        } => {
            let trades = load_trades(&source, config).await?;
            let currency = currency_for(source.market.as_ref());
            let report = build_performance(&trades, capital, filter, today)?;
            emit(format, &report, |r| format_performance(r, currency))?;
        }

        Commands::Compare {
            granularity,
            source,
        } => {
            let trades = load_trades(&source, config).await?;
            let _span = journal_span!("compare", market_label(&source), granularity).entered();
            let currency = currency_for(source.market.as_ref());
            match build_comparison(&trades, granularity, today) {
                Some(cmp) => emit(format, &cmp, |c| format_comparison(c, currency))?,
                None => println!("Not enough periods to compare"),
            }
        }

        Commands::Fetch {
            market,
            limit,
            output,
            token,
        } => {
            let api = backend(config, resolve_token(token, config))?;
            let query = market.map(|m| {
                let query = TradeQuery::new(m);
                match limit {
                    Some(limit) => query.with_limit(limit),
                    None => query,
                }
            });
            let trades = remote::fetch(&api, query.as_ref()).await?;
            match output {
                Some(path) => {
                    let json = serde_json::to_string_pretty(&trades)?;
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Saved {} trades to {}", trades.len(), path.display());
                    println!("Saved {} trades to {}", trades.len(), path.display());
                }
                None => print_json(&trades)?,
            }
        }

        Commands::Extract {
            image,
            market,
            save,
            token,
        } => {
            let api = backend(config, resolve_token(token, config))?;
            let now = Utc::now()
                .with_timezone(&config.analytics.tz()?)
                .naive_local();
            let report =
                remote::extract(&api, &image, &ExtractOptions { market, save }, now).await?;
            emit(format, &report, format_extraction)?;
            if save {
                println!("Saved {} trades", report.valid.len());
            }
        }

        Commands::Maintenance => {
            let api = backend(config, None)?;
            let windows = remote::upcoming(&api).await?;
            emit(format, &windows, |w| format_maintenance(w))?;
        }

        Commands::Login { email, password } => {
            let api = backend(config, None)?;
            let mut manager = open_session(config);
            let user = remote::login(&api, &mut manager, &email, &password).await?;
            println!("Logged in as {}", user.display_name());

            if let Some(windows) = remote::maintenance_banner(&api, &mut manager).await {
                println!("\nScheduled maintenance:\n{}", format_maintenance(&windows));
            }
        }

        Commands::Logout => {
            let mut manager = open_session(config);
            if remote::logout(&mut manager) {
                println!("Logged out");
            } else {
                println!("No active session");
            }
        }
    }

    Ok(())
}
