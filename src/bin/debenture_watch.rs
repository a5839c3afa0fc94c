use debenture_watch::config::{Config, DEFAULT_WATCH_LIST};
use debenture_watch::notify::{self, LogSink};
use debenture_watch::scrapers::anbima::AnbimaScraper;
use debenture_watch::scrapers::base::MarketSource;
use debenture_watch::services::run_service::RunService;
use debenture_watch::store::history::History;
use debenture_watch::store::IncrementalStore;

use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use clap::{App, Arg, ArgMatches, SubCommand};
use log::{error, info};
use std::sync::Arc;

fn data_dir_arg<'a>() -> Arg<'a> {
    Arg::with_name("data-dir")
        .short('d')
        .long("data-dir")
        .value_name("DIR")
        .help("Directory holding the CSV history and the report log")
        .takes_value(true)
        .default_value(".")
}

fn build_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = Config::new().with_data_dir(matches.value_of("data-dir").unwrap_or("."));

    if let Some(codes) = matches.values_of("watch") {
        let codes: Vec<String> = codes
            .flat_map(|v| v.split(','))
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        config = config.with_watch_list(codes);
    }

    if let Some(tz) = matches.value_of("timezone") {
        let tz: Tz = tz.parse().map_err(|e| anyhow!("Unknown timezone {}: {}", tz, e))?;
        config = config.with_timezone(tz);
    }

    if let Some(secs) = matches.value_of("timeout") {
        let secs = secs.parse::<u64>().context("Invalid --timeout")?;
        config = config.with_request_timeout_secs(secs);
    }

    Ok(config)
}

async fn run_capture(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = build_config(matches)?;
    info!("Watching {} debentures: {}", config.watch_list.len(), config.watch_list.join(", "));

    let source: Arc<dyn MarketSource + Send + Sync> = Arc::new(AnbimaScraper::new(&config)?);
    let service = RunService::new(config, source);

    let report = service.run().await?;

    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }

    if !matches.is_present("no-notify") {
        if let Err(e) = notify::notify_if_needed(&LogSink, &report, service.report_log().path()) {
            error!("Notification failed: {}", e);
        }
    }

    Ok(())
}

fn parse_limit(value: Option<&str>) -> anyhow::Result<usize> {
    value
        .unwrap_or("10")
        .parse::<usize>()
        .with_context(|| format!("Invalid --limit {:?}", value.unwrap_or_default()))
}

fn explore(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = Config::new().with_data_dir(matches.value_of("data-dir").unwrap_or("."));
    let limit = parse_limit(matches.value_of("limit"))?;

    let store = IncrementalStore::new(config.store_path());
    let history = History::load(&store)
        .with_context(|| format!("Reading {}", store.path().display()))?;

    info!("Found {} records in {}", history.len(), store.path().display());

    let codes: Vec<&str> = match matches.value_of("code") {
        Some(code) => vec![code],
        None => history.codes(),
    };

    for code in codes {
        let series = history.series(code);
        match history.latest(code) {
            Some(latest) => println!("{} - {}", latest.code, latest.name),
            None => {
                println!("No records for {}", code);
                continue;
            }
        }
        println!("{:-<60}", "");
        println!("{:<12} {:<14} {:<12} {:<10}", "Date", "Unit price", "Indicative", "Duration");
        println!("{:-<60}", "");

        let skip = series.len().saturating_sub(limit);
        for record in series.iter().skip(skip) {
            println!(
                "{:<12} {:<14} {:<12} {:<10}",
                record.date, record.unit_price, record.indicative_rate, record.duration
            );
        }
        if skip > 0 {
            println!("... and {} earlier records", skip);
        }
        println!();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let default_watch = DEFAULT_WATCH_LIST.join(",");

    let app = App::new("debenture_watch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Captures ANBIMA secondary-market debenture quotes into a CSV history")
        .subcommand(
            SubCommand::with_name("run")
                .about("Fetch the latest table if it is newer than the local history")
                .arg(data_dir_arg())
                .arg(
                    Arg::with_name("watch")
                        .short('w')
                        .long("watch")
                        .value_name("CODES")
                        .help("Debenture codes to capture, comma separated")
                        .takes_value(true)
                        .multiple_occurrences(true)
                        .default_value(&default_watch),
                )
                .arg(
                    Arg::with_name("timezone")
                        .long("timezone")
                        .value_name("TZ")
                        .help("Publisher time zone used for the freshness check")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("timeout")
                        .long("timeout")
                        .value_name("SECONDS")
                        .help("Timeout of each HTTP request")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .help("Print the run report as JSON")
                        .takes_value(false),
                )
                .arg(
                    Arg::with_name("no-notify")
                        .long("no-notify")
                        .help("Do not raise an alert for incomplete runs")
                        .takes_value(false),
                ),
        )
        .subcommand(
            SubCommand::with_name("explore")
                .about("Show the captured history")
                .arg(data_dir_arg())
                .arg(
                    Arg::with_name("code")
                        .short('c')
                        .long("code")
                        .value_name("CODE")
                        .help("Debenture code to show")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("limit")
                        .short('l')
                        .long("limit")
                        .value_name("LIMIT")
                        .help("Number of most recent records per code")
                        .takes_value(true)
                        .default_value("10"),
                ),
        );

    let matches = app.get_matches();

    if let Some(matches) = matches.subcommand_matches("run") {
        run_capture(matches).await?;
    } else if let Some(matches) = matches.subcommand_matches("explore") {
        explore(matches)?;
    } else {
        info!("No command specified. Use --help for usage information.");
    }

    Ok(())
}
