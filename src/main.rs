use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use clap::{CommandFactory, Parser};

use arcdex::cards::{self, CardPrinter};
use arcdex::config::AppConfig;
use arcdex::core::events::upcoming_events;
use arcdex::core::logging;
use arcdex::core::search::{search_in, select, SearchQuery};
use arcdex::core::store::{LoadedRecords, RecordStore};
use arcdex::core::update::{spawn_version_check, UpdateChecker};
use arcdex::core::value::ValueResolver;

/// Exit code when the data directory is absent.
const EXIT_NO_DATA: u8 = 2;

#[derive(Parser, Debug)]
#[command(version, about = "Look up ARC Raiders items, quests, ARCs and events")]
struct Cli {
    /// Show the next occurrence of every map event instead of searching.
    #[arg(long, conflicts_with = "words")]
    events: bool,

    /// Search words. A trailing number picks that entry from the result list.
    #[arg(value_name = "QUERY")]
    words: Vec<String>,
}

enum Request {
    Events,
    Lookup {
        query: SearchQuery,
        selection: Option<usize>,
    },
}

impl Cli {
    /// `None` when there is nothing to search for.
    fn request(&self) -> Option<Request> {
        if self.events {
            return Some(Request::Events);
        }
        let (words, selection) = split_selection(&self.words);
        let query = SearchQuery::parse(&words.join(" ")).ok()?;
        Some(Request::Lookup { query, selection })
    }
}

/// Treat a trailing positive integer as the selection when other words
/// precede it.
fn split_selection(words: &[String]) -> (&[String], Option<usize>) {
    match words.split_last() {
        Some((last, rest)) if !rest.is_empty() => match last.parse::<usize>() {
            Ok(index) if index > 0 => (rest, Some(index)),
            _ => (words, None),
        },
        _ => (words, None),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init(&logging::default_log_dir());
    log::info!("{} v{} starting", arcdex::NAME, arcdex::VERSION);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let Some(request) = cli.request() else {
        Cli::command().print_help().context("Failed to print usage")?;
        return Ok(ExitCode::FAILURE);
    };

    let config = AppConfig::load();

    let pending = config.update.enabled.then(|| {
        let checker = UpdateChecker::new(config.update.release_url.clone(), config.update.timeout());
        spawn_version_check(checker, arcdex::VERSION)
    });

    let mut store = RecordStore::new(config.data_dir());
    if let Some(cache_file) = config.cache_file() {
        store = store.with_cache(cache_file);
    }

    let load = move || {
        let _span =
            tracing::info_span!("record_load", root = %store.data_root().display()).entered();
        store.open()
    };

    let loaded: LoadedRecords = match tokio::task::spawn_blocking(load)
        .await
        .context("Record load task failed")?
    {
        Ok(loaded) => loaded,
        Err(e) if e.is_missing_data() => {
            eprintln!("{e}");
            eprintln!(
                "Point {} (or data.data_dir in the config file) at a checkout of the game data.",
                arcdex::config::DATA_DIR_ENV
            );
            return Ok(ExitCode::from(EXIT_NO_DATA));
        }
        Err(e) => return Err(e).context("Failed to load records"),
    };

    if !loaded.report.skipped.is_empty() {
        log::warn!("{} data files were skipped", loaded.report.skipped.len());
    }

    let records = &loaded.records;
    let printer = CardPrinter::new(ValueResolver::with_language(records, &config.data.language));

    let code = match request {
        Request::Events => {
            println!("{}", printer.events(&upcoming_events(&records.events, Utc::now())));
            ExitCode::SUCCESS
        }
        Request::Lookup { query, selection } => {
            let hits = search_in(&query, records, &config.data.language);
            match (hits.len(), selection) {
                (0, _) => {
                    println!("No results for \"{}\".", query.as_str());
                    ExitCode::SUCCESS
                }
                (_, Some(index)) => match select(&hits, index) {
                    Some(hit) => {
                        println!("{}", printer.hit(hit));
                        ExitCode::SUCCESS
                    }
                    None => {
                        eprintln!("Selection {index} is out of range (1-{}).", hits.len());
                        ExitCode::FAILURE
                    }
                },
                (1, None) => {
                    println!("{}", printer.hit(&hits[0]));
                    ExitCode::SUCCESS
                }
                (_, None) => {
                    println!("{}", printer.hit_list(&hits));
                    ExitCode::SUCCESS
                }
            }
        }
    };

    if let Some(pending) = pending {
        if let Some(notice) = pending.take_if_ready().await {
            eprintln!("{}", cards::update_notice(&notice));
        }
    }

    Ok(code)
}
