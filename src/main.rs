use anyhow::Context;
use clap::Parser;
use dialoguer::{Password, Select};
use faq_search_common::{Action, CatalogCache, Outcome, RecordCatalog, Session};
use faq_search_rust::{attachment, auth, browse, cli, config, render, reporter, source};
use attachment::AttachmentResolver;
use auth::PasswordGate;
use cli::{Cli, Commands};
use config::Config;
use reporter::CsvNoHitLog;
use source::FileSource;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("設定ファイルを読み込めません: {}", config_path.display()))?;

    match cli.command {
        Commands::Categories => {
            println!("📋 分類一覧\n");
            for c in &config.categories {
                let category = c.to_category(&config.data_dir);
                let exists = Path::new(&category.location).exists();
                println!(
                    "  {} {:<12} {} [{}] {}",
                    if exists { "✔" } else { "⚠" },
                    c.id,
                    c.label,
                    c.kind,
                    category.location
                );
            }
        }

        Commands::Search { category, query, mode, json } => {
            let gate = authenticate(&config)?;
            let catalog = load_catalog(&config, &category, &gate)?;
            let mut session = open_session(&config, &gate, catalog)?;
            let mode = mode.unwrap_or(config.search.default_mode);

            let outcome = session.dispatch(Action::Submit { query: query.join(" "), mode })?;
            let Some(results) = session.state().results() else {
                return Ok(());
            };

            if json {
                let records: Vec<_> = results
                    .indices()
                    .iter()
                    .filter_map(|&i| session.catalog().get(i))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                let resolver = AttachmentResolver::new(config.attachments_path());
                render::print_results(session.catalog(), results, &resolver);
                if let Outcome::NoHits { .. } = outcome {
                    println!("（この検索は未ヒット記録に追加されました）");
                }
            }
        }

        Commands::Browse { category } => {
            let gate = authenticate(&config)?;
            let key = match category {
                Some(key) => key,
                None => select_category(&config)?,
            };
            let catalog = load_catalog(&config, &key, &gate)?;
            let mut session = open_session(&config, &gate, catalog)?;
            let resolver = AttachmentResolver::new(config.attachments_path());
            browse::run_browse(&mut session, &resolver)?;
        }

        Commands::Syllabary { category } => {
            let gate = authenticate(&config)?;
            let catalog = load_catalog(&config, &category, &gate)?;
            let session = Session::open(
                &gate,
                catalog,
                config.search.clone(),
                Arc::new(faq_search_common::NullReporter),
            )?;
            println!("📋 {} - 50音索引\n", session.catalog().category().label);
            render::print_syllabary(&faq_search_common::layout(session.catalog().syllabary()));
        }

        Commands::Config { show, data_dir, set_password, clear_password } => {
            let mut changed = false;

            if let Some(dir) = data_dir {
                config.data_dir = dir;
                changed = true;
            }

            if set_password {
                let password = Password::new()
                    .with_prompt("新しいパスワード")
                    .with_confirmation("もう一度入力", "パスワードが一致しません")
                    .interact()?;
                config.password_hash = Some(auth::hash_password(&password));
                changed = true;
            } else if clear_password {
                authenticate(&config)?;
                config.password_hash = None;
                changed = true;
            }

            if changed {
                config.save_to(&config_path)?;
                println!("✔ 設定を保存しました: {}", config_path.display());
            }

            if show || !changed {
                let mut shown = config.clone();
                if shown.password_hash.is_some() {
                    shown.password_hash = Some("********".into());
                }
                println!("設定ファイル: {}\n", config_path.display());
                println!("{}", serde_json::to_string_pretty(&shown)?);
            }
        }

        Commands::NoHits { clear, json } => {
            let log = CsvNoHitLog::new(config.no_hit_log_path());

            if clear {
                if log.clear()? {
                    println!("✔ 未ヒット記録を削除しました: {}", log.path().display());
                } else {
                    println!("未ヒット記録はありません");
                }
                return Ok(());
            }

            let entries = log.entries()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("未ヒット記録はありません");
            } else {
                println!("📋 未ヒット記録（{}件）\n", entries.len());
                for e in &entries {
                    println!("  {}  [{}] {}", e.timestamp, e.category, e.query);
                }
            }
        }
    }

    Ok(())
}

/// ログ出力先は stderr。RUST_LOG があればそれを優先
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 認証済みのゲートでだけデータファイルを読む
fn load_catalog(config: &Config, key: &str, gate: &PasswordGate) -> anyhow::Result<Arc<RecordCatalog>> {
    let category = config.find_category(key)?.to_category(&config.data_dir);
    let cache = CatalogCache::new();
    let catalog = cache
        .get_or_load_for(gate, &category, &FileSource)
        .with_context(|| format!("「{}」のデータを読み込めません", category.label))?;
    println!("✔ {}: {}件", category.label, catalog.len());
    Ok(catalog)
}

/// パスワードが設定されていれば入力させる
fn authenticate(config: &Config) -> anyhow::Result<PasswordGate> {
    let mut gate = PasswordGate::new(config.password_hash.clone());
    if gate.requires_password() {
        let password = Password::new().with_prompt("パスワード").interact()?;
        gate.verify(&password)?;
    }
    Ok(gate)
}

fn open_session(
    config: &Config,
    gate: &PasswordGate,
    catalog: Arc<RecordCatalog>,
) -> anyhow::Result<Session> {
    let reporter = Arc::new(CsvNoHitLog::new(config.no_hit_log_path()));
    Ok(Session::open(gate, catalog, config.search.clone(), reporter)?)
}

fn select_category(config: &Config) -> anyhow::Result<String> {
    let labels: Vec<&str> = config.categories.iter().map(|c| c.label.as_str()).collect();
    let selected = Select::new()
        .with_prompt("分類を選択してください")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(config.categories[selected].id.clone())
}
