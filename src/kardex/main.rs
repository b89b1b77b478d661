use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use kardex::cache::FileCache;
use kardex::commands::{self, config::ConfigAction, edit::FieldOverrides, CmdResult};
use kardex::config::KardexConfig;
use kardex::confirm::TerminalPrompt;
use kardex::error::{KardexError, Result};
use kardex::model::{FilterCriteria, ProductForm, ProductId};
use kardex::remote::HttpApi;
use kardex::store::{ProductStore, SystemClock};
use kardex::view::CatalogView;
use std::time::Duration;

mod args;
mod render;

use args::{Cli, Commands};
use render::{print_messages, print_product_detail, TerminalRenderer};

type AppView = CatalogView<HttpApi, FileCache, SystemClock, TerminalRenderer>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(result) => {
            if result.has_errors() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{}", format!("Error: {e}").red());
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "kardex=debug" } else { "kardex=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    // logs go to stderr so they never interleave with the rendered catalog
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<CmdResult> {
    let dirs = project_dirs()?;
    let config = KardexConfig::load(dirs.config_dir()).unwrap_or_default();

    // config management needs no catalog context
    if let Some(Commands::Config { key, value }) = &cli.command {
        return run_config(&dirs, key.as_deref(), value.clone());
    }

    let page_size = match &cli.command {
        Some(Commands::List {
            page_size: Some(size),
            ..
        }) => *size,
        _ => config.page_size,
    };

    let mut view = init_view(&cli, &config, &dirs, page_size)?;
    view.initialize().await;

    let result = match cli.command {
        Some(Commands::List {
            category,
            search,
            sort,
            page,
            ..
        }) => {
            let criteria = FilterCriteria {
                category,
                search,
                sort: sort.map(Into::into),
            };
            commands::list::run(&mut view, criteria, page)
        }
        None => commands::list::run(&mut view, FilterCriteria::default(), 1),
        Some(Commands::Add {
            title,
            description,
            price,
            discount,
            category,
            image,
        }) => {
            let form = ProductForm {
                title,
                description,
                price,
                discount,
                category,
                image,
            };
            commands::add::run(&mut view, &form).await
        }
        Some(Commands::Edit {
            id,
            title,
            description,
            price,
            discount,
            category,
            image,
        }) => {
            let overrides = FieldOverrides {
                title,
                description,
                price,
                discount,
                category,
                image,
            };
            commands::edit::run(&mut view, &ProductId::new(id), &overrides).await
        }
        Some(Commands::Remove { id, yes }) => {
            let mut gate = TerminalPrompt::new();
            commands::remove::run(&mut view, &mut gate, &ProductId::new(id), yes).await?
        }
        Some(Commands::Show { id }) => {
            let result = commands::show::run(&view, &ProductId::new(id));
            for product in &result.affected_products {
                print_product_detail(product);
            }
            result
        }
        Some(Commands::Refresh) => commands::refresh::run(&mut view).await,
        Some(Commands::Config { .. }) => unreachable!("handled before context setup"),
    };

    print_messages(&result.messages);
    Ok(result)
}

fn run_config(dirs: &ProjectDirs, key: Option<&str>, value: Option<String>) -> Result<CmdResult> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key.to_string()),
        (Some(key), Some(value)) => ConfigAction::Set(key.to_string(), value),
    };

    let result = commands::config::run(dirs.config_dir(), action)?;
    if let Some(config) = &result.config {
        println!("api-url = {}", config.api_url);
        println!("page-size = {}", config.page_size);
        println!("timeout-secs = {}", config.timeout_secs);
        println!("cache-max-age-secs = {}", config.cache_max_age_secs);
    }
    print_messages(&result.messages);
    Ok(result)
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("io", "kardex", "kardex")
        .ok_or_else(|| KardexError::Config("Could not determine the platform directories".into()))
}

fn init_view(
    cli: &Cli,
    config: &KardexConfig,
    dirs: &ProjectDirs,
    page_size: usize,
) -> Result<AppView> {
    let api_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.api_url.clone());
    let api = HttpApi::new(api_url, Duration::from_secs(config.timeout_secs))?;
    let cache = FileCache::new(dirs.cache_dir().to_path_buf());
    let store = ProductStore::new(api, cache, SystemClock)
        .with_max_cache_age(chrono::Duration::seconds(config.cache_max_age_secs as i64));
    Ok(CatalogView::new(store, TerminalRenderer::new(), page_size))
}
