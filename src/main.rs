// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: GPL-3.0-only

use clap::Parser;

mod constants;

mod search;

mod ui;

mod app_record;

mod catalog_logic;

mod cli;
use cli::Cli;

use config::Config;
mod config;

mod host;

mod loader;
use loader::{CatalogLoader, CatalogSource};

mod localize;

mod placeholder;

use state::{FileStore, KeyValueStore, MemoryStore, UiState};
mod state;

fn catalog_source(cli: &Cli, config: &Config) -> CatalogSource {
    if let Some(path) = &cli.file {
        CatalogSource::File(path.clone())
    } else if let Some(base_url) = cli.base_url.as_ref().or(config.base_url.as_ref()) {
        CatalogSource::Remote(base_url.clone())
    } else {
        CatalogSource::None
    }
}

fn state_store() -> Box<dyn KeyValueStore> {
    match FileStore::user() {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("remembered choices will not be saved: {}", err);
            Box::new(MemoryStore::default())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    localize::localize();

    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            log::info!("errors loading config: {}", err);
            Config::default()
        }
    };
    if let Some(root_domain) = &cli.root_domain {
        config.root_domain = root_domain.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.fetch_timeout_secs = timeout;
    }

    let mut state = UiState::load(state_store());
    if cli.reset {
        state.reset();
    }
    if let Some(query) = &cli.query {
        state.set_query(query.clone());
    }
    if let Some(category) = &cli.category {
        state.set_category(category.clone());
    }
    if let Some(sort_mode) = cli.sort {
        state.set_sort_mode(sort_mode);
    }
    if let Some(view_mode) = cli.view {
        state.set_view_mode(view_mode);
    }

    let mut loader = CatalogLoader::new(catalog_source(&cli, &config), config.fetch_timeout());
    if cli.no_proxy {
        loader = loader.no_proxy();
    }

    if !cli.json {
        eprintln!("{}", fl!("loading"));
    }
    let handle = loader::spawn_load(loader);
    let cancel = handle.cancel_flag();
    let loaded = tokio::select! {
        loaded = handle.wait() => loaded,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            None
        }
    };
    let Some(loaded) = loaded else {
        eprintln!("{}", fl!("interrupted"));
        return Ok(());
    };

    let query = state.catalog_query(&config.root_domain);
    let derived = catalog_logic::derive(&loaded.apps, &query);

    if cli.json {
        println!(
            "{}",
            ui::render_json(
                &loaded,
                &derived,
                state.sort_mode(),
                state.view_mode(),
                &config.root_domain,
            )?
        );
    } else {
        print!("{}", ui::render_text(&loaded, &derived, state.view_mode()));
    }

    Ok(())
}
