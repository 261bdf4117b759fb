// command line interface

use crate::output::Output;
use crate::settings::{Service, Settings, SettingsStore};
use crate::{Classifier, PageRequest, Server};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pageintent", about = "Summarize a web page and guess why it was opened")]
struct Cli {
    /// settings file (defaults to <config dir>/pageintent/settings.json)
    #[arg(long, env = "PAGEINTENT_SETTINGS", global = true)]
    settings: Option<PathBuf>,

    /// debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// classify a single page
    Classify {
        /// page url
        #[arg(long, short)]
        url: String,

        /// page title
        #[arg(long, short, default_value = "")]
        title: String,

        /// page text
        #[arg(long, short, conflicts_with = "file")]
        content: Option<String>,

        /// read page text from a file
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// print json instead of text
        #[arg(long)]
        raw: bool,
    },

    /// check that the api key works
    Test {
        /// service to test (openai, anthropic, gemini)
        #[arg(long, short)]
        service: Option<Service>,

        /// api key, instead of the saved one
        #[arg(long, short = 'k', env = "PAGEINTENT_API_KEY")]
        api_key: Option<String>,

        /// model, instead of the saved one
        #[arg(long, short)]
        model: Option<String>,
    },

    /// list known models
    Models {
        /// only this service
        service: Option<Service>,
    },

    /// show or change saved settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// start as http server
    Serve {
        /// port number
        #[arg(long, short, default_value = "3000")]
        port: u16,

        /// host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// print current settings, key masked
    Show,

    /// update one or more settings
    Set {
        #[arg(long)]
        service: Option<Service>,

        #[arg(long, short = 'k')]
        api_key: Option<String>,

        #[arg(long)]
        model: Option<String>,

        /// keep page content on this machine
        #[arg(long)]
        offline: Option<bool>,

        #[arg(long)]
        collect_stats: Option<bool>,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = match cli.settings {
        Some(path) => path,
        None => SettingsStore::default_path()?,
    };
    let store = SettingsStore::new(path);

    match cli.command {
        Commands::Classify {
            url,
            title,
            content,
            file,
            raw,
        } => {
            let content = match (content, file) {
                (Some(content), _) => content,
                (None, Some(file)) => std::fs::read_to_string(&file).into_diagnostic()?,
                (None, None) => String::new(),
            };

            // fresh read, settings may have changed since the last run
            let settings = store.load()?;
            let page = PageRequest::new(content, url, title);
            let result = Classifier::new().classify(&page, &settings).await;

            if raw {
                Output::raw(&result);
            } else {
                Output::pretty(&result);
            }
            Ok(())
        }

        Commands::Test {
            service,
            api_key,
            model,
        } => {
            let mut config = store.load()?.ai_settings;
            if let Some(service) = service
                && service != config.service
            {
                config.service = service;
                config.model = service.default_model().to_string();
            }
            if let Some(key) = api_key {
                config.api_key = key;
            }
            if let Some(model) = model {
                config.model = model;
            }

            let report = Classifier::new().test_connection(&config).await;
            Output::connection(&report);
            if report.ok {
                Ok(())
            } else {
                Err(miette::miette!("connection test failed"))
            }
        }

        Commands::Models { service } => {
            match service {
                Some(service) => Output::models(&[service]),
                None => Output::models(&Service::ALL),
            }
            Ok(())
        }

        Commands::Settings { action } => match action {
            SettingsAction::Show => {
                Output::settings(&store.load()?);
                Ok(())
            }
            SettingsAction::Set {
                service,
                api_key,
                model,
                offline,
                collect_stats,
            } => {
                let mut settings = store.load()?;
                apply_changes(&mut settings, service, api_key, model, offline, collect_stats);
                store.save(&settings)?;
                println!("settings saved to {}", store.path().display());
                Ok(())
            }
        },

        Commands::Serve { port, host } => Ok(Server::run(store, &host, port).await?),
    }
}

// switching service without naming a model picks that service's first model
fn apply_changes(
    settings: &mut Settings,
    service: Option<Service>,
    api_key: Option<String>,
    model: Option<String>,
    offline: Option<bool>,
    collect_stats: Option<bool>,
) {
    let ai = &mut settings.ai_settings;
    if let Some(service) = service
        && service != ai.service
    {
        ai.service = service;
        ai.model = service.default_model().to_string();
    }
    if let Some(key) = api_key {
        ai.api_key = key;
    }
    if let Some(model) = model {
        ai.model = model;
    }

    let privacy = &mut settings.privacy_settings;
    if let Some(offline) = offline {
        privacy.offline_mode = offline;
    }
    if let Some(collect_stats) = collect_stats {
        privacy.collect_stats = collect_stats;
    }
}

// logs go to stderr so --raw output stays clean
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
