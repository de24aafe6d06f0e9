use chrono::Local;
use clap::Parser;
use newsdesk::application::{init::init, ConfigService, NewsStore};
use newsdesk::cli::{
    format_record_detail, format_record_list, format_save_outcome, output::describe_publish, Cli,
    Commands, RecordForm,
};
use newsdesk::domain::{CommitMessage, NewsRecord};
use newsdesk::error::NewsdeskError;
use newsdesk::infrastructure::{Config, LoadSource, Workspace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    // NEWSDESK_LOG takes the usual filter syntax, e.g. "newsdesk=debug"
    let filter = EnvFilter::try_from_env("NEWSDESK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Discover the workspace and open its store.
/// Publishing happens when the config enables it and `--no-publish` was not given;
/// the busy line is printed only once a write is about to be pushed.
fn open_store(no_publish: bool) -> Result<(Workspace, Config, NewsStore), NewsdeskError> {
    let workspace = Workspace::discover()?;
    let config = workspace.load_config()?;
    let publish = config.publish.enabled && !no_publish;

    let remote = config.publish.remote.clone();
    let store = NewsStore::open(&workspace, &config, publish)?
        .on_publish(move || eprintln!("Publishing to '{}'...", remote));

    if let LoadSource::Corrupt(reason) = store.load_source() {
        eprintln!(
            "Warning: {} could not be read ({}); starting from an empty news list.\n\
             The unreadable file is kept as {}.corrupt when the list is next saved.",
            config.data_file, reason, config.data_file
        );
    }

    Ok((workspace, config, store))
}

fn run(cli: Cli) -> Result<(), NewsdeskError> {
    match cli.command {
        Commands::Init {
            path,
            data_file,
            no_publish,
        } => {
            let config = init(&path, data_file, !no_publish)?;
            println!("Initialized newsdesk workspace at {}", path.display());
            println!("Data file: {}", config.data_file);
            Ok(())
        }
        Commands::Add {
            fields,
            featured,
            no_publish,
        } => {
            let (workspace, config, mut store) = open_store(no_publish)?;
            let assets = workspace.assets(&config);

            let fields = RecordForm::new(&assets).new_record(fields, Local::now().date_naive())?;
            let outcome = store.create_record(fields, featured)?;

            println!("{}", format_save_outcome("Added", &outcome));
            Ok(())
        }
        Commands::Edit {
            id,
            new_id,
            fields,
            clear_secondary_image,
            featured,
            not_featured,
            no_publish,
        } => {
            let (workspace, config, mut store) = open_store(no_publish)?;
            let assets = workspace.assets(&config);

            let current: NewsRecord = store
                .get(&id)
                .cloned()
                .ok_or_else(|| NewsdeskError::NotFound(id.clone()))?;
            let mark = if featured {
                true
            } else if not_featured {
                false
            } else {
                store.is_featured(&id)
            };

            let record = RecordForm::new(&assets).edited_record(
                &current,
                new_id,
                fields,
                clear_secondary_image,
            )?;
            let outcome = store.update_record(&id, record, mark)?;

            println!("{}", format_save_outcome("Updated", &outcome));
            Ok(())
        }
        Commands::Remove { id, no_publish } => {
            let (_workspace, _config, mut store) = open_store(no_publish)?;
            let outcome = store.remove_record(&id)?;
            println!("{}", format_save_outcome("Removed", &outcome));
            Ok(())
        }
        Commands::List { featured } => {
            let (_workspace, _config, store) = open_store(true)?;
            let records = if featured {
                store.featured_records()
            } else {
                store.records().iter().collect()
            };
            print!("{}", format_record_list(&records, store.document()));
            if records.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Show { id } => {
            let (_workspace, _config, store) = open_store(true)?;
            let record = store
                .get(&id)
                .ok_or_else(|| NewsdeskError::NotFound(id.clone()))?;
            print!("{}", format_record_detail(record, store.is_featured(&id)));
            Ok(())
        }
        Commands::Publish { message } => {
            let (_workspace, config, mut store) = open_store(false)?;
            if !config.publish.enabled {
                return Err(NewsdeskError::Config(
                    "Publishing is disabled. Enable it with: newsdesk config publish.enabled true"
                        .to_string(),
                ));
            }

            let outcome = store.republish(&CommitMessage::publish(message.as_deref()))?;
            println!("Published {} ({})", config.data_file, describe_publish(&outcome));
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let workspace = Workspace::discover()?;
            let service = ConfigService::new(workspace);

            if list {
                for (key, value) in service.list()? {
                    println!("{} = {}", key, value);
                }
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: newsdesk config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: {}",
                    newsdesk::application::manage_config::CONFIG_KEYS.join(", ")
                );
                Ok(())
            }
        }
    }
}
