use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::Value;
use tracing::debug;

use fstore_store::{Encoding, FileStore, Store, StoreConfig, StorePlugin};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    debug!(directory = %config.directory.display(), encoding = %config.encoding, "resolved store configuration");

    let plugin = StorePlugin::load(&config)
        .with_context(|| format!("opening store at {}", config.directory.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli.command, plugin.store(), cli.format, &mut out)
}

fn resolve_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    if let Some(path) = &cli.config {
        return load_config(path);
    }
    let working_dir = match &cli.working_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("reading current directory")?,
    };
    Ok(StoreConfig::from_working_directory(working_dir))
}

fn load_config(path: &Path) -> anyhow::Result<StoreConfig> {
    StoreConfig::load(path).with_context(|| format!("loading config {}", path.display()))
}

pub fn execute(
    command: Command,
    store: &FileStore,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::Set(args) => cmd_set(store, args, out),
        Command::Get(args) => cmd_get(store, args, format, out),
        Command::Exist(args) => {
            writeln!(out, "{}", store.exist(&args.key)?)?;
            Ok(())
        }
        Command::Keys(args) => cmd_keys(store, args, format, out),
        Command::Delete(args) => cmd_delete(store, args, out),
        Command::Types => cmd_types(store, format, out),
    }
}

fn cmd_set(store: &FileStore, args: SetArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let value: Value = serde_json::from_str(&args.value)
        .with_context(|| format!("value for {} is not valid JSON", args.key))?;
    store.set(&args.key, &value)?;
    writeln!(out, "{} stored {}", "✓".green().bold(), args.key.bold())?;
    Ok(())
}

fn cmd_get(
    store: &FileStore,
    args: KeyArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    // bincode values carry no type information to rebuild JSON from.
    if *store.codec() == Encoding::Bincode {
        bail!("get prints JSON and cannot read bincode-encoded values");
    }
    let Some(value) = store.get::<Value>(&args.key)? else {
        bail!("no value stored under {}", args.key);
    };
    let text = match format {
        OutputFormat::Text => serde_json::to_string_pretty(&value)?,
        OutputFormat::Json => serde_json::to_string(&value)?,
    };
    writeln!(out, "{text}")?;
    Ok(())
}

fn cmd_keys(
    store: &FileStore,
    args: KeysArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let keys = store.keys(&args.prefix)?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&keys)?)?,
        OutputFormat::Text => {
            for key in &keys {
                writeln!(out, "{key}")?;
            }
        }
    }
    Ok(())
}

fn cmd_delete(store: &FileStore, args: DeleteArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    store.delete(&args.key, args.recursive)?;
    let what = if args.recursive { "deleted tree" } else { "deleted" };
    writeln!(out, "{} {} {}", "✓".green().bold(), what, args.key.bold())?;
    Ok(())
}

fn cmd_types(store: &FileStore, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    let types = store.types();
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(types)?)?,
        OutputFormat::Text => {
            for t in types {
                writeln!(out, "{t}")?;
            }
        }
    }
    Ok(())
}
