use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fstore",
    about = "Inspect and edit a file-backed key-value store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML store configuration.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use `<DIR>/store` as the store directory.
    #[arg(short = 'w', long, global = true, conflicts_with = "config")]
    pub working_dir: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a JSON value under a key
    Set(SetArgs),
    /// Print the value stored under a key
    Get(KeyArgs),
    /// Report whether a key holds a value
    Exist(KeyArgs),
    /// List the keys directly below a prefix
    Keys(KeysArgs),
    /// Delete a key or, recursively, a whole prefix
    Delete(DeleteArgs),
    /// Show the state categories this store serves
    Types,
}

#[derive(Args)]
pub struct SetArgs {
    pub key: String,
    /// Value as JSON text, e.g. '{"replicas": 3}'.
    pub value: String,
}

#[derive(Args)]
pub struct KeyArgs {
    pub key: String,
}

#[derive(Args)]
pub struct KeysArgs {
    /// Prefix to list; the store root when omitted.
    #[arg(default_value = "")]
    pub prefix: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub key: String,
    #[arg(short, long)]
    pub recursive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_set() {
        let cli = Cli::try_parse_from(["fstore", "set", "apps/web", "{\"replicas\":3}"]).unwrap();
        if let Command::Set(args) = cli.command {
            assert_eq!(args.key, "apps/web");
            assert_eq!(args.value, "{\"replicas\":3}");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_set_requires_value() {
        assert!(Cli::try_parse_from(["fstore", "set", "apps/web"]).is_err());
    }

    #[test]
    fn parse_get() {
        let cli = Cli::try_parse_from(["fstore", "get", "apps/web"]).unwrap();
        if let Command::Get(args) = cli.command {
            assert_eq!(args.key, "apps/web");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_exist() {
        let cli = Cli::try_parse_from(["fstore", "exist", "k"]).unwrap();
        assert!(matches!(cli.command, Command::Exist(_)));
    }

    #[test]
    fn parse_keys_defaults_to_root() {
        let cli = Cli::try_parse_from(["fstore", "keys"]).unwrap();
        if let Command::Keys(args) = cli.command {
            assert_eq!(args.prefix, "");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_keys_with_prefix() {
        let cli = Cli::try_parse_from(["fstore", "keys", "apps"]).unwrap();
        if let Command::Keys(args) = cli.command {
            assert_eq!(args.prefix, "apps");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_delete_recursive() {
        let cli = Cli::try_parse_from(["fstore", "delete", "-r", "apps"]).unwrap();
        if let Command::Delete(args) = cli.command {
            assert!(args.recursive);
            assert_eq!(args.key, "apps");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_delete_single() {
        let cli = Cli::try_parse_from(["fstore", "delete", "apps/web"]).unwrap();
        if let Command::Delete(args) = cli.command {
            assert!(!args.recursive);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_types() {
        let cli = Cli::try_parse_from(["fstore", "types"]).unwrap();
        assert!(matches!(cli.command, Command::Types));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "fstore", "keys", "--config", "/etc/fstore.toml", "-v", "--format", "json",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/fstore.toml")));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn parse_working_dir() {
        let cli = Cli::try_parse_from(["fstore", "-w", "/srv/app", "types"]).unwrap();
        assert_eq!(cli.working_dir, Some(PathBuf::from("/srv/app")));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn config_conflicts_with_working_dir() {
        assert!(Cli::try_parse_from(["fstore", "-c", "a.toml", "-w", "/srv", "types"]).is_err());
    }

    #[test]
    fn parse_unknown_command_fails() {
        assert!(Cli::try_parse_from(["fstore", "compact"]).is_err());
    }
}
