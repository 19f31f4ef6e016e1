use std::error::Error;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use portal_router::config::HistoryKind;
use portal_router::routing::{
    HistoryMode, MatchOptions, NavigationTarget, Router, RouterOptions,
};

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Inspect the portal route table", long_about = None)]
struct Cli {
    /// History mode used to build hrefs.
    #[arg(long, value_enum, default_value = "web")]
    history: HistoryArg,

    /// Base URL the application is served under.
    #[arg(short, long, default_value = "/", env = "BASE_URL")]
    base: String,

    /// Compare static segments case-sensitively.
    #[arg(long)]
    sensitive: bool,

    /// Reject trailing slashes the route does not declare.
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum HistoryArg {
    Web,
    Hash,
}

impl From<HistoryArg> for HistoryKind {
    fn from(arg: HistoryArg) -> Self {
        match arg {
            HistoryArg::Web => HistoryKind::Web,
            HistoryArg::Hash => HistoryKind::Hash,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in match order
    Routes,
    /// Resolve a path to its route
    Resolve { path: String },
    /// Build the href for a named route
    Href {
        name: String,
        /// Route parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
        /// Query pair as key=value (repeatable)
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", s))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let history = match HistoryKind::from(cli.history) {
        HistoryKind::Web => HistoryMode::web(&cli.base),
        HistoryKind::Hash => HistoryMode::hash(&cli.base),
    };
    let router = Router::portal(RouterOptions {
        history,
        matching: MatchOptions {
            strict: cli.strict,
            sensitive: cli.sensitive,
        },
    })?;

    let output: Value = match cli.command {
        Commands::Routes => router
            .table()
            .iter()
            .map(|route| {
                json!({
                    "name": route.name,
                    "path": route.path,
                    "component": route.view.component_name(),
                })
            })
            .collect(),
        Commands::Resolve { path } => serde_json::to_value(router.resolve_path(&path)?)?,
        Commands::Href {
            name,
            params,
            query,
        } => {
            let mut target = NavigationTarget::named(name);
            for (key, value) in params {
                target = target.with_param(key, value);
            }
            for (key, value) in query {
                target = target.with_query(key, value);
            }
            json!({ "href": router.href(&target)? })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("k=v"), Ok(("k".to_string(), "v".to_string())));
        assert_eq!(parse_key_value("k="), Ok(("k".to_string(), String::new())));
        assert_eq!(
            parse_key_value("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
        assert_eq!(
            parse_key_value("kv"),
            Err("expected key=value, got `kv`".to_string())
        );
    }
}
