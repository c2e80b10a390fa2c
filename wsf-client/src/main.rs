use std::process::ExitCode;

use futures::future::join_all;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wsf_client::{ClientConfig, ClientOptions, Params, Service, WsfClient};

const USAGE: &str = "usage: wsf-client <service> <path>... [-- <param>...]";

/// Reads a boolean environment flag. Anything but an explicit "off" value
/// enables it, ignoring case and surrounding whitespace.
fn flag_enabled(value: &str) -> bool {
    let value = value.trim();
    !["0", "false", "no", "off"]
        .iter()
        .any(|off| value.eq_ignore_ascii_case(off))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (targets, params) = match args.iter().position(|arg| arg == "--") {
        Some(split) => (&args[..split], Params::from(&args[split + 1..])),
        None => (&args[..], Params::None),
    };
    let Some((service, paths)) = targets.split_first().filter(|(_, paths)| !paths.is_empty())
    else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    // Options file first, then environment overrides
    let options = match std::env::var("WSF_CONFIG") {
        Ok(path) => match ClientOptions::from_file(&path) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("Failed to load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => ClientOptions::default(),
    };
    let mut config = ClientConfig::from_options(options);

    match std::env::var("WSF_API_ACCESS_CODE") {
        Ok(code) => config.api_access_code = code,
        Err(_) if config.api_access_code.is_empty() => {
            eprintln!("Warning: WSF_API_ACCESS_CODE not set. API calls will fail.");
        }
        Err(_) => {}
    }
    if let Ok(value) = std::env::var("WSF_FIX_DATES") {
        config.fix_dates = flag_enabled(&value);
    }

    if let Ok(known) = service.parse::<Service>() {
        for path in paths {
            if !known.paths().contains(&path.as_str()) {
                warn!(%known, path = %path, "path is not in the service table");
            }
        }
    } else {
        warn!(service = %service, "unknown service, using the generic base URL");
    }

    let client = match WsfClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create WSF client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outcomes = join_all(
        paths
            .iter()
            .map(|path| client.get(service, path, params.clone())),
    )
    .await;

    let mut failed = false;
    for (path, outcome) in paths.iter().zip(outcomes) {
        info!(%service, %path, outcome = outcome.kind(), "finished");
        match outcome.into_result::<serde_json::Value>() {
            Ok(data) => match serde_json::to_string_pretty(&data) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("{service}/{path}: {e}");
                    failed = true;
                }
            },
            Err(e) => {
                eprintln!("{service}/{path}: {e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing_ignores_case() {
        for off in ["0", "false", "FALSE", "False", "no", "No", "off", " OFF "] {
            assert!(!flag_enabled(off), "{off:?} should disable");
        }
        for on in ["1", "true", "TRUE", "yes", "on", ""] {
            assert!(flag_enabled(on), "{on:?} should enable");
        }
    }
}
