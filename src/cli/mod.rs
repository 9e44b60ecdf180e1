use std::{borrow::Cow, net::IpAddr};

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::server;

#[derive(Debug, Parser)]
#[clap(version, about = "HTTP API for calculating periodic mortgage payments.")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// DSN to tell Sentry where to send events.
    ///
    /// If provided, errors will be sent to Sentry.
    #[clap(long = "sentry-dsn", env = "SENTRY_DSN")]
    sentry_dsn: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the calculator's HTTP server.
    Serve(ServeOpts),
}

#[derive(Args, Debug)]
struct ServeOpts {
    /// Address to listen on.
    #[clap(long = "address", default_value = "0.0.0.0", env = "BIND_ADDRESS")]
    address: IpAddr,

    /// Port to listen on.
    #[clap(long = "port", default_value = "80", env = "PORT")]
    port: u16,
}

impl From<ServeOpts> for server::Options {
    fn from(opts: ServeOpts) -> Self {
        Self {
            address: opts.address,
            port: opts.port,
        }
    }
}

pub async fn run_with_sys_args() -> anyhow::Result<()> {
    use tracing_subscriber::prelude::*;

    let cli = Cli::parse();

    let sentry_config = cli.sentry_dsn.map(|dsn| {
        debug!("Enabled sentry.");

        let release_name = option_env!("GIT_SHA")
            .map(Cow::from)
            .or_else(|| sentry::release_name!());

        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: release_name,
                ..Default::default()
            },
        ))
    });

    let sentry_tracing_layer = if sentry_config.is_some() {
        Some(sentry_tracing::layer())
    } else {
        None
    };

    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(sentry_tracing_layer)
        .init();

    match cli.command {
        Commands::Serve(opts) => server::serve(opts.into()).await,
    }
}

#[cfg(test)]
mod test {
    use std::net::{Ipv4Addr, Ipv6Addr};

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_with_explicit_listener() {
        let cli = Cli::try_parse_from([
            "mortgage-calculator-api",
            "serve",
            "--address",
            "127.0.0.1",
            "--port",
            "8080",
        ])
        .expect("arguments should parse");

        let Commands::Serve(opts) = cli.command;
        let opts = server::Options::from(opts);

        assert_eq!(IpAddr::V4(Ipv4Addr::LOCALHOST), opts.address);
        assert_eq!(8080, opts.port);
    }

    #[test]
    fn serve_accepts_ipv6_address() {
        let cli = Cli::try_parse_from([
            "mortgage-calculator-api",
            "serve",
            "--address",
            "::1",
            "--port",
            "80",
        ])
        .expect("arguments should parse");

        let Commands::Serve(opts) = cli.command;

        assert_eq!(IpAddr::V6(Ipv6Addr::LOCALHOST), opts.address);
    }

    #[test]
    fn serve_rejects_invalid_port() {
        Cli::try_parse_from(["mortgage-calculator-api", "serve", "--port", "http"])
            .expect_err("port should be numeric");
    }
}
