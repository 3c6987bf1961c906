//
//  spotctl
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spotctl::api::Context;
use spotctl::cli::{Cli, Commands, GlobalOptions};
use spotctl::exit_codes;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli.global);

    // Cancel everything in flight on Ctrl+C
    let (ctx, cancel) = Context::background().with_cancel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling");
            cancel.cancel();
        }
    });

    // Execute command
    let result = run(cli, &ctx).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::for_error(&e));
        }
    }
}

/// Initialize logging: `SPOTCTL_LOG` wins, then the debug setting.
fn init_logging(global: &GlobalOptions) {
    let debug = global
        .settings()
        .map(|s| s.debug)
        .unwrap_or(global.debug);

    let filter = EnvFilter::try_from_env("SPOTCTL_LOG").unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("spotctl=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli, ctx: &Context) -> Result<()> {
    match cli.command {
        Commands::Regions(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Serverclasses(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Organizations(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Cloudspaces(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Spotnodepool(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Ondemandnodepool(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Config(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Completion(cmd) => cmd.run(),
        Commands::Version => {
            println!("spotctl version {}", spotctl::VERSION);
            Ok(())
        }
    }
}
