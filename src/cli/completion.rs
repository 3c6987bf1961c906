//
//  spotctl
//  cli/completion.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shell completion commands

use std::io::Write;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use super::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
#[command(after_help = "Examples:\n  \
    spotctl completion bash > /etc/bash_completion.d/spotctl\n  \
    spotctl completion zsh > \"${fpath[1]}/_spotctl\"")]
pub struct CompletionCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionCommand {
    pub fn run(&self) -> Result<()> {
        self.write_to(&mut std::io::stdout())
    }

    fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, crate::APP_NAME, out);
        Ok(())
    }
}
