//
//  spotctl
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive Prompts Module
//!
//! Thin wrappers over `dialoguer` for text input, masked token entry and
//! yes/no confirmations.
//!
//! # Example
//!
//! ```no_run
//! use spotctl::interactive::prompt::{prompt_confirm, prompt_password};
//!
//! let token = prompt_password("Refresh token:").unwrap();
//! if prompt_confirm("Save to config file?").unwrap() {
//!     println!("saved");
//! }
//! ```

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompts the user for optional text input.
///
/// Returns `Ok(None)` when the user presses Enter without typing anything.
pub fn prompt_input_optional(message: &str) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// Prompts the user for a secret without echoing it.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

/// Prompts the user for a yes/no confirmation, defaulting to no.
pub fn prompt_confirm(message: &str) -> Result<bool> {
    prompt_confirm_with_default(message, false)
}

pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
