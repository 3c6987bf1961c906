//
//  spotctl
//  interactive/selector.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive Selectors Module
//!
//! Arrow-key selection from a list, used by `config init` to pick an
//! organization namespace, a region and an output format.

use anyhow::{bail, Result};
use dialoguer::Select;

/// Prompts the user to select a single item from a list.
pub fn select<T: ToString>(message: &str, items: &[T]) -> Result<usize> {
    select_with_default(message, items, 0)
}

/// Prompts the user to select a single item, starting on `default`.
///
/// Fails when `items` is empty since there is nothing to choose.
pub fn select_with_default<T: ToString>(
    message: &str,
    items: &[T],
    default: usize,
) -> Result<usize> {
    if items.is_empty() {
        bail!("nothing to select for '{}'", message);
    }
    let selection = Select::new()
        .with_prompt(message)
        .items(items)
        .default(default.min(items.len() - 1))
        .interact()?;
    Ok(selection)
}
