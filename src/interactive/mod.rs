//
//  spotctl
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Terminal prompts and selectors.

pub mod prompt;
pub mod selector;

pub use prompt::*;
pub use selector::*;

/// Whether a human is attached to the terminal and can answer prompts.
pub fn can_prompt() -> bool {
    console::user_attended_stderr()
}
