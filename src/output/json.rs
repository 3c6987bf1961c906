//
//  spotctl
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Structured Output
//!
//! JSON and YAML serialization for scripting. Both forms print the resource
//! exactly as decoded from the API; nothing is normalised.
//!
//! | Function | Format |
//! |----------|--------|
//! | [`write_json`] | Pretty-printed JSON |
//! | [`write_yaml`] | YAML |

use std::io::{self, Write};

use serde::Serialize;

pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    write_json_to(&mut io::stdout().lock(), value)
}

pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_yaml<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    write_yaml_to(&mut io::stdout().lock(), value)
}

pub fn write_yaml_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(value)?;
    writer.write_all(yaml.as_bytes())?;
    if !yaml.ends_with('\n') {
        writeln!(writer)?;
    }
    Ok(())
}
