// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use setstring::{compare, DecodeCache};

#[derive(Parser)]
#[command(name = "setcmp")]
#[command(version, about = "Compare two set-strings", long_about = None)]
struct Cli {
    /// The Provides set-string; with no arguments, whitespace-separated
    /// pairs are read from stdin instead
    provides: Option<String>,
    /// The Requires set-string
    requires: Option<String>,
}

fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("set:").unwrap_or(s)
}

/// Prints the numeric relation; returns false on a decode failure.
fn run_one(cache: &mut DecodeCache, provides: &str, requires: &str) -> bool {
    match compare(Some(cache), strip_prefix(provides), strip_prefix(requires)) {
        Ok(relation) => {
            println!("{}", relation.as_i32());
            true
        }
        Err(e) => {
            eprintln!("setcmp: {} ({})", e, e.as_i32());
            false
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut cache = DecodeCache::new();
    let ok = match (cli.provides, cli.requires) {
        (Some(provides), Some(requires)) => run_one(&mut cache, &provides, &requires),
        (None, None) => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            let mut ok = true;
            let mut tokens = input.split_whitespace();
            while let Some(provides) = tokens.next() {
                let requires = tokens
                    .next()
                    .context("odd number of set-strings on stdin")?;
                ok &= run_one(&mut cache, provides, requires);
            }
            ok
        }
        _ => anyhow::bail!("provide two set-strings, or none to read stdin"),
    };
    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
