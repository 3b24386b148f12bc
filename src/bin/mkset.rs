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

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use setstring::SymbolSet;

#[derive(Parser)]
#[command(name = "mkset")]
#[command(version, about = "Build a set-string from symbol names on stdin", long_about = None)]
struct Cli {
    /// Bits per hashed symbol, 7..=32
    #[arg(value_name = "BPP")]
    bpp: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut set = SymbolSet::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if !line.is_empty() {
            set.add(&line);
        }
    }
    let s = set
        .encode(cli.bpp)
        .with_context(|| format!("encoding {} symbols at bpp {}", set.len(), cli.bpp))?;
    println!("set:{s}");
    Ok(())
}
