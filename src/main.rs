// File: src/main.rs
// Project: Supernode Client
// Creation date: Thursday 15 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 11:27:00
// Modified by: Vincent Berthier
// -----
// Copyright (c) 2026 <Vincent Berthier>
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the 'Software'), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::env;

use supernode_client::{
    crypto::{Keypair, Pubkey},
    instruction::{registry, scan},
    program::{instruction as supernode, Pda, DEVNET_PROGRAM},
    state::{AnyEvent, LOG_PREFIX},
    transport::{Loopback, Submitter},
};
use tracing::{debug, info, level_filters::LevelFilter, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type Error = Box<dyn core::error::Error>;
type Result<T> = core::result::Result<T, Error>;

/// Environment variable holding the program id, in base58.
const PROGRAM_ID_VAR: &str = "SUPERNODE_PROGRAM_ID";

const USAGE: &str = "usage: supernode-client <command>

commands:
    pda [provider]      derived accounts of the program, with those of a provider or tenant
    decode <base58>     decode an instruction payload
    event <base64>      decode an event log payload
    loopback            build, sign, send and scan an instruction in process";

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing()?;
    let program = program_id()?;
    info!(%program, "supernode client");

    let args: Vec<String> = env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["pda"] => show_pdas(&program, None),
        ["pda", provider] => show_pdas(&program, Some(&provider.parse()?)),
        ["decode", payload] => decode(payload),
        ["event", payload] => event(payload),
        ["loopback"] => loopback(&program).await,
        _ => {
            warn!("unknown command {args:?}");
            print(USAGE);
            Ok(())
        }
    }
}

fn setup_tracing() -> core::result::Result<(), supernode_client::Error> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?;

    // register layers
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
    Ok(())
}

fn program_id() -> Result<Pubkey> {
    match env::var(PROGRAM_ID_VAR) {
        Ok(value) => Ok(value.parse()?),
        Err(_err) => {
            debug!("{PROGRAM_ID_VAR} not set, using the devnet program");
            Ok(DEVNET_PROGRAM)
        }
    }
}

#[expect(clippy::print_stdout, reason = "the output of the binary")]
fn print(line: &str) {
    println!("{line}");
}

fn show_pdas(program: &Pubkey, owner: Option<&Pubkey>) -> Result<()> {
    for recipe in Pda::ALL {
        if recipe.path().is_some() && owner.is_none() {
            continue;
        }
        let (address, bump) = recipe.derive(program, owner)?;
        print(&format!("{:<28} {address} (bump {bump})", recipe.to_string()));
    }
    Ok(())
}

fn decode(payload: &str) -> Result<()> {
    let data = bs58::decode(payload).into_vec()?;
    let (kind, params) = registry::decode_payload(&data)?;
    print(&kind.to_string());
    for (field, value) in kind.spec().params().iter().zip(&params) {
        print(&format!("    {}: {value}", field.name()));
    }
    Ok(())
}

fn event(payload: &str) -> Result<()> {
    let line = if payload.starts_with(LOG_PREFIX) {
        payload.to_owned()
    } else {
        format!("{LOG_PREFIX}{payload}")
    };
    match AnyEvent::from_log(&line)? {
        Some(event) => print(&format!("{}: {event:?}", event.name())),
        None => print("no event"),
    }
    Ok(())
}

async fn loopback(program: &Pubkey) -> Result<()> {
    let admin = Keypair::generate()?;
    let transport = Loopback::new();
    let submitter = Submitter::new(&transport, &transport);

    let instruction = supernode::update_staking_coefficient(program, admin.pubkey(), 3)?;
    let receipt = submitter.submit(&instruction, &[admin][..]).await?;
    print(&format!("submitted {} ({:?})", receipt.signature, receipt.status));

    for decoded in scan(transport.drain(), program)? {
        print(&format!("{} {:?}", decoded.kind(), decoded.params()));
    }
    Ok(())
}
