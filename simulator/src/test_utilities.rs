// This file is part of compact-simulator.
// Copyright (C) 2025 Midnight Foundation
// SPDX-License-Identifier: Apache-2.0
// Licensed under the Apache License, Version 2.0 (the "License");
// You may not use this file except in compliance with the License.
// You may obtain a copy of the License at
// http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Helpers for tests driving simulators.

use coin_structure::coin::{PublicKey, SecretKey};
use coin_structure::contract::ContractAddress;
use coin_structure::hash::HashOutput;
use coin_structure::transfer::Recipient;
use std::sync::Once;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::prelude::*;

/// The environment variable holding the log filter, in `tracing-subscriber`
/// targets syntax (e.g. `compact_simulator=debug,compact_sim_zswap=trace`).
pub const LOG_ENV_VAR: &str = "COMPACT_SIMULATOR_LOG";

lazy_static::lazy_static! {
    pub static ref ALICE: Recipient = user("ALICE");
    pub static ref BOB: Recipient = user("BOB");
    pub static ref CAROL: Recipient = user("CAROL");
}

/// The coin public key of a caller-less invocation.
pub const ZERO_KEY: PublicKey = PublicKey::ZERO;

/// Installs a test-friendly log subscriber. Safe to call from every test.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|s| s.parse::<Targets>().ok())
            .unwrap_or_else(|| Targets::new().with_default(LevelFilter::WARN));
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_filter(filter),
            )
            .try_init();
    });
}

/// A labelled user key pair: the secret key, and the caller identity it
/// corresponds to.
pub fn key_pair(label: &str) -> (SecretKey, Recipient) {
    let sk = SecretKey::from_label(label);
    let recipient = Recipient::User(sk.public_key());
    (sk, recipient)
}

/// The caller identity of the user labelled `label`.
pub fn user(label: &str) -> Recipient {
    key_pair(label).1
}

/// A contract address filled with `byte`.
pub fn contract_address(byte: u8) -> ContractAddress {
    ContractAddress(HashOutput::filled(byte))
}
