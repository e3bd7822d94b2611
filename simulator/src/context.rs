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

//! The execution context a contract instance runs against.
//!
//! An [`ExecutionContext`] is owned by exactly one simulator. Circuits are
//! handed an owned clone, which the simulator commits back only if the
//! circuit succeeds.

use crate::error::{CircuitError, LedgerStateError};
use coin_structure::coin::{Color, Info as CoinInfo, Nonce, QualifiedInfo as QualifiedCoinInfo};
use coin_structure::contract::ContractAddress;
use coin_structure::hash::HashOutput;
use coin_structure::transfer::Recipient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};
use zswap::Spent;
use zswap::local::LocalState;

/// A contract's public ledger state, as an opaque buffer. Its structure is
/// known only to the contract, and recovered through a ledger extractor.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerState(Vec<u8>);

impl LedgerState {
    pub fn encode<L: Serialize>(ledger: &L) -> Result<Self, LedgerStateError> {
        Ok(LedgerState(serde_json::to_vec(ledger)?))
    }

    pub fn decode<L: DeserializeOwned>(&self) -> Result<L, LedgerStateError> {
        Ok(serde_json::from_slice(&self.0)?)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        LedgerState(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for LedgerState {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "LedgerState({})", String::from_utf8_lossy(&self.0))
    }
}

/// Everything a contract instance reads and writes while executing.
#[derive(Clone, Debug)]
pub struct ExecutionContext<P> {
    pub(crate) private_state: P,
    pub(crate) ledger_state: LedgerState,
    pub(crate) zswap: LocalState,
    pub(crate) own_address: ContractAddress,
    pub(crate) caller: Option<Recipient>,
}

impl<P> ExecutionContext<P> {
    pub(crate) fn new(
        private_state: P,
        ledger_state: LedgerState,
        own_address: ContractAddress,
        caller: Option<Recipient>,
    ) -> Self {
        let mut zswap = LocalState::new();
        zswap.begin_call(&Recipient::or_zero(caller));
        ExecutionContext {
            private_state,
            ledger_state,
            zswap,
            own_address,
            caller,
        }
    }

    pub fn private_state(&self) -> &P {
        &self.private_state
    }

    pub fn private_state_mut(&mut self) -> &mut P {
        &mut self.private_state
    }

    pub fn set_private_state(&mut self, private_state: P) {
        self.private_state = private_state;
    }

    pub fn ledger_state(&self) -> &LedgerState {
        &self.ledger_state
    }

    /// Decodes the ledger state into the contract's ledger view.
    pub fn ledger<L: DeserializeOwned>(&self) -> Result<L, CircuitError> {
        Ok(self.ledger_state.decode()?)
    }

    /// Replaces the ledger state with the encoding of `ledger`.
    pub fn set_ledger<L: Serialize>(&mut self, ledger: &L) -> Result<(), CircuitError> {
        self.ledger_state = LedgerState::encode(ledger)?;
        Ok(())
    }

    pub fn zswap(&self) -> &LocalState {
        &self.zswap
    }

    pub fn own_address(&self) -> ContractAddress {
        self.own_address
    }

    /// The caller of the circuit being executed, if any.
    pub fn caller(&self) -> Option<Recipient> {
        self.caller
    }

    /// The caller, with an absent caller mapped to [`Recipient::ZERO`].
    pub fn caller_or_zero(&self) -> Recipient {
        Recipient::or_zero(self.caller)
    }

    pub fn witness_context(&self) -> WitnessContext<'_, P> {
        WitnessContext {
            ledger_state: &self.ledger_state,
            private_state: &self.private_state,
            contract_address: self.own_address,
        }
    }

    /// Fails the circuit with `msg` unless `cond` holds.
    pub fn require(&self, cond: bool, msg: &str) -> Result<(), CircuitError> {
        if cond {
            Ok(())
        } else {
            Err(CircuitError::Assertion(msg.to_owned()))
        }
    }

    /// The color this contract mints under `domain_sep`.
    pub fn token_color(&self, domain_sep: HashOutput) -> Color {
        self.own_address.custom_shielded_token_type(domain_sep)
    }

    /// Mints `amount` of this contract's `domain_sep` color to `recipient`.
    pub fn mint(
        &mut self,
        domain_sep: HashOutput,
        amount: u128,
        nonce: Nonce,
        recipient: Recipient,
    ) -> Result<QualifiedCoinInfo, CircuitError> {
        let color = self.token_color(domain_sep);
        Ok(self.zswap.mint(color, amount, nonce, recipient)?)
    }

    /// Sends `value` of a coin held by this contract to `recipient`, keeping
    /// the change.
    pub fn send(
        &mut self,
        input: &QualifiedCoinInfo,
        recipient: Recipient,
        value: u128,
    ) -> Result<Spent, CircuitError> {
        let holder = Recipient::Contract(self.own_address);
        Ok(self.zswap.spend(input, recipient, value, holder)?)
    }

    /// Accepts `coin` as held by this contract. The coin must be of a color
    /// this contract has minted.
    pub fn receive(&mut self, coin: &CoinInfo) -> Result<QualifiedCoinInfo, CircuitError> {
        Ok(self.zswap.receive(coin)?)
    }
}

/// The read-only view a witness function is given.
#[derive(Debug)]
pub struct WitnessContext<'a, P> {
    pub ledger_state: &'a LedgerState,
    pub private_state: &'a P,
    pub contract_address: ContractAddress,
}

impl<P> WitnessContext<'_, P> {
    pub fn ledger<L: DeserializeOwned>(&self) -> Result<L, CircuitError> {
        Ok(self.ledger_state.decode()?)
    }
}

/// What a contract's constructor is given.
#[derive(Debug)]
pub struct ConstructorContext<P> {
    pub initial_private_state: P,
    pub own_address: ContractAddress,
    pub caller: Option<Recipient>,
}

/// What a contract's constructor produces.
#[derive(Debug)]
pub struct ConstructorResult<P> {
    pub private_state: P,
    pub ledger_state: LedgerState,
}
