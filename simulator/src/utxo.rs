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

//! A token contract holding a single shielded coin.
//!
//! The contract mints coins of its own colors, sends from the coin it holds
//! keeping the change, and takes coins sent to it into custody.

use crate::context::{ConstructorContext, ConstructorResult, ExecutionContext, LedgerState};
use crate::contract::{CircuitTable, Contract};
use crate::error::{CircuitError, ConstructionError, LedgerStateError, SimulatorError};
use crate::factory::{SimulatorConfig, SimulatorOptions, create_simulator};
use crate::simulator::{CircuitInvoker, ContractSimulator};
use coin_structure::coin::{Color, Info as CoinInfo, Nonce, QualifiedInfo as QualifiedCoinInfo};
use coin_structure::hash::HashOutput;
use coin_structure::transfer::Recipient;
use serde::{Deserialize, Serialize};
use zswap::Spent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoLedger {
    /// The coin the contract currently holds; the default coin if none.
    pub coin: QualifiedCoinInfo,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UtxoPrivateState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UtxoWitnesses;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtxoArgs {
    Mint {
        domain_sep: HashOutput,
        amount: u128,
        nonce: Nonce,
        recipient: Recipient,
    },
    SendToken {
        input: QualifiedCoinInfo,
        recipient: Recipient,
        value: u128,
    },
    ReceiveToken {
        coin: CoinInfo,
    },
    ReceiveTokenSendChange {
        coin: CoinInfo,
        change: u128,
    },
    Color {
        domain_sep: HashOutput,
    },
}

/// The coins created by a send: the one sent, and the change kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendResult {
    pub sent: CoinInfo,
    pub change: Option<CoinInfo>,
}

impl From<Spent> for SendResult {
    fn from(spent: Spent) -> Self {
        SendResult {
            sent: spent.sent.into(),
            change: spent.change.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtxoOutput {
    Unit,
    Coin(CoinInfo),
    Sent(SendResult),
    Color(Color),
}

#[derive(Debug, Clone)]
pub struct UtxoContract {
    witnesses: UtxoWitnesses,
}

impl UtxoContract {
    pub fn new(witnesses: UtxoWitnesses) -> Self {
        UtxoContract { witnesses }
    }
}

type Ctx = ExecutionContext<UtxoPrivateState>;
type Transition = Result<(Ctx, UtxoOutput), CircuitError>;

/// Replaces the held coin with the change of a spend, or the default coin if
/// the spend left no change.
fn hold_change(ctx: &mut Ctx, spent: &Spent) -> Result<(), CircuitError> {
    ctx.set_ledger(&UtxoLedger {
        coin: spent.change.unwrap_or_default(),
    })
}

fn mint(_: &UtxoContract, mut ctx: Ctx, args: UtxoArgs) -> Transition {
    let UtxoArgs::Mint {
        domain_sep,
        amount,
        nonce,
        recipient,
    } = args
    else {
        return Err(CircuitError::ArgumentMismatch("mint"));
    };
    let coin = ctx.mint(domain_sep, amount, nonce, recipient)?;
    Ok((ctx, UtxoOutput::Coin(coin.into())))
}

fn send_token(_: &UtxoContract, mut ctx: Ctx, args: UtxoArgs) -> Transition {
    let UtxoArgs::SendToken {
        input,
        recipient,
        value,
    } = args
    else {
        return Err(CircuitError::ArgumentMismatch("sendToken"));
    };
    let held: UtxoLedger = ctx.ledger()?;
    ctx.require(input == held.coin, "can only send the held coin")?;
    let spent = ctx.send(&input, recipient, value)?;
    hold_change(&mut ctx, &spent)?;
    Ok((ctx, UtxoOutput::Sent(spent.into())))
}

fn receive_token(_: &UtxoContract, mut ctx: Ctx, args: UtxoArgs) -> Transition {
    let UtxoArgs::ReceiveToken { coin } = args else {
        return Err(CircuitError::ArgumentMismatch("receiveToken"));
    };
    let coin = ctx.receive(&coin)?;
    ctx.set_ledger(&UtxoLedger { coin })?;
    Ok((ctx, UtxoOutput::Unit))
}

fn receive_token_send_change(_: &UtxoContract, mut ctx: Ctx, args: UtxoArgs) -> Transition {
    let UtxoArgs::ReceiveTokenSendChange { coin, change } = args else {
        return Err(CircuitError::ArgumentMismatch("receiveTokenSendChange"));
    };
    let held = ctx.receive(&coin)?;
    let caller = ctx.caller_or_zero();
    let spent = ctx.send(&held, caller, change)?;
    hold_change(&mut ctx, &spent)?;
    Ok((ctx, UtxoOutput::Sent(spent.into())))
}

fn color(_: &UtxoContract, ctx: &Ctx, args: UtxoArgs) -> Result<UtxoOutput, CircuitError> {
    let UtxoArgs::Color { domain_sep } = args else {
        return Err(CircuitError::ArgumentMismatch("color"));
    };
    Ok(UtxoOutput::Color(ctx.token_color(domain_sep)))
}

impl Contract for UtxoContract {
    type PrivateState = UtxoPrivateState;
    type Witnesses = UtxoWitnesses;
    type ConstructorArgs = ();
    type Args = UtxoArgs;
    type Output = UtxoOutput;
    type Ledger = UtxoLedger;

    fn witnesses(&self) -> &UtxoWitnesses {
        &self.witnesses
    }

    fn constructor(
        &self,
        ctx: ConstructorContext<UtxoPrivateState>,
        _args: (),
    ) -> Result<ConstructorResult<UtxoPrivateState>, ConstructionError> {
        Ok(ConstructorResult {
            private_state: ctx.initial_private_state,
            ledger_state: LedgerState::encode(&UtxoLedger::default())?,
        })
    }

    fn circuits(&self) -> CircuitTable<Self> {
        CircuitTable::new()
            .impure("mint", mint)
            .impure("sendToken", send_token)
            .impure("receiveToken", receive_token)
            .impure("receiveTokenSendChange", receive_token_send_change)
            .pure("color", color)
    }
}

fn default_private_state() -> UtxoPrivateState {
    UtxoPrivateState
}

fn contract_args() {}

fn ledger(state: &LedgerState) -> Result<UtxoLedger, LedgerStateError> {
    state.decode()
}

fn witnesses() -> UtxoWitnesses {
    UtxoWitnesses
}

pub const UTXO_CONFIG: SimulatorConfig<UtxoContract> = SimulatorConfig {
    contract_factory: UtxoContract::new,
    default_private_state,
    contract_args,
    ledger_extractor: ledger,
    witnesses_factory: witnesses,
};

pub type UtxoSimulator = ContractSimulator<UtxoContract>;

pub fn utxo_simulator(options: SimulatorOptions<UtxoContract>) -> Result<UtxoSimulator, SimulatorError> {
    create_simulator(UTXO_CONFIG, options)
}

/// The UTXO contract's circuits, as named methods.
pub trait UtxoCircuits: CircuitInvoker<UtxoContract> + Sized {
    fn mint(
        self,
        domain_sep: HashOutput,
        amount: u128,
        nonce: Nonce,
        recipient: Recipient,
    ) -> Result<CoinInfo, SimulatorError> {
        let args = UtxoArgs::Mint {
            domain_sep,
            amount,
            nonce,
            recipient,
        };
        match self.invoke("mint", args)? {
            UtxoOutput::Coin(coin) => Ok(coin),
            _ => Err(SimulatorError::UnexpectedResult("mint")),
        }
    }

    fn send_token(
        self,
        input: QualifiedCoinInfo,
        recipient: Recipient,
        value: u128,
    ) -> Result<SendResult, SimulatorError> {
        let args = UtxoArgs::SendToken {
            input,
            recipient,
            value,
        };
        match self.invoke("sendToken", args)? {
            UtxoOutput::Sent(result) => Ok(result),
            _ => Err(SimulatorError::UnexpectedResult("sendToken")),
        }
    }

    fn receive_token(self, coin: CoinInfo) -> Result<(), SimulatorError> {
        match self.invoke("receiveToken", UtxoArgs::ReceiveToken { coin })? {
            UtxoOutput::Unit => Ok(()),
            _ => Err(SimulatorError::UnexpectedResult("receiveToken")),
        }
    }

    fn receive_token_send_change(
        self,
        coin: CoinInfo,
        change: u128,
    ) -> Result<SendResult, SimulatorError> {
        let args = UtxoArgs::ReceiveTokenSendChange { coin, change };
        match self.invoke("receiveTokenSendChange", args)? {
            UtxoOutput::Sent(result) => Ok(result),
            _ => Err(SimulatorError::UnexpectedResult("receiveTokenSendChange")),
        }
    }

    fn color(self, domain_sep: HashOutput) -> Result<Color, SimulatorError> {
        match self.invoke("color", UtxoArgs::Color { domain_sep })? {
            UtxoOutput::Color(color) => Ok(color),
            _ => Err(SimulatorError::UnexpectedResult("color")),
        }
    }
}

impl<T: CircuitInvoker<UtxoContract>> UtxoCircuits for T {}
