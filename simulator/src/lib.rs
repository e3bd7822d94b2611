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

//! Deterministic simulation of contract circuits.
//!
//! A [`ContractSimulator`] holds the state of one deployed contract instance,
//! and runs its circuits directly, without proofs, committing their effects
//! on the contract's private state, ledger state and zswap coin accounting.
//! Simulators are built from a [`SimulatorConfig`]; [`utxo`] provides a
//! complete example contract and its simulator.

#![deny(unreachable_pub)]

#[macro_use]
extern crate tracing;

pub mod context;
pub mod contract;
pub mod error;
pub mod factory;
pub mod simulator;
pub mod test_utilities;
pub mod utxo;

pub use context::{ExecutionContext, LedgerState};
pub use contract::{Circuit, CircuitTable, Contract};
pub use error::SimulatorError;
pub use factory::{SimulatorConfig, SimulatorOptions, create_simulator};
pub use simulator::{Bound, CircuitInvoker, ContractSimulator};
