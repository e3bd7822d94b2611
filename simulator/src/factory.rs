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

//! Building simulators from a contract's configuration.

use crate::context::LedgerState;
use crate::contract::Contract;
use crate::error::{LedgerStateError, SimulatorError};
use crate::simulator::ContractSimulator;
use coin_structure::contract::ContractAddress;
use coin_structure::transfer::Recipient;
use derive_where::derive_where;

/// The functions needed to deploy a contract into a simulator.
#[derive_where(Clone, Copy)]
pub struct SimulatorConfig<C: Contract> {
    /// Builds the contract around a witness set.
    pub contract_factory: fn(C::Witnesses) -> C,
    pub default_private_state: fn() -> C::PrivateState,
    /// The constructor arguments used unless overridden.
    pub contract_args: fn() -> C::ConstructorArgs,
    /// Decodes ledger state into the contract's ledger view.
    pub ledger_extractor: fn(&LedgerState) -> Result<C::Ledger, LedgerStateError>,
    pub witnesses_factory: fn() -> C::Witnesses,
}

/// Overrides for a single deployment. Unset fields fall back to the
/// [`SimulatorConfig`] defaults, and a random contract address.
#[derive_where(Default)]
pub struct SimulatorOptions<C: Contract> {
    pub private_state: Option<C::PrivateState>,
    pub witnesses: Option<C::Witnesses>,
    pub constructor_args: Option<C::ConstructorArgs>,
    pub contract_address: Option<ContractAddress>,
    /// The caller of the constructor, which also becomes the persistent caller.
    pub caller: Option<Recipient>,
}

impl<C: Contract> SimulatorConfig<C> {
    pub fn build(&self, options: SimulatorOptions<C>) -> Result<ContractSimulator<C>, SimulatorError> {
        ContractSimulator::deploy(*self, options)
    }

    pub fn build_default(&self) -> Result<ContractSimulator<C>, SimulatorError> {
        self.build(SimulatorOptions::default())
    }
}

pub fn create_simulator<C: Contract>(
    config: SimulatorConfig<C>,
    options: SimulatorOptions<C>,
) -> Result<ContractSimulator<C>, SimulatorError> {
    config.build(options)
}
