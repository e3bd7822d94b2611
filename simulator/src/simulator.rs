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

use crate::context::{ConstructorContext, ExecutionContext, LedgerState};
use crate::contract::{Circuit, CircuitTable, Contract};
use crate::error::SimulatorError;
use crate::factory::{SimulatorConfig, SimulatorOptions};
use coin_structure::contract::ContractAddress;
use coin_structure::transfer::Recipient;
use rand::Rng;
use rand::rngs::OsRng;
use zswap::local::LocalState;

/// The public state of a deployed contract: its address, ledger data and the
/// operations it exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractState {
    pub address: ContractAddress,
    pub data: LedgerState,
    pub operations: Vec<&'static str>,
}

/// A single deployed contract instance, executed without proofs.
pub struct ContractSimulator<C: Contract> {
    config: SimulatorConfig<C>,
    contract: C,
    circuits: CircuitTable<C>,
    context: ExecutionContext<C::PrivateState>,
    persistent_caller: Option<Recipient>,
}

impl<C: Contract> ContractSimulator<C> {
    pub(crate) fn deploy(
        config: SimulatorConfig<C>,
        options: SimulatorOptions<C>,
    ) -> Result<Self, SimulatorError> {
        let witnesses = options
            .witnesses
            .unwrap_or_else(|| (config.witnesses_factory)());
        let contract = (config.contract_factory)(witnesses);
        let circuits = contract.circuits();
        let own_address = options
            .contract_address
            .unwrap_or_else(|| ContractAddress(OsRng.r#gen()));
        let initial_private_state = options
            .private_state
            .unwrap_or_else(|| (config.default_private_state)());
        let args = options
            .constructor_args
            .unwrap_or_else(|| (config.contract_args)());
        let caller = options.caller;

        let result = contract
            .constructor(
                ConstructorContext {
                    initial_private_state,
                    own_address,
                    caller,
                },
                args,
            )
            .inspect_err(|err| warn!(%own_address, %err, "contract construction failed"))?;
        let context =
            ExecutionContext::new(result.private_state, result.ledger_state, own_address, caller);
        info!(
            %own_address,
            circuits = circuits.len(),
            "deployed contract"
        );
        Ok(ContractSimulator {
            config,
            contract,
            circuits,
            context,
            persistent_caller: caller,
        })
    }

    pub fn contract_address(&self) -> ContractAddress {
        self.context.own_address
    }

    pub fn circuit_context(&self) -> &ExecutionContext<C::PrivateState> {
        &self.context
    }

    pub fn private_state(&self) -> &C::PrivateState {
        &self.context.private_state
    }

    /// The contract's ledger state, through the configured ledger extractor.
    pub fn public_state(&self) -> Result<C::Ledger, SimulatorError> {
        Ok((self.config.ledger_extractor)(&self.context.ledger_state)?)
    }

    pub fn contract_state(&self) -> ContractState {
        ContractState {
            address: self.context.own_address,
            data: self.context.ledger_state.clone(),
            operations: self.circuits.names(),
        }
    }

    pub fn zswap_state(&self) -> &LocalState {
        &self.context.zswap
    }

    pub fn witnesses(&self) -> &C::Witnesses {
        self.contract.witnesses()
    }

    /// Rebuilds the contract around `witnesses`, keeping its state.
    pub fn set_witnesses(&mut self, witnesses: C::Witnesses) {
        self.contract = (self.config.contract_factory)(witnesses);
        self.circuits = self.contract.circuits();
        debug!(address = %self.context.own_address, "replaced witnesses");
    }

    /// The caller used for calls not bound with [`ContractSimulator::as_caller`].
    pub fn persistent_caller(&self) -> Option<Recipient> {
        self.persistent_caller
    }

    pub fn set_persistent_caller(&mut self, caller: Option<Recipient>) {
        self.persistent_caller = caller;
    }

    pub fn reset_caller(&mut self) {
        self.persistent_caller = None;
    }

    /// Binds `caller` to the next circuit invocation only.
    pub fn as_caller<R: Into<Recipient>>(&mut self, caller: R) -> Bound<'_, C> {
        Bound {
            simulator: self,
            caller: caller.into(),
        }
    }

    pub fn invoke_circuit(&mut self, name: &str, args: C::Args) -> Result<C::Output, SimulatorError> {
        self.invoke_as(self.persistent_caller, name, args)
    }

    #[instrument(skip(self), fields(address = %self.context.own_address))]
    fn invoke_as(
        &mut self,
        caller: Option<Recipient>,
        name: &str,
        args: C::Args,
    ) -> Result<C::Output, SimulatorError> {
        let circuit = self
            .circuits
            .get(name)
            .ok_or_else(|| SimulatorError::CircuitNotFound(name.to_owned()))?;
        let mut context = self.context.clone();
        context.caller = caller;
        match circuit {
            Circuit::Pure(f) => Ok(f(&self.contract, &context, args)?),
            Circuit::Impure(f) => {
                context.zswap.begin_call(&Recipient::or_zero(caller));
                let (context, output) = f(&self.contract, context, args)
                    .inspect_err(|err| warn!(%err, "circuit failed, state unchanged"))?;
                debug!(
                    outputs = context.zswap.outputs.len(),
                    inputs = context.zswap.inputs.len(),
                    current_index = context.zswap.current_index,
                    "committing circuit"
                );
                self.context = context;
                Ok(output)
            }
        }
    }
}

/// A simulator with a caller bound for exactly one invocation.
pub struct Bound<'a, C: Contract> {
    simulator: &'a mut ContractSimulator<C>,
    caller: Recipient,
}

impl<C: Contract> Bound<'_, C> {
    pub fn caller(&self) -> Recipient {
        self.caller
    }

    pub fn invoke_circuit(self, name: &str, args: C::Args) -> Result<C::Output, SimulatorError> {
        self.simulator.invoke_as(Some(self.caller), name, args)
    }
}

/// Something circuits can be invoked through: a simulator, or a simulator
/// bound to a caller.
pub trait CircuitInvoker<C: Contract> {
    fn invoke(self, name: &str, args: C::Args) -> Result<C::Output, SimulatorError>;
}

impl<C: Contract> CircuitInvoker<C> for &mut ContractSimulator<C> {
    fn invoke(self, name: &str, args: C::Args) -> Result<C::Output, SimulatorError> {
        self.invoke_circuit(name, args)
    }
}

impl<C: Contract> CircuitInvoker<C> for Bound<'_, C> {
    fn invoke(self, name: &str, args: C::Args) -> Result<C::Output, SimulatorError> {
        self.invoke_circuit(name, args)
    }
}
