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

use crate::context::{ConstructorContext, ConstructorResult, ExecutionContext};
use crate::error::{CircuitError, ConstructionError};
use derive_where::derive_where;
use std::collections::HashMap;
use std::fmt::Debug;

/// A compiled contract, as the simulator sees it: a constructor producing the
/// initial state, and a table of named circuits transforming it.
pub trait Contract: Sized {
    type PrivateState: Clone + Debug;
    type Witnesses: Clone;
    type ConstructorArgs;
    type Args: Debug;
    type Output;
    /// The typed view of the contract's public ledger state.
    type Ledger;

    fn witnesses(&self) -> &Self::Witnesses;

    fn constructor(
        &self,
        ctx: ConstructorContext<Self::PrivateState>,
        args: Self::ConstructorArgs,
    ) -> Result<ConstructorResult<Self::PrivateState>, ConstructionError>;

    fn circuits(&self) -> CircuitTable<Self>;
}

pub type PureCircuit<C> = fn(
    &C,
    &ExecutionContext<<C as Contract>::PrivateState>,
    <C as Contract>::Args,
) -> Result<<C as Contract>::Output, CircuitError>;

pub type ImpureCircuit<C> = fn(
    &C,
    ExecutionContext<<C as Contract>::PrivateState>,
    <C as Contract>::Args,
) -> Result<
    (
        ExecutionContext<<C as Contract>::PrivateState>,
        <C as Contract>::Output,
    ),
    CircuitError,
>;

/// A circuit entry point. Pure circuits only read the context; impure ones
/// return the context to commit.
#[derive_where(Clone, Copy)]
pub enum Circuit<C: Contract> {
    Pure(PureCircuit<C>),
    Impure(ImpureCircuit<C>),
}

impl<C: Contract> Circuit<C> {
    pub fn is_pure(&self) -> bool {
        matches!(self, Circuit::Pure(_))
    }
}

/// The circuits of a contract, by name.
#[derive_where(Clone, Default)]
pub struct CircuitTable<C: Contract>(HashMap<&'static str, Circuit<C>>);

impl<C: Contract> CircuitTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pure(mut self, name: &'static str, circuit: PureCircuit<C>) -> Self {
        self.0.insert(name, Circuit::Pure(circuit));
        self
    }

    pub fn impure(mut self, name: &'static str, circuit: ImpureCircuit<C>) -> Self {
        self.0.insert(name, Circuit::Impure(circuit));
        self
    }

    pub fn get(&self, name: &str) -> Option<Circuit<C>> {
        self.0.get(name).copied()
    }

    /// The circuit names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = self.0.keys().copied().collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
