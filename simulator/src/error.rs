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

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use zswap::error::{InsufficientValue, ZswapError};

/// A ledger state that could not be encoded, or decoded into the expected
/// ledger view.
#[derive(Debug)]
pub struct LedgerStateError(pub serde_json::Error);

impl Display for LedgerStateError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "malformed ledger state: {}", self.0)
    }
}

impl Error for LedgerStateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for LedgerStateError {
    fn from(err: serde_json::Error) -> Self {
        LedgerStateError(err)
    }
}

#[derive(Debug)]
pub enum ConstructionError {
    /// The contract's constructor rejected its arguments.
    Rejected(String),
    LedgerState(LedgerStateError),
}

impl From<LedgerStateError> for ConstructionError {
    fn from(err: LedgerStateError) -> Self {
        ConstructionError::LedgerState(err)
    }
}

impl Display for ConstructionError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            ConstructionError::Rejected(msg) => {
                write!(formatter, "constructor rejected its arguments: {}", msg)
            }
            ConstructionError::LedgerState(err) => {
                err.fmt(formatter)?;
                write!(formatter, " -- while constructing initial state")
            }
        }
    }
}

impl Error for ConstructionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConstructionError::LedgerState(err) => Some(err),
            _ => None,
        }
    }
}

/// A failure raised by a contract's own circuit logic.
#[derive(Debug)]
pub enum CircuitError {
    /// A failed assertion, carrying the contract's diagnostic.
    Assertion(String),
    Zswap(ZswapError),
    LedgerState(LedgerStateError),
    /// The circuit was handed arguments meant for another circuit.
    ArgumentMismatch(&'static str),
}

impl From<ZswapError> for CircuitError {
    fn from(err: ZswapError) -> Self {
        CircuitError::Zswap(err)
    }
}

impl From<InsufficientValue> for CircuitError {
    fn from(err: InsufficientValue) -> Self {
        CircuitError::Zswap(err.into())
    }
}

impl From<LedgerStateError> for CircuitError {
    fn from(err: LedgerStateError) -> Self {
        CircuitError::LedgerState(err)
    }
}

impl Display for CircuitError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            CircuitError::Assertion(msg) => write!(formatter, "failed assert: {}", msg),
            CircuitError::Zswap(err) => err.fmt(formatter),
            CircuitError::LedgerState(err) => err.fmt(formatter),
            CircuitError::ArgumentMismatch(circuit) => {
                write!(formatter, "arguments do not match circuit '{}'", circuit)
            }
        }
    }
}

impl Error for CircuitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CircuitError::Zswap(err) => Some(err),
            CircuitError::LedgerState(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum SimulatorError {
    Construction(ConstructionError),
    CircuitNotFound(String),
    CircuitExecution(CircuitError),
    InsufficientValue(InsufficientValue),
    LedgerState(LedgerStateError),
    /// A circuit returned a result of the wrong shape for its named method.
    UnexpectedResult(&'static str),
}

impl From<ConstructionError> for SimulatorError {
    fn from(err: ConstructionError) -> Self {
        SimulatorError::Construction(err)
    }
}

impl From<CircuitError> for SimulatorError {
    fn from(err: CircuitError) -> Self {
        match err {
            CircuitError::Zswap(ZswapError::InsufficientValue(err)) => {
                SimulatorError::InsufficientValue(err)
            }
            err => SimulatorError::CircuitExecution(err),
        }
    }
}

impl From<LedgerStateError> for SimulatorError {
    fn from(err: LedgerStateError) -> Self {
        SimulatorError::LedgerState(err)
    }
}

impl Display for SimulatorError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            SimulatorError::Construction(err) => err.fmt(formatter),
            SimulatorError::CircuitNotFound(name) => {
                write!(formatter, "no circuit named '{}'", name)
            }
            SimulatorError::CircuitExecution(err) => {
                err.fmt(formatter)?;
                write!(formatter, " -- while executing circuit")
            }
            SimulatorError::InsufficientValue(err) => err.fmt(formatter),
            SimulatorError::LedgerState(err) => err.fmt(formatter),
            SimulatorError::UnexpectedResult(circuit) => {
                write!(formatter, "circuit '{}' returned an unexpected result", circuit)
            }
        }
    }
}

impl Error for SimulatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimulatorError::Construction(err) => Some(err),
            SimulatorError::CircuitExecution(err) => Some(err),
            SimulatorError::InsufficientValue(err) => Some(err),
            SimulatorError::LedgerState(err) => Some(err),
            SimulatorError::CircuitNotFound(_) | SimulatorError::UnexpectedResult(_) => None,
        }
    }
}
