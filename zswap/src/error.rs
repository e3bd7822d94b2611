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

use coin_structure::coin::{Color, Info as CoinInfo};
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// An attempt to send more than a coin is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientValue {
    pub available: u128,
    pub requested: u128,
}

impl Display for InsufficientValue {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(
            formatter,
            "attempted to send {} from a coin worth {}",
            self.requested, self.available
        )
    }
}

impl Error for InsufficientValue {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZswapError {
    InsufficientValue(InsufficientValue),
    UnknownCoin(CoinInfo),
    /// A coin of a color this contract never minted.
    ForeignColor(Color),
    /// The values of one color in a call no longer fit in a `u128`.
    ValueOverflow(Color),
}

impl From<InsufficientValue> for ZswapError {
    fn from(err: InsufficientValue) -> Self {
        ZswapError::InsufficientValue(err)
    }
}

impl Display for ZswapError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            ZswapError::InsufficientValue(err) => err.fmt(formatter),
            ZswapError::UnknownCoin(coin) => write!(
                formatter,
                "received coin {:?} was never created by this contract",
                coin
            ),
            ZswapError::ForeignColor(color) => {
                write!(formatter, "coin color {:?} is not issued by this contract", color)
            }
            ZswapError::ValueOverflow(color) => {
                write!(formatter, "total value of color {:?} in this call overflows", color)
            }
        }
    }
}

impl Error for ZswapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ZswapError::InsufficientValue(err) => Some(err),
            _ => None,
        }
    }
}
