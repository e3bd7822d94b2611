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

use crate::coin::PublicKey;
use crate::contract::ContractAddress;
#[cfg(feature = "proptest")]
use proptest_derive::Arbitrary;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Someone who can hold a coin: either a user, by their coin public key, or a
/// contract, by its address. Also used to identify the caller of a circuit.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "proptest", derive(Arbitrary))]
pub enum Recipient {
    User(PublicKey),
    Contract(ContractAddress),
}

impl Default for Recipient {
    fn default() -> Self {
        Recipient::ZERO
    }
}

impl Recipient {
    /// The reserved identity for "no caller".
    pub const ZERO: Recipient = Recipient::User(PublicKey::ZERO);

    pub fn is_zero(&self) -> bool {
        *self == Recipient::ZERO
    }

    /// The coin public key of a user recipient. Contracts hold no coin key,
    /// and are attributed the zero key.
    pub fn coin_public_key(&self) -> PublicKey {
        match self {
            Recipient::User(pk) => *pk,
            Recipient::Contract(_) => PublicKey::ZERO,
        }
    }

    /// Resolves an optional caller, mapping the absent caller to [`Recipient::ZERO`].
    pub fn or_zero(caller: Option<Recipient>) -> Recipient {
        caller.unwrap_or(Recipient::ZERO)
    }
}

impl From<PublicKey> for Recipient {
    fn from(pk: PublicKey) -> Recipient {
        Recipient::User(pk)
    }
}

impl From<ContractAddress> for Recipient {
    fn from(addr: ContractAddress) -> Recipient {
        Recipient::Contract(addr)
    }
}

impl Display for Recipient {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Recipient::User(pk) => write!(formatter, "user:{}", pk),
            Recipient::Contract(addr) => write!(formatter, "contract:{}", addr),
        }
    }
}
