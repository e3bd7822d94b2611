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

use coin_structure::coin::{Color, Commitment, Info as CoinInfo, QualifiedInfo as QualifiedCoinInfo};
use coin_structure::transfer::Recipient;
use serde::{Deserialize, Serialize};

/// A coin created by a circuit, and who it was created for.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub coin_info: CoinInfo,
    pub recipient: Recipient,
}

impl Output {
    pub fn commitment(&self) -> Commitment {
        self.coin_info.commitment(&self.recipient)
    }
}

/// The value of one color flowing through a call: the sum of its inputs,
/// and the sum of its outputs. Mints only have outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Delta {
    pub color: Color,
    pub inputs: u128,
    pub outputs: u128,
}

impl Delta {
    pub fn is_balanced(&self) -> bool {
        self.inputs == self.outputs
    }
}

/// The coins created by spending an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spent {
    /// The coin that was sent to the recipient.
    pub sent: QualifiedCoinInfo,
    /// The remainder of the input, returned to its holder. Absent if the
    /// whole input was sent.
    pub change: Option<QualifiedCoinInfo>,
}
