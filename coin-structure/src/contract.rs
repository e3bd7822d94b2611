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

use crate::coin::Color;
use crate::hash::{HashOutput, persistent_commit};
use crate::hash_newtype;

hash_newtype!(
    /// The address of a deployed contract instance.
    ContractAddress
);

/// Domain separator for token color derivation.
const DERIVE_TOKEN_DOMAIN_SEP: HashOutput =
    HashOutput(*b"midnight:derive_token\0\0\0\0\0\0\0\0\0\0\0");

impl ContractAddress {
    fn custom_token_type(&self, domain_sep: HashOutput) -> HashOutput {
        persistent_commit(&(domain_sep, self.0), DERIVE_TOKEN_DOMAIN_SEP)
    }

    /// The color of coins this contract mints under `domain_sep`. Colors are
    /// scoped to the contract instance: the same domain separator used by
    /// two different contracts yields two different colors.
    pub fn custom_shielded_token_type(&self, domain_sep: HashOutput) -> Color {
        Color(self.custom_token_type(domain_sep))
    }
}
