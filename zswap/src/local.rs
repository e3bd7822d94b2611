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

use std::collections::BTreeSet;

use coin_structure::coin::{
    Color, Info as CoinInfo, Nonce, PublicKey, QualifiedInfo as QualifiedCoinInfo,
};
use coin_structure::transfer::Recipient;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{InsufficientValue, ZswapError};
use crate::structure::*;

/// Domain separator for the nonce of a coin sent out of a spend.
const SEND_NONCE_DOMAIN_SEP: &[u8] = b"midnight:zswap:send";
/// Domain separator for the nonce of a spend's change coin.
const CHANGE_NONCE_DOMAIN_SEP: &[u8] = b"midnight:zswap:change";

/// The zswap accounting state of one contract instance.
///
/// `inputs` and `outputs` describe the call currently being executed, and are
/// reset by [`LocalState::begin_call`]. `current_index` and the sequence of
/// created outputs persist across calls: the `i`-th coin ever created sits at
/// position `i`.
///
/// Only coins of colors this instance has minted can be received or spent.
/// Per color, the inputs and the outputs of one call each sum to at most
/// `u128::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalState {
    pub coin_public_key: PublicKey,
    pub current_index: u64,
    pub inputs: Vec<QualifiedCoinInfo>,
    pub outputs: Vec<Output>,
    created: Vec<Output>,
    minted_colors: BTreeSet<Color>,
}

fn checked_total<I: Iterator<Item = u128>>(color: Color, mut values: I) -> Result<u128, ZswapError> {
    values
        .try_fold(0u128, u128::checked_add)
        .ok_or(ZswapError::ValueOverflow(color))
}

impl LocalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts accounting for a new call made by `caller`.
    pub fn begin_call(&mut self, caller: &Recipient) {
        self.coin_public_key = caller.coin_public_key();
        self.inputs.clear();
        self.outputs.clear();
    }

    /// Every output created so far, in creation order.
    pub fn created(&self) -> &[Output] {
        &self.created
    }

    /// Whether this instance has minted coins of `color`.
    pub fn has_minted(&self, color: &Color) -> bool {
        self.minted_colors.contains(color)
    }

    fn ensure_own_color(&self, color: Color) -> Result<(), ZswapError> {
        if self.has_minted(&color) {
            Ok(())
        } else {
            Err(ZswapError::ForeignColor(color))
        }
    }

    fn input_total(&self, color: Color) -> Result<u128, ZswapError> {
        checked_total(
            color,
            self.inputs
                .iter()
                .filter(|i| i.color == color)
                .map(|i| i.value),
        )
    }

    fn output_total(&self, color: Color) -> Result<u128, ZswapError> {
        checked_total(
            color,
            self.outputs
                .iter()
                .filter(|o| o.coin_info.color == color)
                .map(|o| o.coin_info.value),
        )
    }

    /// Fails unless another `inputs` of input value and `outputs` of output
    /// value of `color` fit in this call's totals.
    fn ensure_room(&self, color: Color, inputs: u128, outputs: u128) -> Result<(), ZswapError> {
        self.input_total(color)?
            .checked_add(inputs)
            .ok_or(ZswapError::ValueOverflow(color))?;
        self.output_total(color)?
            .checked_add(outputs)
            .ok_or(ZswapError::ValueOverflow(color))?;
        Ok(())
    }

    fn create_output(&mut self, coin_info: CoinInfo, recipient: Recipient) -> QualifiedCoinInfo {
        let output = Output {
            coin_info,
            recipient,
        };
        let qualified = coin_info.qualify(self.current_index);
        trace!(commitment = ?output.commitment(), mt_index = self.current_index, "created output");
        self.outputs.push(output);
        self.created.push(output);
        self.current_index += 1;
        qualified
    }

    /// Mints `amount` of `color` for `recipient`, consuming no input.
    #[instrument(skip(self))]
    pub fn mint(
        &mut self,
        color: Color,
        amount: u128,
        nonce: Nonce,
        recipient: Recipient,
    ) -> Result<QualifiedCoinInfo, ZswapError> {
        self.ensure_room(color, 0, amount)?;
        if self
            .created
            .iter()
            .any(|o| o.coin_info.nonce == nonce && o.coin_info.color == color)
        {
            warn!(?nonce, ?color, "minting a coin with a previously used nonce");
        }
        let coin = CoinInfo {
            nonce,
            color,
            value: amount,
        };
        self.minted_colors.insert(color);
        Ok(self.create_output(coin, recipient))
    }

    /// Spends `input`, sending `value` of it to `recipient` and any remainder
    /// back to `change_recipient`.
    ///
    /// The sent coin and the change coin get fresh nonces derived from the
    /// input; the caller never picks them.
    #[instrument(skip(self))]
    pub fn spend(
        &mut self,
        input: &QualifiedCoinInfo,
        recipient: Recipient,
        value: u128,
        change_recipient: Recipient,
    ) -> Result<Spent, ZswapError> {
        self.ensure_own_color(input.color)?;
        if value > input.value {
            return Err(InsufficientValue {
                available: input.value,
                requested: value,
            }
            .into());
        }
        self.ensure_room(input.color, input.value, input.value)?;
        let parent = CoinInfo::from(input);
        self.inputs.push(*input);

        let sent_coin = parent.evolve_from(SEND_NONCE_DOMAIN_SEP, self.current_index, value);
        let sent = self.create_output(sent_coin, recipient);

        let remainder = input.value - value;
        let change = (remainder > 0).then(|| {
            let change_coin =
                parent.evolve_from(CHANGE_NONCE_DOMAIN_SEP, self.current_index, remainder);
            self.create_output(change_coin, change_recipient)
        });

        debug!(
            input = input.value,
            sent = sent.value,
            change = change.map(|c| c.value),
            "spent coin"
        );
        Ok(Spent { sent, change })
    }

    /// Accepts `coin` as held by the receiving contract, qualifying it with
    /// the position it was created at. Receiving creates no output.
    ///
    /// If several outputs carry the same coin, the most recent one is used.
    #[instrument(skip(self))]
    pub fn receive(&self, coin: &CoinInfo) -> Result<QualifiedCoinInfo, ZswapError> {
        self.ensure_own_color(coin.color)?;
        let (mt_index, _) = self
            .created
            .iter()
            .enumerate()
            .rev()
            .find(|(_, output)| output.coin_info == *coin)
            .ok_or(ZswapError::UnknownCoin(*coin))?;
        debug!(mt_index, "received coin");
        Ok(coin.qualify(mt_index as u64))
    }

    /// The value per color flowing through the current call, ordered by
    /// color. Colors whose inputs and outputs cancel out are included.
    pub fn deltas(&self) -> Result<Vec<Delta>, ZswapError> {
        let colors = self
            .inputs
            .iter()
            .map(|i| i.color)
            .chain(self.outputs.iter().map(|o| o.coin_info.color))
            .collect::<BTreeSet<_>>();
        colors
            .into_iter()
            .map(|color| {
                Ok(Delta {
                    color,
                    inputs: self.input_total(color)?,
                    outputs: self.output_total(color)?,
                })
            })
            .collect()
    }

    /// Whether the current call neither creates nor destroys value.
    pub fn is_balanced(&self) -> Result<bool, ZswapError> {
        Ok(self.deltas()?.iter().all(Delta::is_balanced))
    }

    /// The recipients of the current call's outputs, without repetition.
    pub fn recipients(&self) -> Vec<Recipient> {
        self.outputs.iter().map(|o| o.recipient).unique().collect()
    }
}
