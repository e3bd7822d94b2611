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

use crate::hash::{
    BLANK_HASH, BinaryHashRepr, HashOutput, MemWrite, PERSISTENT_HASH_BYTES, persistent_commit,
    persistent_hash,
};
use crate::hash_newtype;
use crate::transfer::Recipient;
#[cfg(feature = "proptest")]
use proptest_derive::Arbitrary;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};

hash_newtype!(
    /// A coin nonce. Together with the [`Color`], it identifies a coin.
    Nonce
);

hash_newtype!(
    /// A coin commitment, binding a coin to its recipient.
    Commitment
);

hash_newtype!(
    /// A coin public key, identifying a user who can hold coins.
    PublicKey
);

hash_newtype!(
    /// The token type of a coin. Colors are derived from a domain separator
    /// and the address of the contract that issues them, see
    /// [`ContractAddress::custom_shielded_token_type`](crate::contract::ContractAddress::custom_shielded_token_type).
    Color
);

impl PublicKey {
    /// The public key standing in for "no caller".
    pub const ZERO: PublicKey = PublicKey(BLANK_HASH);
}

#[derive(Default, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "proptest", derive(Arbitrary))]
pub struct SecretKey(pub HashOutput);

impl Debug for SecretKey {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "<coin secret key>")
    }
}

impl SecretKey {
    /// Derives a secret key from a human readable label. Two labels give the
    /// same key iff they are equal, which makes it convenient for naming test
    /// parties.
    pub fn from_label(label: &str) -> Self {
        SecretKey(persistent_hash(label.as_bytes()))
    }

    pub fn public_key(&self) -> PublicKey {
        let mut data = Vec::with_capacity(PERSISTENT_HASH_BYTES + 6);
        self.0.binary_repr(&mut data);
        data.extend(b"mdn:pk");
        PublicKey(persistent_hash(&data))
    }
}

impl rand::distributions::Distribution<SecretKey> for rand::distributions::Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> SecretKey {
        SecretKey(rng.r#gen())
    }
}

/// A shielded coin.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "proptest", derive(Arbitrary))]
pub struct Info {
    pub nonce: Nonce,
    pub color: Color,
    pub value: u128,
}

impl rand::distributions::Distribution<Info> for rand::distributions::Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Info {
        Info {
            nonce: rng.r#gen(),
            color: rng.r#gen(),
            value: rng.r#gen(),
        }
    }
}

impl BinaryHashRepr for Info {
    fn binary_repr<W: MemWrite<u8>>(&self, writer: &mut W) {
        self.nonce.binary_repr(writer);
        self.color.binary_repr(writer);
        self.value.binary_repr(writer);
    }
    fn binary_len(&self) -> usize {
        PERSISTENT_HASH_BYTES * 2 + 16
    }
}

impl Info {
    pub fn new<R: Rng + CryptoRng + ?Sized>(rng: &mut R, value: u128, color: Color) -> Self {
        Info {
            nonce: rng.r#gen(),
            color,
            value,
        }
    }

    /// Derives a fresh coin of `value` from this one.
    ///
    /// The new nonce commits to this coin's nonce, the domain separator and
    /// the output position the new coin will occupy, so coins evolved from
    /// the same parent at different positions never collide.
    pub fn evolve_from(&self, domain_sep: &[u8], mt_index: u64, value: u128) -> Self {
        let opening = persistent_hash(domain_sep);
        Info {
            nonce: Nonce(persistent_commit(&(self.nonce, mt_index), opening)),
            color: self.color,
            value,
        }
    }

    pub fn commitment(&self, recipient: &Recipient) -> Commitment {
        let mut data = Vec::with_capacity(self.binary_len() + 1 + PERSISTENT_HASH_BYTES + 6);
        self.binary_repr(&mut data);
        match recipient {
            Recipient::User(pk) => (true, pk.0).binary_repr(&mut data),
            Recipient::Contract(addr) => (false, addr.0).binary_repr(&mut data),
        }
        data.extend(b"mdn:cc");
        Commitment(persistent_hash(&data))
    }

    pub fn qualify(&self, mt_index: u64) -> QualifiedInfo {
        QualifiedInfo {
            nonce: self.nonce,
            color: self.color,
            value: self.value,
            mt_index,
        }
    }
}

/// A shielded coin, together with the position it was created at. Only
/// qualified coins can be spent.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "proptest", derive(Arbitrary))]
pub struct QualifiedInfo {
    pub nonce: Nonce,
    pub color: Color,
    pub value: u128,
    pub mt_index: u64,
}

impl From<&QualifiedInfo> for Info {
    fn from(qi: &QualifiedInfo) -> Info {
        Info {
            nonce: qi.nonce,
            color: qi.color,
            value: qi.value,
        }
    }
}

impl From<QualifiedInfo> for Info {
    fn from(qi: QualifiedInfo) -> Info {
        Info::from(&qi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ContractAddress;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn labelled_keys_are_stable() {
        let alice = SecretKey::from_label("ALICE");
        assert_eq!(alice.public_key(), SecretKey::from_label("ALICE").public_key());
        assert_ne!(alice.public_key(), SecretKey::from_label("BOB").public_key());
        assert_ne!(alice.public_key(), PublicKey::ZERO);
    }

    #[test]
    fn evolved_nonces_depend_on_position_and_domain() {
        let mut rng = StdRng::seed_from_u64(0x42);
        let color: Color = rng.r#gen();
        let coin = Info::new(&mut rng, 100, color);
        let a = coin.evolve_from(b"send", 3, 10);
        let b = coin.evolve_from(b"send", 4, 10);
        let c = coin.evolve_from(b"change", 3, 10);
        assert_eq!(a.color, coin.color);
        assert_eq!(a.value, 10);
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.nonce, c.nonce);
        assert_ne!(a.nonce, coin.nonce);
        assert_eq!(a, coin.evolve_from(b"send", 3, 10));
    }

    #[test]
    fn commitment_binds_recipient() {
        let mut rng = StdRng::seed_from_u64(0x42);
        let coin: Info = rng.r#gen();
        let user = Recipient::User(rng.r#gen());
        let contract = Recipient::Contract(ContractAddress(rng.r#gen()));
        assert_ne!(coin.commitment(&user), coin.commitment(&contract));
        assert_eq!(coin.commitment(&user), coin.commitment(&user));
    }

    #[test]
    fn qualify_keeps_coin() {
        let mut rng = StdRng::seed_from_u64(0x42);
        let coin: Info = rng.r#gen();
        let qualified = coin.qualify(17);
        assert_eq!(qualified.mt_index, 17);
        assert_eq!(Info::from(&qualified), coin);
    }

    #[test]
    fn coin_serializes_to_json() {
        let coin = Info {
            nonce: Nonce(HashOutput::filled(4)),
            color: Color(HashOutput::filled(1)),
            value: 1700,
        };
        let json = serde_json::to_string(&coin).unwrap();
        assert_eq!(serde_json::from_str::<Info>(&json).unwrap(), coin);
    }
}
