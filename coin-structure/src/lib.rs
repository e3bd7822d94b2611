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

#![deny(unreachable_pub)]
// Proptest derive triggers this.
#![allow(non_local_definitions)]

pub mod coin;
pub mod contract;
pub mod hash;
pub mod transfer;

/// Declares a 32-byte newtype over [`hash::HashOutput`], with hex text
/// encoding, random sampling and a binary hash representation.
macro_rules! hash_newtype {
    ($(#[$meta:meta])* $ty:ident) => {
        $(#[$meta])*
        #[derive(
            Default,
            Copy,
            Clone,
            Hash,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
        pub struct $ty(pub $crate::hash::HashOutput);

        impl std::fmt::Debug for $ty {
            fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "{}({:?})", stringify!($ty), self.0)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Debug::fmt(&self.0, formatter)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map($ty)
            }
        }

        impl rand::distributions::Distribution<$ty> for rand::distributions::Standard {
            fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> $ty {
                $ty(rng.r#gen())
            }
        }

        impl $crate::hash::BinaryHashRepr for $ty {
            fn binary_repr<W: $crate::hash::MemWrite<u8>>(&self, writer: &mut W) {
                $crate::hash::BinaryHashRepr::binary_repr(&self.0, writer);
            }
            fn binary_len(&self) -> usize {
                $crate::hash::PERSISTENT_HASH_BYTES
            }
        }
    };
}
pub(crate) use hash_newtype;
