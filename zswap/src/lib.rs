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

//! Coin accounting for simulated contract calls.
//!
//! [`local::LocalState`] tracks what a contract's circuits do with coins: the
//! outputs they create, the coins they spend, and the position each new
//! coin is given in the append-only output sequence.

#![deny(unreachable_pub)]

#[macro_use]
extern crate tracing;

pub mod error;
pub mod local;
mod structure;

pub use structure::*;
