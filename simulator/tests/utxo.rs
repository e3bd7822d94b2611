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

use coin_structure::coin::{
    Color, Info as CoinInfo, Nonce, PublicKey, QualifiedInfo as QualifiedCoinInfo,
};
use coin_structure::hash::HashOutput;
use coin_structure::transfer::Recipient;
use compact_simulator::SimulatorOptions;
use compact_simulator::error::{CircuitError, SimulatorError};
use compact_simulator::test_utilities::{ALICE, BOB, CAROL, ZERO_KEY, contract_address, init_logging};
use compact_simulator::utxo::{UtxoCircuits, UtxoLedger, UtxoSimulator, utxo_simulator};
use zswap::Output;
use zswap::error::ZswapError;

const DOMAIN_1: HashOutput = HashOutput::filled(1);
const DOMAIN_2: HashOutput = HashOutput::filled(2);
const DOMAIN_3: HashOutput = HashOutput::filled(3);
const DOMAINS: [HashOutput; 3] = [DOMAIN_1, DOMAIN_2, DOMAIN_3];

const NONCE_1: Nonce = Nonce(HashOutput::filled(4));
const NONCE_2: Nonce = Nonce(HashOutput::filled(5));
const NONCE_3: Nonce = Nonce(HashOutput::filled(6));
const NONCES: [Nonce; 3] = [NONCE_1, NONCE_2, NONCE_3];

const AMOUNT_1: u128 = 1700;
const AMOUNT_2: u128 = 1800000000;
const AMOUNT_3: u128 = 1900000000000000;
const AMOUNTS: [u128; 3] = [AMOUNT_1, AMOUNT_2, AMOUNT_3];

fn recipients() -> [Recipient; 3] {
    [*ALICE, *BOB, *CAROL]
}

fn simulator() -> UtxoSimulator {
    init_logging();
    utxo_simulator(SimulatorOptions::default()).unwrap()
}

fn own(sim: &UtxoSimulator) -> Recipient {
    Recipient::Contract(sim.contract_address())
}

/// Mints `AMOUNT_1` to ALICE and takes the coin into the contract's custody.
fn mint_and_receive(sim: &mut UtxoSimulator) -> CoinInfo {
    let coin = sim.mint(DOMAIN_1, AMOUNT_1, NONCE_1, *ALICE).unwrap();
    sim.as_caller(*ALICE).receive_token(coin).unwrap();
    coin
}

#[test]
fn coin_public_key_follows_caller() {
    for caller in recipients() {
        let mut sim = simulator();
        sim.as_caller(caller).mint(DOMAIN_1, AMOUNT_1, NONCE_1, *ALICE).unwrap();
        assert_eq!(sim.zswap_state().coin_public_key, caller.coin_public_key());
        assert_ne!(sim.zswap_state().coin_public_key, ZERO_KEY);
    }
}

#[test]
fn coin_public_key_is_zero_without_caller() {
    let mut sim = simulator();
    sim.mint(DOMAIN_1, AMOUNT_1, NONCE_1, *ALICE).unwrap();
    assert_eq!(sim.zswap_state().coin_public_key, PublicKey::ZERO);
}

#[test]
fn bound_caller_lasts_one_call() {
    let mut sim = simulator();
    sim.as_caller(*BOB).mint(DOMAIN_1, AMOUNT_1, NONCE_1, *ALICE).unwrap();
    sim.mint(DOMAIN_1, AMOUNT_1, NONCE_2, *ALICE).unwrap();
    assert_eq!(sim.zswap_state().coin_public_key, ZERO_KEY);
}

#[test]
fn current_index_starts_at_zero() {
    let sim = simulator();
    assert_eq!(sim.zswap_state().current_index, 0);
}

#[test]
fn current_index_tracks_created_outputs() {
    let mut sim = simulator();
    sim.mint(DOMAIN_1, AMOUNT_1, NONCE_1, *ALICE).unwrap();
    assert_eq!(sim.zswap_state().current_index, 1);

    sim.mint(DOMAIN_1, AMOUNT_1, NONCE_1, *ALICE).unwrap();
    assert_eq!(sim.zswap_state().current_index, 2);

    for _ in 0..8 {
        sim.mint(DOMAIN_1, AMOUNT_1, NONCE_1, *ALICE).unwrap();
    }
    assert_eq!(sim.zswap_state().current_index, 10);
}

#[test]
fn current_index_tracks_inputs_and_outputs() {
    let mut sim = simulator();
    for nonce in NONCES {
        sim.mint(DOMAIN_1, AMOUNT_1, nonce, *ALICE).unwrap();
    }
    assert_eq!(sim.zswap_state().current_index, 3);

    let color = sim.color(DOMAIN_1).unwrap();
    let coin = CoinInfo {
        nonce: NONCE_1,
        color,
        value: AMOUNT_1,
    };
    sim.as_caller(*ALICE).receive_token(coin).unwrap();
    assert_eq!(sim.zswap_state().current_index, 3);

    let held = sim.public_state().unwrap().coin;
    assert_eq!(held.mt_index, 0);
    sim.send_token(held, *BOB, 1).unwrap();
    assert_eq!(sim.zswap_state().current_index, 5);
}

#[test]
fn single_mint_output() {
    let mut sim = simulator();
    sim.mint(DOMAIN_1, AMOUNT_1, NONCE_1, *ALICE).unwrap();
    let zswap = sim.zswap_state();

    assert!(zswap.inputs.is_empty());
    assert_eq!(
        zswap.outputs,
        vec![Output {
            coin_info: CoinInfo {
                nonce: NONCE_1,
                color: sim.contract_address().custom_shielded_token_type(DOMAIN_1),
                value: AMOUNT_1,
            },
            recipient: *ALICE,
        }]
    );
}

#[test]
fn multiple_mint_outputs() {
    let mut sim = simulator();
    for (i, recipient) in recipients().into_iter().enumerate() {
        sim.mint(DOMAINS[i], AMOUNTS[i], NONCES[i], recipient).unwrap();
        let zswap = sim.zswap_state();
        assert!(zswap.inputs.is_empty());
        assert_eq!(zswap.outputs.len(), 1);
        assert_eq!(
            zswap.outputs[0].coin_info.color,
            sim.contract_address().custom_shielded_token_type(DOMAINS[i])
        );
        assert_eq!(zswap.outputs[0].coin_info.value, AMOUNTS[i]);
        assert_eq!(zswap.outputs[0].coin_info.nonce, NONCES[i]);
        assert_eq!(zswap.outputs[0].recipient, recipient);
    }
    let created = sim.zswap_state().created();
    assert_eq!(created.len(), 3);
    for (i, output) in created.iter().enumerate() {
        assert_eq!(output.coin_info.value, AMOUNTS[i]);
        assert_eq!(output.recipient, recipients()[i]);
    }
}

#[test]
fn send_matches_inputs_and_outputs() {
    let mut sim = simulator();
    let color = sim.color(DOMAIN_1).unwrap();
    mint_and_receive(&mut sim);

    let held = sim.public_state().unwrap().coin;
    let res = sim.send_token(held, *BOB, 1).unwrap();
    let zswap = sim.zswap_state();

    assert_eq!(zswap.inputs.len(), 1);
    assert_eq!(zswap.inputs[0].color, color);
    assert_eq!(zswap.inputs[0].mt_index, 0);
    assert_eq!(zswap.inputs[0].nonce, NONCE_1);
    assert_eq!(zswap.inputs[0].value, AMOUNT_1);

    assert_eq!(zswap.outputs.len(), 2);
    assert_eq!(zswap.outputs[0].coin_info.color, color);
    assert_eq!(zswap.outputs[0].coin_info.value, 1);
    assert_eq!(zswap.outputs[0].recipient, *BOB);
    assert_eq!(zswap.outputs[1].coin_info.color, color);
    assert_eq!(zswap.outputs[1].coin_info.value, AMOUNT_1 - 1);
    assert_eq!(zswap.outputs[1].recipient, own(&sim));
    assert_ne!(zswap.outputs[0].coin_info.nonce, zswap.outputs[1].coin_info.nonce);
    assert!(zswap.is_balanced().unwrap());

    assert_eq!(res.sent, zswap.outputs[0].coin_info);
    assert_eq!(res.change, Some(zswap.outputs[1].coin_info));
    let ledger = sim.public_state().unwrap();
    assert_eq!(ledger.coin.value, AMOUNT_1 - 1);
    assert_eq!(ledger.coin.mt_index, 2);
}

#[test]
fn sending_everything_leaves_no_change() {
    let mut sim = simulator();
    mint_and_receive(&mut sim);
    let held = sim.public_state().unwrap().coin;
    let res = sim.send_token(held, *BOB, AMOUNT_1).unwrap();
    assert_eq!(res.change, None);
    assert_eq!(sim.zswap_state().outputs.len(), 1);
    assert_eq!(sim.public_state().unwrap(), UtxoLedger::default());
}

#[test]
fn overspending_leaves_state_unchanged() {
    let mut sim = simulator();
    sim.mint(DOMAIN_1, 100, NONCE_1, *ALICE).unwrap();
    let coin = CoinInfo {
        nonce: NONCE_1,
        color: sim.color(DOMAIN_1).unwrap(),
        value: 100,
    };
    sim.receive_token(coin).unwrap();

    let before = sim.circuit_context().clone();
    let held = sim.public_state().unwrap().coin;
    match sim.send_token(held, *BOB, 150) {
        Err(SimulatorError::InsufficientValue(err)) => {
            assert_eq!(err.available, 100);
            assert_eq!(err.requested, 150);
        }
        other => panic!("expected insufficient value, got {:?}", other),
    }
    assert_eq!(sim.zswap_state(), before.zswap());
    assert_eq!(sim.circuit_context().ledger_state(), before.ledger_state());
}

#[test]
fn receiving_unknown_coins_fails() {
    let mut sim = simulator();
    sim.mint(DOMAIN_1, AMOUNT_1, NONCE_2, *ALICE).unwrap();
    let before = sim.public_state().unwrap();
    let coin = CoinInfo {
        nonce: NONCE_1,
        color: sim.color(DOMAIN_1).unwrap(),
        value: AMOUNT_1,
    };
    match sim.receive_token(coin) {
        Err(SimulatorError::CircuitExecution(CircuitError::Zswap(ZswapError::UnknownCoin(
            unknown,
        )))) => assert_eq!(unknown, coin),
        other => panic!("expected unknown coin, got {:?}", other),
    }
    assert_eq!(sim.public_state().unwrap(), before);
}

#[test]
fn coins_of_other_contracts_are_refused() {
    let mut sim = simulator();
    let mut other = simulator();
    mint_and_receive(&mut sim);
    let foreign = other.mint(DOMAIN_1, AMOUNT_1, NONCE_1, *BOB).unwrap();
    let held = sim.public_state().unwrap();

    match sim.as_caller(*BOB).receive_token(foreign) {
        Err(SimulatorError::CircuitExecution(CircuitError::Zswap(ZswapError::ForeignColor(
            color,
        )))) => assert_eq!(color, foreign.color),
        other => panic!("expected foreign color, got {:?}", other),
    }
    assert!(matches!(
        sim.receive_token_send_change(foreign, 1),
        Err(SimulatorError::CircuitExecution(CircuitError::Zswap(
            ZswapError::ForeignColor(_)
        )))
    ));
    assert_eq!(sim.public_state().unwrap(), held);
}

#[test]
fn only_the_held_coin_can_be_sent() {
    let mut sim = simulator();
    mint_and_receive(&mut sim);
    let held = sim.public_state().unwrap().coin;
    let index = sim.zswap_state().current_index;

    let forged = QualifiedCoinInfo {
        nonce: NONCE_1,
        color: Color(HashOutput::filled(0xee)),
        value: 500,
        mt_index: 0,
    };
    let inflated = QualifiedCoinInfo {
        value: held.value + 1,
        ..held
    };
    for input in [forged, inflated] {
        match sim.send_token(input, *ALICE, 100) {
            Err(SimulatorError::CircuitExecution(CircuitError::Assertion(msg))) => {
                assert_eq!(msg, "can only send the held coin")
            }
            other => panic!("expected assertion failure, got {:?}", other),
        }
    }
    assert_eq!(sim.public_state().unwrap().coin, held);
    assert_eq!(sim.zswap_state().current_index, index);
}

#[test]
fn receive_and_send_change_to_caller() {
    let mut sim = simulator();
    let coin = sim.mint(DOMAIN_1, AMOUNT_1, NONCE_1, *ALICE).unwrap();
    let res = sim
        .as_caller(*CAROL)
        .receive_token_send_change(coin, 200)
        .unwrap();

    let zswap = sim.zswap_state();
    assert_eq!(zswap.inputs, vec![coin.qualify(0)]);
    assert_eq!(zswap.outputs.len(), 2);
    assert_eq!(zswap.outputs[0].recipient, *CAROL);
    assert_eq!(zswap.outputs[0].coin_info.value, 200);
    assert_eq!(zswap.outputs[1].recipient, own(&sim));
    assert_eq!(zswap.outputs[1].coin_info.value, AMOUNT_1 - 200);
    assert_eq!(zswap.coin_public_key, CAROL.coin_public_key());

    let held = sim.public_state().unwrap().coin;
    assert_eq!(Some(CoinInfo::from(held)), res.change);
    assert_eq!(held.mt_index, 2);
}

#[test]
fn reused_nonces_are_accepted() {
    let mut sim = simulator();
    let first = sim.mint(DOMAIN_1, AMOUNT_1, NONCE_1, *ALICE).unwrap();
    let second = sim.mint(DOMAIN_1, AMOUNT_1, NONCE_1, *BOB).unwrap();
    assert_eq!(first, second);
    sim.receive_token(first).unwrap();
    assert_eq!(sim.public_state().unwrap().coin.mt_index, 1);
}

#[test]
fn colors_are_scoped_to_the_contract() {
    let mut a = utxo_simulator(SimulatorOptions {
        contract_address: Some(contract_address(0xaa)),
        ..Default::default()
    })
    .unwrap();
    let mut b = utxo_simulator(SimulatorOptions {
        contract_address: Some(contract_address(0xbb)),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(a.contract_address(), contract_address(0xaa));
    assert_ne!(a.color(DOMAIN_1).unwrap(), b.color(DOMAIN_1).unwrap());
    assert_ne!(a.color(DOMAIN_1).unwrap(), a.color(DOMAIN_2).unwrap());
    assert_eq!(
        a.color(DOMAIN_1).unwrap(),
        contract_address(0xaa).custom_shielded_token_type(DOMAIN_1)
    );
}

#[test]
fn pure_circuits_do_not_touch_zswap() {
    let mut sim = simulator();
    sim.mint(DOMAIN_1, AMOUNT_1, NONCE_1, *ALICE).unwrap();
    let before = sim.zswap_state().clone();
    sim.as_caller(*BOB).color(DOMAIN_2).unwrap();
    assert_eq!(*sim.zswap_state(), before);
}

#[test]
fn contract_state_lists_circuits() {
    let sim = simulator();
    let state = sim.contract_state();
    assert_eq!(state.address, sim.contract_address());
    assert_eq!(
        state.operations,
        vec![
            "color",
            "mint",
            "receiveToken",
            "receiveTokenSendChange",
            "sendToken"
        ]
    );
    assert_eq!(state.data.decode::<UtxoLedger>().unwrap(), UtxoLedger::default());
}
