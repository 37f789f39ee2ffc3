//! End-to-end replay: genesis allocation, a value transfer with sender
//! recovery, the block reward, and an uncle reward, verified against
//! the declared `stateRoot` at each step — the same shape as mainnet
//! block 46147, the first block carrying a user transaction, built
//! from a synthetic signing key since the real historical bytes aren't
//! available here.

use std::sync::Arc;

use chain_crypto::{keccak256, Address};
use chain_primitives::{Block, BlockHeader, Transaction, Uncle};
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature, SigningKey};
use primitive_types::U256;
use replay_engine::{BlockProcessor, ReplayConfig, ReplayError};
use rlp_codec::{encode, Item};
use state_trie::{empty_tree_root, Account, InMemoryNodeStore, Trie};

fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

fn signed_transfer(
    key: &SigningKey,
    nonce: u64,
    to: Address,
    value: U256,
    gas_price: U256,
) -> Transaction {
    let mut tx = Transaction {
        nonce,
        gas_price,
        gas_limit: 21_000,
        to,
        value,
        data: Vec::new(),
        v: 0,
        r: [0; 32],
        s: [0; 32],
    };
    let hash = keccak256(&tx.signing_rlp());
    let (sig, recovery_id): (Signature, RecoveryId) = key.sign_prehash_recoverable(&hash).unwrap();
    let bytes = sig.to_bytes();
    tx.r.copy_from_slice(&bytes[..32]);
    tx.s.copy_from_slice(&bytes[32..]);
    tx.v = if recovery_id.is_y_odd() { 28 } else { 27 };
    tx
}

fn empty_ommers_hash() -> [u8; 32] {
    keccak256(&encode(&Item::List(vec![])))
}

fn header_template(number: u64, parent_hash: [u8; 32], beneficiary: Address) -> BlockHeader {
    BlockHeader {
        parent_hash,
        ommers_hash: empty_ommers_hash(),
        beneficiary,
        state_root: [0; 32],
        transactions_root: empty_tree_root(),
        receipts_root: empty_tree_root(),
        logs_bloom: vec![0u8; 256],
        difficulty: U256::from(1_000_000u64),
        number,
        gas_limit: 5_000_000,
        gas_used: 0,
        timestamp: number * 15,
        extra_data: vec![],
        mix_hash: [0; 32],
        nonce: [0; 8],
    }
}

fn genesis_allocation_rlp(entries: &[(Address, U256)]) -> Vec<u8> {
    encode(&Item::List(
        entries
            .iter()
            .map(|(addr, value)| {
                let stripped: Vec<u8> = addr.iter().copied().skip_while(|&b| b == 0).collect();
                let mut value_be = [0u8; 32];
                value.to_big_endian(&mut value_be);
                let value_stripped: Vec<u8> =
                    value_be.iter().copied().skip_while(|&b| b == 0).collect();
                Item::List(vec![Item::Bytes(stripped), Item::Bytes(value_stripped)])
            })
            .collect(),
    ))
}

#[test]
fn replays_genesis_then_a_transfer_block_with_reward_and_uncle() {
    let sender_key = SigningKey::from_bytes(&[11u8; 32].into()).unwrap();
    let sender = chain_crypto::address_from_public_key(sender_key.verifying_key());
    let recipient: Address = [0x5d, 0xf9, 0xb8, 0x79, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
    let beneficiary: Address = [0xe6, 0xa7, 0xa1, 0xd4, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
    let uncle_beneficiary: Address = [0x77; 20];

    let sender_balance = ether(10);
    let allocation = vec![(sender, sender_balance)];
    let allocation_bytes = genesis_allocation_rlp(&allocation);

    // genesis: derive the expected root the same way the processor will.
    let trie = Trie::empty(Arc::new(InMemoryNodeStore::default()));
    let mut sender_account = Account::default();
    sender_account.credit(sender_balance);
    let trie = trie.set(&sender, &sender_account.encode()).unwrap();
    let genesis_root = trie.root();

    let mut genesis_header = header_template(0, [0; 32], [0; 20]);
    genesis_header.state_root = genesis_root;
    let genesis_block = Block {
        header: genesis_header.clone(),
        transactions: vec![],
        uncles: vec![],
    };

    let mut processor = BlockProcessor::new_in_memory(ReplayConfig::default());
    processor
        .process_block(&genesis_block, Some(&allocation_bytes))
        .unwrap();
    assert_eq!(processor.head_block_number(), Some(0));
    assert_eq!(processor.state_root(), genesis_root);

    // block 1: one transfer, the byzantium-era 5 ether reward, and one
    // uncle five generations back paying a reduced reward.
    let value = U256::from(31_337u64);
    let gas_price = U256::from(20_000_000_000u64);
    let tx = signed_transfer(&sender_key, 0, recipient, value, gas_price);
    let fee = U256::from(21_000u64) * gas_price;

    let reward = ether(5);
    let uncle_number = 0u64;
    let uncle_age = 1u64;
    let uncle_payout = reward - (U256::from(uncle_age) * reward) / U256::from(8u64);
    let inclusion_bonus = reward / U256::from(32u64);

    let next_trie = Trie::at_root(processor.store().clone(), processor.state_root());
    let mut sender_account = Account::decode(&next_trie.get(&sender).unwrap().unwrap()).unwrap();
    sender_account.debit(value + fee).unwrap();
    sender_account.nonce += 1;
    let next_trie = next_trie.set(&sender, &sender_account.encode()).unwrap();

    let mut recipient_account = Account::default();
    recipient_account.credit(value);
    let next_trie = next_trie.set(&recipient, &recipient_account.encode()).unwrap();

    let mut beneficiary_account = Account::default();
    beneficiary_account.credit(fee);
    beneficiary_account.credit(reward + inclusion_bonus);
    let next_trie = next_trie
        .set(&beneficiary, &beneficiary_account.encode())
        .unwrap();

    let mut uncle_account = Account::default();
    uncle_account.credit(uncle_payout);
    let next_trie = next_trie
        .set(&uncle_beneficiary, &uncle_account.encode())
        .unwrap();

    let expected_root = next_trie.root();

    let mut header = header_template(1, genesis_header.hash(), beneficiary);
    header.gas_used = 21_000;
    header.state_root = expected_root;
    let mut uncle: Uncle = header_template(uncle_number, genesis_header.parent_hash, uncle_beneficiary);
    uncle.state_root = genesis_root;
    let block = Block {
        header,
        transactions: vec![tx],
        uncles: vec![uncle],
    };

    processor.process_block(&block, None).unwrap();
    assert_eq!(processor.head_block_number(), Some(1));
    assert_eq!(processor.state_root(), expected_root);
}

#[test]
fn a_tampered_state_root_is_rejected_and_processor_stays_put() {
    let allocation_bytes = genesis_allocation_rlp(&[]);
    let mut header = header_template(0, [0; 32], [0; 20]);
    header.state_root = [0xAA; 32];
    let block = Block {
        header,
        transactions: vec![],
        uncles: vec![],
    };

    let mut processor = BlockProcessor::new_in_memory(ReplayConfig::default());
    let err = processor
        .process_block(&block, Some(&allocation_bytes))
        .unwrap_err();
    assert!(matches!(err, ReplayError::StateRootMismatch { .. }));
    assert_eq!(processor.head_block_number(), None);
}
