//! The block processor: the only mutable state this engine owns.

use std::sync::Arc;

use chain_crypto::{Address, Hash};
use chain_primitives::Block;
use primitive_types::U256;
use state_trie::{empty_tree_root, Account, InMemoryNodeStore, NodeStore, Trie, TrieError};

use crate::config::ReplayConfig;
use crate::domain::genesis::load_genesis_allocation;
use crate::domain::invariants::{block_reward, intrinsic_gas, uncle_inclusion_bonus, uncle_reward};
use crate::error::ReplayError;

/// Replays blocks against a persistent account-state trie, verifying
/// each block's declared `stateRoot` as it goes.
///
/// Holds the only mutable state in this crate: the current trie root and
/// the head block pointer. Everything else — gas arithmetic, reward
/// schedule, sender recovery — is a pure function of a block and this
/// processor's current state.
pub struct BlockProcessor<S: NodeStore = InMemoryNodeStore> {
    store: Arc<S>,
    state_root: Hash,
    head_block_number: Option<u64>,
    head_block_hash: Hash,
    config: ReplayConfig,
}

impl BlockProcessor<InMemoryNodeStore> {
    /// A fresh processor backed by an in-memory node store, ready to
    /// accept block 0.
    pub fn new_in_memory(config: ReplayConfig) -> Self {
        Self::with_store(Arc::new(InMemoryNodeStore::default()), config)
    }
}

impl<S: NodeStore> BlockProcessor<S> {
    /// A fresh processor over a caller-supplied store.
    pub fn with_store(store: Arc<S>, config: ReplayConfig) -> Self {
        Self {
            store,
            state_root: empty_tree_root(),
            head_block_number: None,
            head_block_hash: [0u8; 32],
            config,
        }
    }

    /// Reopens a processor at a previously-reached state, e.g. restored
    /// from a [`crate::snapshot::ProcessorSnapshot`].
    pub fn resume(
        store: Arc<S>,
        state_root: Hash,
        head_block_number: Option<u64>,
        head_block_hash: Hash,
        config: ReplayConfig,
    ) -> Self {
        Self {
            store,
            state_root,
            head_block_number,
            head_block_hash,
            config,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn state_root(&self) -> Hash {
        self.state_root
    }

    pub fn head_block_number(&self) -> Option<u64> {
        self.head_block_number
    }

    pub fn head_block_hash(&self) -> Hash {
        self.head_block_hash
    }

    fn trie(&self) -> Trie<S> {
        Trie::at_root(self.store.clone(), self.state_root)
    }

    fn check_preconditions(&self, block: &Block) -> Result<(), ReplayError> {
        match self.head_block_number {
            None if block.header.number == 0 => {}
            None => {
                return Err(ReplayError::UnexpectedBlockNumber {
                    expected: "0".to_string(),
                    actual: block.header.number,
                })
            }
            Some(head) if block.header.number == head + 1 => {}
            Some(head) => {
                return Err(ReplayError::UnexpectedBlockNumber {
                    expected: (head + 1).to_string(),
                    actual: block.header.number,
                })
            }
        }

        if block.header.parent_hash != self.head_block_hash {
            return Err(ReplayError::ParentHashMismatch {
                expected: hex::encode(self.head_block_hash),
                actual: hex::encode(block.header.parent_hash),
            });
        }

        Ok(())
    }

    /// Applies `block` to the current state, requiring the resulting
    /// trie root to match `block.header.state_root`.
    ///
    /// `genesis_allocation` must be `Some` exactly when `block.header.number
    /// == 0`; it is the RLP of the external genesis allocation file
    /// (§6). On any error the processor is left untouched — callers
    /// should treat the previous `state_root` as the last valid snapshot
    /// boundary and not retry the same block.
    #[tracing::instrument(skip(self, block, genesis_allocation), fields(number = block.header.number))]
    pub fn process_block(
        &mut self,
        block: &Block,
        genesis_allocation: Option<&[u8]>,
    ) -> Result<(), ReplayError> {
        self.check_preconditions(block)?;

        let is_genesis = block.header.number == 0;
        let mut trie = self.trie();

        if is_genesis {
            if !block.transactions.is_empty() || !block.uncles.is_empty() {
                return Err(ReplayError::InvalidGenesis(
                    "genesis block must have no transactions or uncles".to_string(),
                ));
            }
            if block.header.beneficiary != [0u8; 20] {
                return Err(ReplayError::InvalidGenesis(
                    "genesis beneficiary must be the zero address".to_string(),
                ));
            }
            if block.header.transactions_root != empty_tree_root()
                || block.header.receipts_root != empty_tree_root()
            {
                return Err(ReplayError::InvalidGenesis(
                    "genesis transactionsRoot/receiptsRoot must be the empty tree root"
                        .to_string(),
                ));
            }

            let allocation_bytes =
                genesis_allocation.ok_or(ReplayError::MissingGenesisAllocation)?;
            for (address, value) in load_genesis_allocation(allocation_bytes)? {
                trie = credit_account(&trie, &address, value, false)?;
            }
        }

        let mut block_gas = 0u64;
        for (index, tx) in block.transactions.iter().enumerate() {
            let gas = intrinsic_gas(tx, block.header.number, &self.config);
            if gas > tx.gas_limit {
                return Err(ReplayError::GasLimitTooLow {
                    gas,
                    limit: tx.gas_limit,
                });
            }
            block_gas += gas;

            // Sender recovery must run in transaction order, sequentially:
            // nonce application below depends on it.
            let sender = tx.sender().map_err(ReplayError::Primitives)?;
            let fee = U256::from(gas) * tx.gas_price;

            tracing::debug!(
                index,
                sender = %hex::encode(sender),
                to = %hex::encode(tx.to),
                gas,
                "applying transaction"
            );

            trie = debit_account(&trie, &sender, tx.value + fee, true)?;
            trie = credit_account(&trie, &tx.to, tx.value, false)?;
            trie = credit_account(&trie, &block.header.beneficiary, fee, false)?;
        }

        if block_gas != block.header.gas_used {
            return Err(ReplayError::GasUsedMismatch {
                computed: block_gas,
                declared: block.header.gas_used,
            });
        }

        if !is_genesis {
            let reward = block_reward(block.header.number, &self.config);
            let inclusion_bonus =
                uncle_inclusion_bonus(reward) * U256::from(block.uncles.len() as u64);
            trie = credit_account(&trie, &block.header.beneficiary, reward + inclusion_bonus, false)?;

            for uncle in &block.uncles {
                let payout = uncle_reward(uncle.number, block.header.number, reward);
                trie = credit_account(&trie, &uncle.beneficiary, payout, false)?;
            }
        }

        let computed_root = trie.root();
        if computed_root != block.header.state_root {
            tracing::warn!(
                computed = %hex::encode(computed_root),
                declared = %hex::encode(block.header.state_root),
                "state root mismatch, aborting block"
            );
            return Err(ReplayError::StateRootMismatch {
                computed: hex::encode(computed_root),
                declared: hex::encode(block.header.state_root),
            });
        }

        self.state_root = computed_root;
        self.head_block_hash = block.header.hash();
        self.head_block_number = Some(block.header.number);
        Ok(())
    }
}

fn load_account<S: NodeStore>(trie: &Trie<S>, address: &Address) -> Result<Account, ReplayError> {
    match trie.get(address).map_err(ReplayError::Trie)? {
        Some(bytes) => Account::decode(&bytes).map_err(ReplayError::Trie),
        None => Ok(Account::default()),
    }
}

fn store_account<S: NodeStore>(
    trie: &Trie<S>,
    address: &Address,
    account: &Account,
) -> Result<Trie<S>, ReplayError> {
    trie.set(address, &account.encode()).map_err(ReplayError::Trie)
}

/// Credits `amount` to `address`'s balance, optionally bumping its nonce.
fn credit_account<S: NodeStore>(
    trie: &Trie<S>,
    address: &Address,
    amount: U256,
    bump_nonce: bool,
) -> Result<Trie<S>, ReplayError> {
    let mut account = load_account(trie, address)?;
    account.credit(amount);
    if bump_nonce {
        account.nonce += 1;
    }
    store_account(trie, address, &account)
}

/// Debits `amount` from `address`'s balance, optionally bumping its
/// nonce. Fails if the balance would go negative.
fn debit_account<S: NodeStore>(
    trie: &Trie<S>,
    address: &Address,
    amount: U256,
    bump_nonce: bool,
) -> Result<Trie<S>, ReplayError> {
    let mut account = load_account(trie, address)?;
    account.debit(amount).map_err(|err| match err {
        TrieError::InsufficientBalance {
            required,
            available,
        } => ReplayError::InsufficientBalance {
            required,
            available,
        },
        other => ReplayError::Trie(other),
    })?;
    if bump_nonce {
        account.nonce += 1;
    }
    store_account(trie, address, &account)
}
