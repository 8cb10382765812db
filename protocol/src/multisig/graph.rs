//! # Multisig Graph
//!
//! The accounts related to a root account through cosigning, grouped by
//! level:
//!
//! ```text
//!   -2   accounts the level -1 accounts cosign for
//!   -1   accounts the root cosigns for
//!    0   the root
//!    1   cosignatories of the root
//!    2   cosignatories of those
//! ```
//!
//! [`MultisigGraphResolver::assemble`] builds the graph from levels someone
//! else already fetched. [`MultisigGraphResolver::traverse`] walks a
//! [`MultisigAccountSource`] from the root to produce those levels.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use super::account_info::MultisigAccountInfo;
use crate::error::{Result, SdkError};
use crate::model::address::Address;

// ---------------------------------------------------------------------------
// MultisigAccountGraphInfo
// ---------------------------------------------------------------------------

/// Multisig accounts keyed by level, in ascending level order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MultisigAccountGraphInfo {
    multisig_accounts: BTreeMap<i32, Vec<MultisigAccountInfo>>,
}

impl MultisigAccountGraphInfo {
    /// Number of distinct levels.
    pub fn levels_number(&self) -> usize {
        self.multisig_accounts.len()
    }

    /// Level keys, ascending.
    pub fn levels(&self) -> impl Iterator<Item = i32> + '_ {
        self.multisig_accounts.keys().copied()
    }

    /// Accounts at `level`, in the order they were supplied. Empty if the
    /// level is absent.
    pub fn accounts_at(&self, level: i32) -> &[MultisigAccountInfo] {
        self.multisig_accounts
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn multisig_accounts(&self) -> &BTreeMap<i32, Vec<MultisigAccountInfo>> {
        &self.multisig_accounts
    }

    /// Accounts across all levels. Duplicates count once per occurrence.
    pub fn total_accounts(&self) -> usize {
        self.multisig_accounts.values().map(Vec::len).sum()
    }

    /// `true` if the graph has exactly `levels` levels and `accounts`
    /// accounts in total.
    pub fn has_shape(&self, levels: usize, accounts: usize) -> bool {
        self.levels_number() == levels && self.total_accounts() == accounts
    }

    /// First account at level 0.
    pub fn root(&self) -> Option<&MultisigAccountInfo> {
        self.accounts_at(0).first()
    }

    /// Level and info of `address`, searching levels in ascending order.
    pub fn find(&self, address: &Address) -> Option<(i32, &MultisigAccountInfo)> {
        self.multisig_accounts.iter().find_map(|(level, accounts)| {
            accounts
                .iter()
                .find(|info| &info.account_address == address)
                .map(|info| (*level, info))
        })
    }
}

// ---------------------------------------------------------------------------
// MultisigAccountSource
// ---------------------------------------------------------------------------

/// Already-fetched multisig data, looked up by address.
pub trait MultisigAccountSource {
    /// Multisig info of `address`, or `None` if the account has none.
    fn multisig_account_info(&self, address: &Address) -> Option<MultisigAccountInfo>;
}

impl MultisigAccountSource for HashMap<Address, MultisigAccountInfo> {
    fn multisig_account_info(&self, address: &Address) -> Option<MultisigAccountInfo> {
        self.get(address).cloned()
    }
}

impl MultisigAccountSource for BTreeMap<Address, MultisigAccountInfo> {
    fn multisig_account_info(&self, address: &Address) -> Option<MultisigAccountInfo> {
        self.get(address).cloned()
    }
}

impl MultisigAccountSource for [MultisigAccountInfo] {
    fn multisig_account_info(&self, address: &Address) -> Option<MultisigAccountInfo> {
        self.iter().find(|info| &info.account_address == address).cloned()
    }
}

// ---------------------------------------------------------------------------
// MultisigGraphResolver
// ---------------------------------------------------------------------------

/// Builds [`MultisigAccountGraphInfo`] values.
pub struct MultisigGraphResolver;

#[derive(Clone, Copy)]
enum Direction {
    /// Towards accounts the current level cosigns for (negative levels).
    Multisig,
    /// Towards cosignatories of the current level (positive levels).
    Cosignatory,
}

impl Direction {
    fn step(self) -> i32 {
        match self {
            Self::Multisig => -1,
            Self::Cosignatory => 1,
        }
    }

    fn links(self, info: &MultisigAccountInfo) -> &[Address] {
        match self {
            Self::Multisig => &info.multisig_addresses,
            Self::Cosignatory => &info.cosignatory_addresses,
        }
    }
}

impl MultisigGraphResolver {
    /// Assemble a graph from per-level account lists.
    ///
    /// Order within a level is preserved. A level given twice has the second
    /// list appended to the first. Nothing is deduplicated: keeping an
    /// account to one level per direction is the caller's responsibility.
    pub fn assemble<I>(levels: I) -> MultisigAccountGraphInfo
    where
        I: IntoIterator<Item = (i32, Vec<MultisigAccountInfo>)>,
    {
        let mut multisig_accounts: BTreeMap<i32, Vec<MultisigAccountInfo>> = BTreeMap::new();
        for (level, accounts) in levels {
            multisig_accounts.entry(level).or_default().extend(accounts);
        }

        let graph = MultisigAccountGraphInfo { multisig_accounts };
        debug!(
            levels = graph.levels_number(),
            accounts = graph.total_accounts(),
            "assembled multisig graph"
        );
        graph
    }

    /// Walk `source` from `root` in both directions and assemble the levels.
    ///
    /// Within one direction an account is visited at most once, at the first
    /// level it is reached. Addresses `source` knows nothing about are
    /// skipped.
    ///
    /// # Errors
    ///
    /// [`SdkError::InvalidArgument`] if `source` has no info for `root`.
    pub fn traverse<S>(root: &Address, source: &S) -> Result<MultisigAccountGraphInfo>
    where
        S: MultisigAccountSource + ?Sized,
    {
        let root_info = source.multisig_account_info(root).ok_or_else(|| {
            SdkError::invalid(format!("no multisig account info for {root}"))
        })?;

        let mut levels = vec![(0, vec![root_info.clone()])];
        levels.extend(Self::walk(&root_info, source, Direction::Multisig));
        levels.extend(Self::walk(&root_info, source, Direction::Cosignatory));
        Ok(Self::assemble(levels))
    }

    fn walk<S>(
        root: &MultisigAccountInfo,
        source: &S,
        direction: Direction,
    ) -> Vec<(i32, Vec<MultisigAccountInfo>)>
    where
        S: MultisigAccountSource + ?Sized,
    {
        let mut visited = BTreeSet::from([root.account_address]);
        let mut frontier = vec![root.clone()];
        let mut level = 0;
        let mut levels = Vec::new();

        loop {
            level += direction.step();
            let mut next = Vec::new();
            for info in &frontier {
                for address in direction.links(info) {
                    if !visited.insert(*address) {
                        continue;
                    }
                    match source.multisig_account_info(address) {
                        Some(found) => next.push(found),
                        None => debug!(%address, level, "no multisig info, skipping"),
                    }
                }
            }
            if next.is_empty() {
                return levels;
            }
            levels.push((level, next.clone()));
            frontier = next;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
