//! Circular reference detection for cell reads.
//!
//! References are only discovered while an expression is being evaluated,
//! so cycle detection happens during the traversal itself: every reference
//! crossed within one top-level read is registered with a [`CycleGuard`],
//! and reaching an address twice ends the read with
//! [`EngineError::CircularReference`].
//!
//! A guard lives for exactly one top-level read. It is created fresh by the
//! read and passed down the recursive evaluation, so nothing leaks between
//! reads and concurrent reads never share one.

use std::collections::HashSet;

use super::Address;
use super::error::{EngineError, Result};

/// Addresses visited during a single top-level read.
#[derive(Debug, Default)]
pub struct CycleGuard {
    root: Option<Address>,
    visited: HashSet<Address>,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first address visited in this read, if any.
    pub fn root(&self) -> Option<Address> {
        self.root
    }

    pub fn is_tracking(&self) -> bool {
        self.root.is_some()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.visited.contains(address)
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Register an address about to be dereferenced.
    ///
    /// Fails if the address was already visited in this read; the error
    /// carries the visited set in row-major order.
    pub fn visit(&mut self, address: Address) -> Result<()> {
        if self.root.is_none() {
            self.root = Some(address);
        }

        if self.visited.insert(address) {
            return Ok(());
        }

        let mut chain: Vec<Address> = self.visited.iter().copied().collect();
        chain.sort();
        log::debug!(
            "circular reference at {} (root {:?}, {} visited)",
            address,
            self.root.map(|a| a.to_string()),
            chain.len()
        );
        Err(EngineError::CircularReference { address, chain })
    }
}
