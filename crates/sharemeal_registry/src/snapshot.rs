// --- File: crates/sharemeal_registry/src/snapshot.rs ---
//! Reconciliation against a full remote listing.
//!
//! The remote copy wins, except where accepting it would break a local
//! invariant: a status change must be a move the lifecycle allows,
//! `expires_at` never moves, and a donor never holds their own listing.
//! Such records keep their local version (or are skipped when there is none)
//! and are reported as conflicts.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use crate::models::{Donation, DonationId};
use crate::registry::DonationRegistry;

/// What an [`DonationRegistry::apply_snapshot`] call changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SnapshotDiff {
    pub added: Vec<DonationId>,
    pub updated: Vec<DonationId>,
    pub removed: Vec<DonationId>,
    pub conflicts: Vec<DonationId>,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.updated.is_empty()
            && self.removed.is_empty()
            && self.conflicts.is_empty()
    }
}

fn is_self_claimed(donation: &Donation) -> bool {
    donation.claimed_by_user_id.as_deref() == Some(donation.user_id.as_str())
}

fn conflicts_with(local: &Donation, remote: &Donation) -> bool {
    let legal_move =
        local.status == remote.status || local.status.can_transition_to(remote.status);
    !legal_move
        || local.expires_at != remote.expires_at
        || is_self_claimed(remote)
        || remote.claimed_by_user_id.as_deref() == Some(local.user_id.as_str())
}

impl DonationRegistry {
    /// Replaces the local listings with `remote` and reports the difference.
    ///
    /// Local records missing from `remote` are dropped. The result is
    /// ordered newest first by `created_at`.
    pub fn apply_snapshot(&mut self, remote: Vec<Donation>) -> SnapshotDiff {
        let mut local: HashMap<DonationId, Donation> = self
            .take_all()
            .into_iter()
            .map(|d| (d.id.clone(), d))
            .collect();
        let mut diff = SnapshotDiff::default();
        let mut seen: HashSet<DonationId> = HashSet::new();
        let mut merged = Vec::with_capacity(remote.len());

        for incoming in remote {
            if !seen.insert(incoming.id.clone()) {
                warn!("Snapshot lists donation {} twice; keeping the first", incoming.id);
                continue;
            }
            match local.remove(&incoming.id) {
                None if is_self_claimed(&incoming) => {
                    warn!("Snapshot adds {} claimed by its own donor; skipping", incoming.id);
                    diff.conflicts.push(incoming.id);
                }
                None => {
                    diff.added.push(incoming.id.clone());
                    merged.push(incoming);
                }
                Some(current) if conflicts_with(&current, &incoming) => {
                    warn!(
                        "Snapshot conflict on {}: local {} vs remote {}",
                        current.id, current.status, incoming.status
                    );
                    diff.conflicts.push(current.id.clone());
                    merged.push(current);
                }
                Some(current) => {
                    if current != incoming {
                        diff.updated.push(incoming.id.clone());
                    }
                    merged.push(incoming);
                }
            }
        }

        diff.removed = local.into_keys().collect();
        diff.removed.sort();

        merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.replace_all(merged);

        if !diff.is_empty() {
            info!(
                "Applied snapshot: {} added, {} updated, {} removed, {} conflict(s)",
                diff.added.len(),
                diff.updated.len(),
                diff.removed.len(),
                diff.conflicts.len()
            );
        }
        diff
    }
}
