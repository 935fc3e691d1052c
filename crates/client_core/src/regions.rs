//! Per-region sequence tokens so a superseded load never overwrites a newer one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use shared::domain::DisplayRegion;

use crate::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderToken(u64);

impl RenderToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Locks are never held across an await, so a plain mutex keeps issuing
/// synchronous: a token exists as soon as a load is dispatched.
#[derive(Default)]
pub(crate) struct RegionTokens {
    head: Mutex<u64>,
    body: Mutex<u64>,
}

impl RegionTokens {
    fn lock(&self, region: DisplayRegion) -> MutexGuard<'_, u64> {
        let slot = match region {
            DisplayRegion::TableHead => &self.head,
            DisplayRegion::TableBody => &self.body,
        };
        slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issues a fresh token and clears the region under the same lock, which
    /// also invalidates every load still in flight for it.
    pub(crate) fn issue_and_clear(
        &self,
        region: DisplayRegion,
        surface: &dyn RenderSurface,
    ) -> RenderToken {
        let mut latest = self.lock(region);
        *latest += 1;
        surface.set_region(region, "");
        RenderToken(*latest)
    }

    /// Writes `markup` only while `token` is still the latest one issued.
    pub(crate) fn apply_if_latest(
        &self,
        region: DisplayRegion,
        token: RenderToken,
        surface: &dyn RenderSurface,
        markup: &str,
    ) -> bool {
        let latest = self.lock(region);
        if *latest != token.0 {
            return false;
        }
        surface.set_region(region, markup);
        true
    }

    pub(crate) fn latest(&self, region: DisplayRegion) -> RenderToken {
        RenderToken(*self.lock(region))
    }
}
