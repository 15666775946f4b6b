//! Exclusive assignment of grid slices to agents.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tileworld_core::GridDimensions;

use super::Region;
use crate::error::RegionError;

/// Shared pool of non-overlapping vertical slices, one per agent.
///
/// The grid width is divided evenly between `agents` slices; the last slice
/// absorbs any remainder columns so the whole width is patrolled. Slots are
/// claimed with an atomic compare-and-swap, so concurrent agent construction
/// can never hand the same slice out twice.
#[derive(Debug)]
pub struct RegionPool {
    dims: GridDimensions,
    radius: u32,
    slices: Vec<(i32, i32)>,
    claimed: Vec<AtomicBool>,
}

impl RegionPool {
    /// Splits the grid into `agents` slices patrolled with sensor `radius`.
    ///
    /// # Errors
    ///
    /// - [`RegionError::NoAgents`] if `agents` is zero
    /// - [`RegionError::TooManyAgents`] if a slice would have no columns
    pub fn new(dims: GridDimensions, agents: usize, radius: u32) -> Result<Self, RegionError> {
        if agents == 0 {
            return Err(RegionError::NoAgents);
        }
        let width = dims.width as usize / agents;
        if width == 0 || dims.height == 0 {
            return Err(RegionError::TooManyAgents {
                agents,
                width: dims.width,
            });
        }

        let slices = (0..agents)
            .map(|i| {
                let lo = (i * width) as i32;
                let hi = if i + 1 == agents {
                    dims.width as i32 - 1
                } else {
                    ((i + 1) * width) as i32 - 1
                };
                (lo, hi)
            })
            .collect();
        let claimed = (0..agents).map(|_| AtomicBool::new(false)).collect();

        Ok(Self {
            dims,
            radius,
            slices,
            claimed,
        })
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Total number of slices.
    pub fn slots(&self) -> usize {
        self.slices.len()
    }

    /// Number of slices not currently claimed.
    pub fn available(&self) -> usize {
        self.claimed
            .iter()
            .filter(|slot| !slot.load(Ordering::Acquire))
            .count()
    }

    /// Inclusive column bounds of slice `index`.
    pub fn slice(&self, index: usize) -> Option<(i32, i32)> {
        self.slices.get(index).copied()
    }

    /// Claims the lowest-numbered free slice and builds its region.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Exhausted`] when every slice is taken.
    pub fn claim(self: &Arc<Self>) -> Result<RegionClaim, RegionError> {
        for (index, slot) in self.claimed.iter().enumerate() {
            if slot
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                continue;
            }

            let (lo, hi) = self.slices[index];
            let region = match Region::new(lo, hi, self.radius, self.dims) {
                Ok(region) => region,
                Err(err) => {
                    self.release(index);
                    return Err(err);
                }
            };
            tracing::debug!("region pool: claimed slice {} = [{}, {}]", index, lo, hi);

            return Ok(RegionClaim {
                pool: Arc::clone(self),
                index,
                region,
            });
        }

        Err(RegionError::Exhausted {
            slots: self.slots(),
        })
    }

    fn release(&self, index: usize) {
        if let Some(slot) = self.claimed.get(index) {
            slot.store(false, Ordering::Release);
            tracing::debug!("region pool: released slice {}", index);
        }
    }
}

/// Ownership of one slice of a [`RegionPool`]. The slice is returned to the
/// pool when the claim is dropped.
#[derive(Debug)]
pub struct RegionClaim {
    pool: Arc<RegionPool>,
    index: usize,
    region: Region,
}

impl RegionClaim {
    /// Slot number within the pool.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut Region {
        &mut self.region
    }
}

impl Drop for RegionClaim {
    fn drop(&mut self) {
        self.pool.release(self.index);
    }
}
