// Per-event multiplicity: how many particles, and which group each slot
// is drawn from.

use crate::species::SpeciesTable;
use crate::stats::uniform;
use rand::Rng;

/// Slot-to-group assignment for one event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventPlan {
    pub slots: Vec<usize>,
}

impl EventPlan {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots assigned to `group`.
    pub fn occupancy(&self, group: usize) -> usize {
        self.slots.iter().filter(|&&g| g == group).count()
    }
}

/// Index of the interval of the cumulative `weights` containing `r`.
///
/// Zero-weight entries are never returned. When rounding pushes `r` past the
/// total, the last live entry is returned.
pub fn select_weighted(weights: &[f64], r: f64) -> Option<usize> {
    let mut remaining = r;
    let mut last_live = None;
    for (index, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        last_live = Some(index);
        remaining -= w;
        if remaining <= 0.0 {
            return Some(index);
        }
    }
    last_live
}

impl SpeciesTable {
    /// Draw the total multiplicity and assign every slot to a group.
    ///
    /// Group minima are placed first, then the remaining slots are filled by
    /// weighted draws; a group drops out of the draw once it holds
    /// `max_multi` particles. Feasibility is guaranteed by validation.
    pub fn sample_plan<R: Rng + ?Sized>(&self, rng: &mut R) -> EventPlan {
        let total = if self.multi_max > self.multi_min {
            rng.gen_range(self.multi_min..=self.multi_max)
        } else {
            self.multi_min
        };

        let mut slots = Vec::with_capacity(total);
        let mut counts = vec![0usize; self.groups.len()];
        let mut live_weights = Vec::with_capacity(self.groups.len());

        for (index, group) in self.groups.iter().enumerate() {
            slots.extend(std::iter::repeat(index).take(group.min_multi));
            counts[index] = group.min_multi;
            live_weights.push(if counts[index] >= group.max_multi {
                0.0
            } else {
                group.weight
            });
        }

        let mut remaining = total.saturating_sub(slots.len());
        while remaining > 0 {
            let total_weight: f64 = live_weights.iter().sum();
            let r = uniform(rng, 0.0, total_weight);
            let Some(index) = select_weighted(&live_weights, r) else {
                tracing::warn!(
                    remaining,
                    "no group has capacity left, truncating event plan"
                );
                break;
            };

            slots.push(index);
            counts[index] += 1;
            if counts[index] >= self.groups[index].max_multi {
                live_weights[index] = 0.0;
            }
            remaining -= 1;
        }

        EventPlan { slots }
    }
}
