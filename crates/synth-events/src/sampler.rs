//! Event sampler: bounded rejection sampling over entity-type pairs.
//!
//! Each event attempt draws two distinct entity types, consults the
//! relation table, and resamples both types until a related pair is found
//! or a draw budget runs out. Two budgets apply: one per attempt and one
//! for the whole run. An attempt whose pools are empty is dropped rather
//! than retried, so a run may emit fewer events than requested.

use crate::event::EventRecord;
use crate::pools::PoolIndex;
use crate::relation::{is_compatible, relation, Relation};
use rand::seq::SliceRandom;
use rand::Rng;
use synth_core::{format_iso, EntityType, GenerationConfig, RecordPool, SamplingLimits, TimeWindow};
use synth_generator::generators::timestamp::generate_timestamp;
use tracing::{debug, info, warn};

/// Error type for sampling runs.
#[derive(Debug, thiserror::Error)]
pub enum SamplingError {
    /// One attempt hit its per-event draw cap
    #[error("Could not generate event {attempt} of {requested}: no related entity types found after {draws} draws")]
    Exhausted {
        /// One-based index of the failing attempt
        attempt: usize,
        requested: usize,
        draws: u64,
    },

    /// The run spent its whole draw budget
    #[error("Could not generate event {attempt} of {requested}: run-wide budget of {budget} draws is spent")]
    BudgetExhausted {
        attempt: usize,
        requested: usize,
        budget: u64,
    },

    /// No ordered pair of drawable types has a relation
    #[error("No related pair of distinct entity types among: {0}")]
    NoCompatiblePairs(String),
}

/// Result of a single event attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    /// An event was assembled
    Emitted(EventRecord),
    /// The pair was related but one of its pools was empty
    Dropped {
        entity1: EntityType,
        entity2: EntityType,
    },
    /// The per-event draw cap ran out before a related pair was found
    Exhausted { draws: u64 },
    /// The run-wide draw budget was already spent
    BudgetSpent { total_draws: u64 },
}

/// Why the rejection loop gave up.
enum Exhaustion {
    PerEvent(u64),
    Budget,
}

/// Counters for one sampling run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SamplerStats {
    /// Event attempts made
    pub attempts: usize,
    /// Events emitted
    pub emitted: usize,
    /// Attempts dropped because a primary or secondary pool was empty
    pub dropped_empty_pool: usize,
    /// Type-pair draws rejected by the relation table
    pub rejected_draws: u64,
    /// Draws made in total
    pub total_draws: u64,
    /// Emitted events whose additional entity pool was empty
    pub missing_additional: usize,
}

/// Samples interaction events from materialized record pools.
pub struct EventSampler<'a> {
    pools: PoolIndex<'a>,
    window: TimeWindow,
    limits: SamplingLimits,
    /// Absolute `total_draws` value at which drawing stops
    draw_budget: Option<u64>,
    drawable: Vec<EntityType>,
    stats: SamplerStats,
}

impl<'a> EventSampler<'a> {
    /// Create a sampler that draws from the tags a schema may declare.
    ///
    /// Relation-only tags such as `quest` are never drawn unless added
    /// with [`EventSampler::with_drawable`].
    pub fn new(pools: &'a [RecordPool], config: &GenerationConfig) -> Self {
        Self {
            pools: PoolIndex::new(pools),
            window: config.window,
            limits: config.sampling,
            draw_budget: config.sampling.max_total_draws,
            drawable: EntityType::REQUIRED.to_vec(),
            stats: SamplerStats::default(),
        }
    }

    /// Replace the entity types that can be drawn.
    pub fn with_drawable(mut self, types: Vec<EntityType>) -> Self {
        self.drawable = types;
        self
    }

    pub fn stats(&self) -> &SamplerStats {
        &self.stats
    }

    pub fn pools(&self) -> &PoolIndex<'a> {
        &self.pools
    }

    /// Whether some ordered pair of distinct drawable types is related.
    pub fn has_compatible_pair(&self) -> bool {
        self.drawable.iter().any(|a| {
            self.drawable
                .iter()
                .any(|b| a != b && is_compatible(*a, *b))
        })
    }

    /// Draw two distinct types uniformly.
    fn draw_types<R: Rng>(&self, rng: &mut R) -> Option<(EntityType, EntityType)> {
        let n = self.drawable.len();
        if n < 2 {
            return None;
        }
        let first = rng.gen_range(0..n);
        // uniform over the other n - 1 types
        let mut second = rng.gen_range(0..n - 1);
        if second >= first {
            second += 1;
        }
        Some((self.drawable[first], self.drawable[second]))
    }

    /// Rejection loop for one attempt.
    fn draw_related<R: Rng>(
        &mut self,
        rng: &mut R,
    ) -> Result<(EntityType, EntityType, Relation), Exhaustion> {
        let mut draws = 0u64;
        loop {
            if draws >= u64::from(self.limits.max_draws_per_event) {
                return Err(Exhaustion::PerEvent(draws));
            }
            if self
                .draw_budget
                .is_some_and(|budget| self.stats.total_draws >= budget)
            {
                return Err(Exhaustion::Budget);
            }

            let Some((entity1, entity2)) = self.draw_types(rng) else {
                return Err(Exhaustion::PerEvent(draws));
            };
            draws += 1;
            self.stats.total_draws += 1;

            match relation(entity1, entity2, rng) {
                Some(rel) => return Ok((entity1, entity2, rel)),
                None => self.stats.rejected_draws += 1,
            }
        }
    }

    /// Make one event attempt.
    pub fn sample_one<R: Rng>(&mut self, rng: &mut R) -> SampleOutcome {
        self.stats.attempts += 1;

        let (entity1, entity2, rel) = match self.draw_related(rng) {
            Ok(drawn) => drawn,
            Err(Exhaustion::PerEvent(draws)) => return SampleOutcome::Exhausted { draws },
            Err(Exhaustion::Budget) => {
                return SampleOutcome::BudgetSpent {
                    total_draws: self.stats.total_draws,
                }
            }
        };

        let (Some(first), Some(second)) = (
            self.pools.records(entity1).choose(rng),
            self.pools.records(entity2).choose(rng),
        ) else {
            self.stats.dropped_empty_pool += 1;
            return SampleOutcome::Dropped { entity1, entity2 };
        };

        let additional_entity = rel
            .additional_type
            .and_then(|t| self.pools.records(t).choose(rng))
            .map(|record| (*record).clone());
        if rel.additional_type.is_some() && additional_entity.is_none() {
            self.stats.missing_additional += 1;
        }

        let timestamp = format_iso(&generate_timestamp(rng, &self.window));
        self.stats.emitted += 1;

        SampleOutcome::Emitted(EventRecord {
            label: EventRecord::label_for(entity1, entity2),
            timestamp,
            entity1_type: entity1,
            entity1: (*first).clone(),
            entity2_type: entity2,
            entity2: (*second).clone(),
            verb: rel.verb.to_string(),
            additional_type: rel.additional_type,
            additional_entity,
        })
    }

    /// Make `count` event attempts and collect the emitted events.
    ///
    /// Dropped attempts still count toward `count`. The run-wide budget is
    /// `max_total_draws` when set, otherwise `max_draws_per_event * count`.
    /// Fails as soon as either budget is spent.
    pub fn run<R: Rng>(&mut self, count: usize, rng: &mut R) -> Result<Vec<EventRecord>, SamplingError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        if !self.has_compatible_pair() {
            let names: Vec<&str> = self.drawable.iter().map(|t| t.as_str()).collect();
            return Err(SamplingError::NoCompatiblePairs(names.join(", ")));
        }

        let budget = self.limits.total_budget(count);
        self.draw_budget = Some(self.stats.total_draws.saturating_add(budget));
        info!("Sampling {} interaction events (draw budget {})", count, budget);

        let mut events = Vec::with_capacity(count);
        for attempt in 1..=count {
            match self.sample_one(rng) {
                SampleOutcome::Emitted(event) => events.push(event),
                SampleOutcome::Dropped { entity1, entity2 } => {
                    debug!("Dropped {}_with_{}: empty record pool", entity1, entity2);
                }
                SampleOutcome::Exhausted { draws } => {
                    return Err(SamplingError::Exhausted {
                        attempt,
                        requested: count,
                        draws,
                    });
                }
                SampleOutcome::BudgetSpent { .. } => {
                    return Err(SamplingError::BudgetExhausted {
                        attempt,
                        requested: count,
                        budget,
                    });
                }
            }
        }

        if self.stats.missing_additional > 0 {
            warn!(
                "{} events were emitted without their additional entity (empty pool)",
                self.stats.missing_additional
            );
        }
        info!(
            "Sampled {} events ({} dropped for empty pools, {} rejected draws)",
            self.stats.emitted, self.stats.dropped_empty_pool, self.stats.rejected_draws
        );

        Ok(events)
    }
}
