//! Session - serial action queue with gravity
//!
//! Player input and gravity both become [`BrickAction`]s in one queue. Each
//! `tick` adds at most one gravity `MoveDown` behind whatever the player queued,
//! then resolves the whole queue in order before returning.

use std::collections::VecDeque;

use log::debug;

use piles_core::{
    BagSource, BrickMap, BrickSource, GameEvent, GameSnapshot, Resolver, ShapeTable,
};

use crate::config::{ConfigError, SessionConfig};
use crate::script::Step;
use crate::types::{
    BrickAction, BASE_DROP_MS, DROP_INTERVALS, DROP_INTERVAL_MIN_MS, ROWS_PER_LEVEL,
};

#[derive(Debug, Clone)]
pub struct Session<S = BagSource> {
    resolver: Resolver<S>,
    queue: VecDeque<BrickAction>,
    gravity_ms: u32,
    drop_timer_ms: u32,
}

impl Session<BagSource> {
    /// Build a session with a bag randomizer seeded from the config
    pub fn from_config(config: &SessionConfig, shapes: ShapeTable) -> Result<Self, ConfigError> {
        config.validate()?;
        let map = BrickMap::new(config.width, config.height, shapes);
        let resolver = Resolver::new(
            map,
            config.spawn,
            BagSource::new(config.seed),
            config.policy,
        );
        Ok(Self::new(resolver, config.gravity_ms))
    }
}

impl<S: BrickSource> Session<S> {
    pub fn new(resolver: Resolver<S>, gravity_ms: u32) -> Self {
        Self {
            resolver,
            queue: VecDeque::new(),
            gravity_ms: gravity_ms.max(1),
            drop_timer_ms: 0,
        }
    }

    /// Spawn the first brick
    pub fn start(&mut self) -> Vec<GameEvent> {
        self.resolver.start().into_iter().collect()
    }

    pub fn resolver(&self) -> &Resolver<S> {
        &self.resolver
    }

    /// Queue an action behind the ones already pending
    pub fn push(&mut self, action: BrickAction) {
        self.queue.push_back(action);
    }

    /// Queue an action by name; unknown names are dropped
    pub fn push_str(&mut self, name: &str) -> bool {
        match BrickAction::from_str(name) {
            Some(action) => {
                self.push(action);
                true
            }
            None => {
                debug!("ignoring unknown action {name:?}");
                false
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Resolve every queued action, in order
    pub fn drain(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(action) = self.queue.pop_front() {
            if self.resolver.game_over() {
                self.queue.clear();
                break;
            }
            events.extend(self.resolver.apply(action));
        }
        events
    }

    /// Advance gravity by `elapsed_ms` and resolve the queue
    pub fn tick(&mut self, elapsed_ms: u32) -> Vec<GameEvent> {
        if !self.resolver.started() || self.resolver.game_over() {
            return Vec::new();
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms >= self.drop_interval_ms() {
            self.drop_timer_ms = 0;
            self.push(BrickAction::MoveDown);
        }

        self.drain()
    }

    /// Run one script step: an action resolves immediately, a gravity step lets
    /// a full drop interval pass
    pub fn step(&mut self, step: Step) -> Vec<GameEvent> {
        match step {
            Step::Action(action) => {
                self.push(action);
                self.drain()
            }
            Step::Gravity => {
                let interval = self.drop_interval_ms();
                self.tick(interval)
            }
        }
    }

    /// One level per [`ROWS_PER_LEVEL`] cleared rows
    pub fn level(&self) -> u32 {
        self.resolver.rows_cleared() / ROWS_PER_LEVEL
    }

    /// Gravity interval for the current level
    ///
    /// The level table is scaled by the configured base interval and floored at
    /// [`DROP_INTERVAL_MIN_MS`] (or the base interval itself, if that is faster).
    pub fn drop_interval_ms(&self) -> u32 {
        let step = (self.level() as usize).min(DROP_INTERVALS.len() - 1);
        let scaled = DROP_INTERVALS[step] as u64 * self.gravity_ms as u64 / BASE_DROP_MS as u64;
        let floor = DROP_INTERVAL_MIN_MS.min(self.gravity_ms);
        (scaled as u32).max(floor)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.resolver)
    }
}
