//! Headless match loop wiring the world to the autopilot.

use std::{fmt, thread, time::Duration};

use anyhow::{Context, Result};
use snake_battle_core::{Command, Event, Fatality, GameConfig, Phase, PLAYER_COUNT};
use snake_battle_system_autopilot::Autopilot;
use snake_battle_world::{self as world, query, World};
use tracing::{debug, info, warn};

/// Outcome of a single round.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RoundSummary {
    pub(crate) round: u32,
    pub(crate) ticks: u64,
    pub(crate) level: u32,
    pub(crate) scores: [u32; PLAYER_COUNT],
    /// Empty when the round hit the tick limit.
    pub(crate) fatalities: Vec<Fatality>,
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round {}: {} ticks, level {}, score {}-{}",
            self.round, self.ticks, self.level, self.scores[0], self.scores[1]
        )?;
        if self.fatalities.is_empty() {
            return write!(f, ", tick limit reached");
        }
        for fatality in &self.fatalities {
            write!(
                f,
                ", player {} died ({:?})",
                fatality.player.number(),
                fatality.cause
            )?;
        }
        Ok(())
    }
}

/// Owns the world and the systems reacting to it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    autopilot: Autopilot,
    pacing: Option<Duration>,
}

impl Session {
    pub(crate) fn new(config: GameConfig, seed: u64, realtime: bool) -> Result<Self> {
        let pacing = realtime.then(|| Duration::from_secs(1) / config.tick_rate_hz.max(1));
        let world = World::with_config(config, seed).context("failed to build the world")?;
        Ok(Self {
            world,
            autopilot: Autopilot::default(),
            pacing,
        })
    }

    pub(crate) fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }

    pub(crate) fn scores(&self) -> [u32; PLAYER_COUNT] {
        query::scores(&self.world)
    }

    /// Plays up to `rounds` rounds of at most `tick_limit` ticks each.
    ///
    /// A round that hits the tick limit ends the session, since only a
    /// finished round can be reset.
    pub(crate) fn play(&mut self, rounds: u32, tick_limit: u64) -> Vec<RoundSummary> {
        let mut summaries = Vec::new();
        for round in 1..=rounds {
            if round > 1 {
                let _ = self.apply(Command::Reset);
            }
            let summary = self.play_round(round, tick_limit);
            let finished = !summary.fatalities.is_empty();
            info!(
                round,
                ticks = summary.ticks,
                level = summary.level,
                player_one = summary.scores[0],
                player_two = summary.scores[1],
                "round finished"
            );
            summaries.push(summary);
            if !finished {
                warn!(round, tick_limit, "round did not end, stopping session");
                break;
            }
        }
        summaries
    }

    fn play_round(&mut self, round: u32, tick_limit: u64) -> RoundSummary {
        let mut ticks = 0;
        while ticks < tick_limit && query::phase(&self.world) != Phase::GameOver {
            let events = self.apply(Command::Tick);
            ticks += 1;

            let mut steering = Vec::new();
            self.autopilot.handle(
                &events,
                query::grid(&self.world),
                &query::snakes(&self.world),
                &query::turrets(&self.world),
                query::food(&self.world),
                &mut steering,
            );
            for command in steering {
                let _ = self.apply(command);
            }

            if let Some(pacing) = self.pacing {
                thread::sleep(pacing);
            }
        }

        RoundSummary {
            round,
            ticks,
            level: query::level(&self.world),
            scores: query::scores(&self.world),
            fatalities: query::fatalities(&self.world).to_vec(),
        }
    }

    fn apply(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        for event in &events {
            debug!(?event, "world event");
        }
        events
    }
}
