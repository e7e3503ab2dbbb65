//! Duel simulation - Scripted hits through the engine with host-side effects

use crate::scenario::Scenario;
use combat_core::attribute::Tick;
use combat_core::defense::Avoidance;
use combat_core::entity::AppliedDamage;
use combat_core::{
    CombatEngine, CombatEntity, CombatOutcome, Combatant, DamageContext, DamageEvent,
    RecordingHost,
};
use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;

/// Both fighters, owned by the simulation host
struct Arena {
    attacker: CombatEntity,
    defender: CombatEntity,
}

impl Arena {
    fn get(&self, id: &str) -> Option<&CombatEntity> {
        [&self.attacker, &self.defender]
            .into_iter()
            .find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut CombatEntity> {
        if self.attacker.id == id {
            Some(&mut self.attacker)
        } else if self.defender.id == id {
            Some(&mut self.defender)
        } else {
            None
        }
    }

    fn advance_to(&mut self, tick: Tick) {
        let expired = self.attacker.attributes.advance_to(tick) + self.defender.attributes.advance_to(tick);
        if expired > 0 {
            tracing::debug!(tick, expired, "modifiers expired");
        }
    }

    /// Apply the side effects the engine handed to the host
    ///
    /// Damage requests go back through the engine before landing, so thorns
    /// reflections are mitigated like any other hit.
    fn settle(
        &mut self,
        engine: &mut CombatEngine,
        host: RecordingHost,
        report: &mut DuelSimulation,
        rng: &mut impl Rng,
    ) {
        let mut pending: VecDeque<RecordingHost> = VecDeque::from([host]);

        while let Some(host) = pending.pop_front() {
            for (id, health) in host.health_updates {
                if let Some(entity) = self.get_mut(&id) {
                    entity.health = health;
                }
            }

            for request in host.damage_applied {
                let mut inner = RecordingHost::new();
                let Some(damage) = self.resolve_request(engine, &request, &mut inner, rng) else {
                    continue;
                };
                report.reflected_damage += damage;
                self.deal(&request.target, damage);
                pending.push_back(inner);
            }
        }
    }

    fn resolve_request(
        &self,
        engine: &mut CombatEngine,
        request: &AppliedDamage,
        host: &mut RecordingHost,
        rng: &mut impl Rng,
    ) -> Option<f64> {
        let victim = self.get(&request.target)?;
        let source = request.source.as_deref().and_then(|id| self.get(id));
        let ctx = DamageContext::from_cause(request.cause);
        let event = DamageEvent::new(source.map(|s| s as &dyn Combatant), victim, request.amount, &ctx);

        let outcome = engine.resolve_with_rng(&event, host, rng);
        tracing::debug!(
            victim = %request.target,
            cause = ?request.cause,
            requested = request.amount,
            landed = outcome.final_damage,
            "host damage request"
        );
        Some(outcome.final_damage)
    }

    fn deal(&mut self, id: &str, damage: f64) {
        if let Some(entity) = self.get_mut(id) {
            entity.health = (entity.health - damage).max(0.0);
        }
    }
}

/// Result of running a scenario
#[derive(Debug, Clone, Default, Serialize)]
pub struct DuelSimulation {
    pub scenario: String,
    pub hit_count: u32,
    pub dodge_count: u32,
    pub parry_count: u32,
    pub block_count: u32,
    pub crit_count: u32,
    /// Damage dealt to the defender
    pub total_damage: f64,
    /// Damage reflected onto the attacker after mitigation
    pub reflected_damage: f64,
    pub healed: f64,
    pub kill_tick: Option<Tick>,
    pub attacker_health: f64,
    pub defender_health: f64,
    /// Per-hit outcomes, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<CombatOutcome>,
}

impl DuelSimulation {
    /// Run every scripted hit until the scenario ends or someone dies
    pub fn run(
        engine: &mut CombatEngine,
        scenario: &Scenario,
        keep_outcomes: bool,
        rng: &mut impl Rng,
    ) -> Self {
        let mut arena = Arena {
            attacker: scenario.attacker.build(),
            defender: scenario.defender.build(),
        };
        let ctx = scenario.attack.context();
        let mut result = DuelSimulation {
            scenario: scenario.name.clone(),
            ..Default::default()
        };

        for hit in 0..scenario.attack.hits {
            if !arena.attacker.is_alive() || !arena.defender.is_alive() {
                break;
            }
            let tick = hit as Tick * scenario.attack.interval;
            arena.advance_to(tick);

            let mut host = RecordingHost::new();
            let event = DamageEvent::new(
                Some(&arena.attacker),
                &arena.defender,
                scenario.attack.base_damage,
                &ctx,
            );
            let outcome = engine.resolve_with_rng(&event, &mut host, rng);

            result.record(&outcome);
            let defender_id = arena.defender.id.clone();
            arena.deal(&defender_id, outcome.final_damage);
            arena.settle(engine, host, &mut result, rng);

            tracing::trace!(hit, tick, summary = %outcome.summary(), "hit resolved");

            if !arena.defender.is_alive() && result.kill_tick.is_none() {
                result.kill_tick = Some(tick);
                tracing::info!(tick, hits = result.hit_count, "defender killed");
            }
            if keep_outcomes {
                result.outcomes.push(outcome);
            }
        }

        result.attacker_health = arena.attacker.health;
        result.defender_health = arena.defender.health;
        result
    }

    fn record(&mut self, outcome: &CombatOutcome) {
        self.hit_count += 1;
        match outcome.avoided {
            Some(Avoidance::Dodge) => self.dodge_count += 1,
            Some(Avoidance::Parry) => self.parry_count += 1,
            None => {}
        }
        if outcome.was_blocked() {
            self.block_count += 1;
        }
        if outcome.is_critical() {
            self.crit_count += 1;
        }
        self.total_damage += outcome.final_damage;
        self.healed += outcome.healed();
    }

    /// Calculate crit rate
    pub fn crit_rate(&self) -> f64 {
        self.rate(self.crit_count)
    }

    /// Share of hits dodged or parried
    pub fn avoid_rate(&self) -> f64 {
        self.rate(self.dodge_count + self.parry_count)
    }

    /// Calculate average damage per hit
    pub fn avg_damage(&self) -> f64 {
        if self.hit_count > 0 {
            self.total_damage / self.hit_count as f64
        } else {
            0.0
        }
    }

    fn rate(&self, count: u32) -> f64 {
        if self.hit_count > 0 {
            count as f64 / self.hit_count as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Scenario: {}", self.scenario),
            format!(
                "Hits: {} ({} dodged, {} parried, {} blocked, {} crits)",
                self.hit_count, self.dodge_count, self.parry_count, self.block_count, self.crit_count
            ),
            format!(
                "Damage: {:.1} total, {:.2} per hit, {:.1}% crit, {:.1}% avoided",
                self.total_damage,
                self.avg_damage(),
                self.crit_rate(),
                self.avoid_rate()
            ),
        ];
        if self.reflected_damage > 0.0 {
            lines.push(format!("Reflected: {:.1}", self.reflected_damage));
        }
        if self.healed > 0.0 {
            lines.push(format!("Healed: {:.1}", self.healed));
        }
        match self.kill_tick {
            Some(tick) => lines.push(format!("Defender killed at tick {}", tick)),
            None => lines.push(format!("Defender survived with {:.1} health", self.defender_health)),
        }
        lines.push(format!("Attacker health: {:.1}", self.attacker_health));
        lines.join("\n")
    }
}
