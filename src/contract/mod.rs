//! Contract Entry Points
//!
//! The externally callable surface of the engine. Every entry point runs
//! start-to-finish inside one invocation: it loads the partitions it touches
//! from the persistent store into owned values, mutates them, and writes
//! them back only after every check has passed. An error return before the
//! save is what makes the invocation atomic: partial updates are never
//! observable. The surrounding ledger serializes invocations, so no locking
//! exists inside the engine.
//!
//! ## Module Structure
//!
//! - `error`: the crate-wide error taxonomy
//! - `storage`: the partitioned persistent store

pub mod error;
pub mod storage;

pub use error::Error;
pub use storage::{Store, StoreKey};

use tracing::info;

use crate::core::hash::{StateHash, StateHasher};
use crate::core::ids::{GameId, PlayerId, TournamentId};
use crate::game::combat::CombatSystem;
use crate::game::events::GameEvent;
use crate::game::movement::MovementSystem;
use crate::score::history::{PlayerHistory, ScoreRecord};
use crate::score::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::score::validate::{validate_submission, AcceptAllVerifier, ScoreVerifier};
use crate::tournament::{Tournament, TournamentInfo, TournamentStatus};
use crate::world::{Component, EntityId, Health, Position, World};
use crate::{GLOBAL_LEADERBOARD_CAP, STARTING_HEALTH};

/// Per-invocation call context.
///
/// Constructed at invocation start, passed by reference, discarded at
/// invocation end. Carries the authenticated caller identity and the
/// ledger's notion of now.
#[derive(Clone, Copy, Debug)]
pub struct CallContext {
    /// Authenticated identity making this call.
    pub caller: PlayerId,
    /// Current ledger time in seconds.
    pub ledger_time: u64,
}

impl CallContext {
    /// Create a context.
    pub fn new(caller: PlayerId, ledger_time: u64) -> Self {
        Self {
            caller,
            ledger_time,
        }
    }
}

/// The game-state contract: entity world plus tournament scoring.
pub struct GameContract {
    store: Store,
    verifier: Box<dyn ScoreVerifier>,
    /// Events generated this invocation, appended in order.
    events: Vec<GameEvent>,
}

impl GameContract {
    /// Create a contract with empty state and the accept-all verifier.
    pub fn new() -> Self {
        Self::with_verifier(Box::new(AcceptAllVerifier))
    }

    /// Create a contract with an injected anti-cheat verifier.
    pub fn with_verifier(verifier: Box<dyn ScoreVerifier>) -> Self {
        Self {
            store: Store::new(),
            verifier,
            events: Vec::new(),
        }
    }

    /// Take the events generated so far (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // ENTITY PATH
    // =========================================================================

    /// Spawn an entity at `(x, y)` with full starting health.
    pub fn spawn_entity(&mut self, ctx: &CallContext, x: u32, y: u32) -> Result<EntityId, Error> {
        let mut world = self.load_world()?;
        let _ = world.advance_tick();
        let id = world.spawn(vec![
            (Position::TYPE_TAG, Position::new(x, y).encode()),
            (Health::TYPE_TAG, Health::full(STARTING_HEALTH).encode()),
        ]);
        info!(
            caller = %hex::encode(&ctx.caller.0[..4]),
            index = id.index,
            generation = id.generation,
            "spawn_entity"
        );
        self.save_world(&mut world)?;
        Ok(id)
    }

    /// Despawn an entity. False (not an error) on unknown or dead handles.
    pub fn despawn_entity(&mut self, _ctx: &CallContext, id: EntityId) -> Result<bool, Error> {
        let mut world = self.load_world()?;
        let _ = world.advance_tick();
        if !world.despawn(id) {
            return Ok(false);
        }
        self.save_world(&mut world)?;
        Ok(true)
    }

    /// Move an entity by a delta; coordinates clamp at 0.
    pub fn move_entity(
        &mut self,
        _ctx: &CallContext,
        id: EntityId,
        dx: i32,
        dy: i32,
    ) -> Result<Position, Error> {
        let mut world = self.load_world()?;
        let _ = world.advance_tick();
        world.ensure_alive(id)?;
        let pos = world
            .get_component::<Position>(id)
            .ok_or(Error::InvalidEntity)?;
        let moved = MovementSystem::update_position(&pos, dx, dy);
        world.add_component(id, &moved)?;
        self.save_world(&mut world)?;
        Ok(moved)
    }

    /// Move an entity to absolute coordinates.
    pub fn teleport_entity(
        &mut self,
        _ctx: &CallContext,
        id: EntityId,
        x: u32,
        y: u32,
    ) -> Result<Position, Error> {
        let mut world = self.load_world()?;
        let _ = world.advance_tick();
        world.ensure_alive(id)?;
        let moved = MovementSystem::teleport(x, y);
        world.add_component(id, &moved)?;
        self.save_world(&mut world)?;
        Ok(moved)
    }

    /// Apply the standard attack to an entity.
    ///
    /// When the hit reduces health to 0 the entity is despawned here; the
    /// system itself stays pure, the lifecycle coupling is this entry
    /// point's decision.
    pub fn attack_entity(&mut self, _ctx: &CallContext, id: EntityId) -> Result<Health, Error> {
        let mut world = self.load_world()?;
        let _ = world.advance_tick();
        world.ensure_alive(id)?;
        let health = world
            .get_component::<Health>(id)
            .ok_or(Error::InvalidEntity)?;
        let struck = CombatSystem::attack(&health);
        if CombatSystem::is_dead(&struck) {
            let removed = world.despawn(id);
            debug_assert!(removed);
        } else {
            world.add_component(id, &struck)?;
        }
        self.save_world(&mut world)?;
        Ok(struck)
    }

    /// Heal an entity, clamped to its maximum health.
    pub fn heal_entity(
        &mut self,
        _ctx: &CallContext,
        id: EntityId,
        amount: u32,
    ) -> Result<Health, Error> {
        let mut world = self.load_world()?;
        let _ = world.advance_tick();
        world.ensure_alive(id)?;
        let health = world
            .get_component::<Health>(id)
            .ok_or(Error::InvalidEntity)?;
        let healed = CombatSystem::heal(&health, amount);
        world.add_component(id, &healed)?;
        self.save_world(&mut world)?;
        Ok(healed)
    }

    /// Read an entity's position. `None` for unknown, dead, or stale handles.
    pub fn get_entity_position(&self, id: EntityId) -> Result<Option<Position>, Error> {
        Ok(self.load_world()?.get_component::<Position>(id))
    }

    /// Read an entity's health. `None` for unknown, dead, or stale handles.
    pub fn get_entity_health(&self, id: EntityId) -> Result<Option<Health>, Error> {
        Ok(self.load_world()?.get_component::<Health>(id))
    }

    /// Number of alive entities.
    pub fn entity_count(&self) -> Result<u32, Error> {
        Ok(self.load_world()?.live_count())
    }

    /// Number of despawned entities whose slots await recycling.
    pub fn dead_entity_count(&self) -> Result<u32, Error> {
        Ok(self.load_world()?.dead_count())
    }

    // =========================================================================
    // TOURNAMENT PATH
    // =========================================================================

    /// Create a tournament and return its minted id.
    pub fn create_tournament(
        &mut self,
        ctx: &CallContext,
        game_id: GameId,
        name: String,
        start_time: u64,
        end_time: u64,
        entry_cap: u32,
    ) -> Result<TournamentId, Error> {
        let counter: u64 = self.store.get(&StoreKey::TournamentCounter)?.unwrap_or(0);
        let id = counter + 1;
        let tournament = Tournament::create(
            id,
            game_id.clone(),
            name,
            ctx.caller,
            start_time,
            end_time,
            entry_cap,
            ctx.ledger_time,
        )?;

        let mut index: Vec<TournamentId> =
            self.store.get(&StoreKey::TournamentIndex)?.unwrap_or_default();
        index.push(id);

        self.store.set(&StoreKey::TournamentCounter, &id)?;
        self.store.set(&StoreKey::TournamentIndex, &index)?;
        self.store.set(&StoreKey::Tournament(id), &tournament)?;
        self.events.push(GameEvent::TournamentCreated { id, game_id });
        Ok(id)
    }

    /// Close a tournament early. Creator only.
    pub fn close_tournament(
        &mut self,
        ctx: &CallContext,
        id: TournamentId,
    ) -> Result<(), Error> {
        let mut tournament = self.load_tournament(id)?;
        if ctx.caller != tournament.creator {
            return Err(Error::Unauthorized);
        }
        tournament.close();
        self.store.set(&StoreKey::Tournament(id), &tournament)?;
        self.events.push(GameEvent::TournamentClosed { id });
        Ok(())
    }

    /// Submit a score to an active tournament. Returns the new 1-based rank
    /// on the tournament leaderboard.
    pub fn submit_score(
        &mut self,
        ctx: &CallContext,
        player: PlayerId,
        tournament_id: TournamentId,
        score: u32,
        timestamp: u64,
        signature: Option<&[u8]>,
    ) -> Result<u32, Error> {
        // Check 1: the submitting identity must be the caller.
        if ctx.caller != player {
            return Err(Error::Unauthorized);
        }
        // Checks 2-4: window, monotonicity, signature hook.
        let mut tournament = self.load_tournament(tournament_id)?;
        validate_submission(
            &tournament,
            ctx.ledger_time,
            &player,
            score,
            timestamp,
            signature,
            self.verifier.as_ref(),
        )?;

        let rank = tournament.leaderboard.record(player, score, timestamp);
        tournament.record_submission_time(player, timestamp);

        let global_key = StoreKey::GlobalLeaderboard(tournament.game_id.clone());
        let mut global: Leaderboard = self
            .store
            .get(&global_key)?
            .unwrap_or_else(|| Leaderboard::new(GLOBAL_LEADERBOARD_CAP));
        let _ = global.record(player, score, timestamp);

        let history_key = StoreKey::PlayerHistory(player);
        let mut history: PlayerHistory = self.store.get(&history_key)?.unwrap_or_default();
        history.push(ScoreRecord {
            score,
            timestamp,
            game_id: tournament.game_id.clone(),
            tournament_id,
        });

        // All checks passed; persist every touched partition.
        self.store.set(&StoreKey::Tournament(tournament_id), &tournament)?;
        self.store.set(&global_key, &global)?;
        self.store.set(&history_key, &history)?;

        info!(
            player = %hex::encode(&player.0[..4]),
            tournament_id,
            score,
            rank,
            "score accepted"
        );
        self.events.push(GameEvent::ScoreSubmitted {
            player,
            tournament_id,
            score,
            rank,
        });
        Ok(rank)
    }

    // =========================================================================
    // READ-ONLY QUERIES
    // =========================================================================

    /// A page of a tournament's leaderboard.
    pub fn get_leaderboard(
        &self,
        tournament_id: TournamentId,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>, Error> {
        Ok(self.load_tournament(tournament_id)?.leaderboard.page(offset, limit))
    }

    /// A page of a game's global leaderboard.
    pub fn get_global_leaderboard(
        &self,
        game_id: &GameId,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>, Error> {
        let board: Option<Leaderboard> = self
            .store
            .get(&StoreKey::GlobalLeaderboard(game_id.clone()))?;
        Ok(board.map(|b| b.page(offset, limit)).unwrap_or_default())
    }

    /// A player's accepted submissions, oldest first.
    pub fn get_player_history(&self, player: &PlayerId) -> Result<Vec<ScoreRecord>, Error> {
        let history: Option<PlayerHistory> =
            self.store.get(&StoreKey::PlayerHistory(*player))?;
        Ok(history
            .map(|h| h.records().cloned().collect())
            .unwrap_or_default())
    }

    /// Tournament metadata, with the status effective at `ctx.ledger_time`.
    pub fn get_tournament_info(
        &self,
        ctx: &CallContext,
        id: TournamentId,
    ) -> Result<TournamentInfo, Error> {
        Ok(self.load_tournament(id)?.info(ctx.ledger_time))
    }

    /// The final leaderboard of a closed tournament.
    pub fn get_tournament_results(
        &self,
        ctx: &CallContext,
        id: TournamentId,
    ) -> Result<Vec<LeaderboardEntry>, Error> {
        let tournament = self.load_tournament(id)?;
        if tournament.effective_status(ctx.ledger_time) != TournamentStatus::Closed {
            return Err(Error::TournamentNotActive);
        }
        Ok(tournament.leaderboard.entries().to_vec())
    }

    /// Every tournament id, in creation order.
    pub fn list_tournaments(&self) -> Result<Vec<TournamentId>, Error> {
        Ok(self.store.get(&StoreKey::TournamentIndex)?.unwrap_or_default())
    }

    /// Tournaments accepting submissions at `ctx.ledger_time`, optionally
    /// filtered by game.
    pub fn get_active_tournaments(
        &self,
        ctx: &CallContext,
        game_id: Option<&GameId>,
    ) -> Result<Vec<TournamentInfo>, Error> {
        let mut active = Vec::new();
        for id in self.list_tournaments()? {
            let tournament = self.load_tournament(id)?;
            if !tournament.is_active(ctx.ledger_time) {
                continue;
            }
            if game_id.is_some_and(|wanted| tournament.game_id != *wanted) {
                continue;
            }
            active.push(tournament.info(ctx.ledger_time));
        }
        Ok(active)
    }

    /// Is the tournament accepting submissions at `ctx.ledger_time`?
    pub fn is_tournament_active(
        &self,
        ctx: &CallContext,
        id: TournamentId,
    ) -> Result<bool, Error> {
        Ok(self.load_tournament(id)?.is_active(ctx.ledger_time))
    }

    // =========================================================================
    // VERIFICATION
    // =========================================================================

    /// Deterministic digest of the full persisted state.
    ///
    /// The world is hashed structurally; every other partition is hashed as
    /// its key/value cell in key order. Two contracts that executed the same
    /// invocation sequence produce the same digest.
    pub fn state_hash(&self) -> Result<StateHash, Error> {
        let mut hasher = StateHasher::for_contract_state();
        let world = self.load_world()?;
        world.hash_into(&mut hasher);

        let world_key = StoreKey::WorldState.encode();
        for (key, value) in self.store.iter() {
            if key == world_key.as_slice() {
                continue;
            }
            hasher.update_blob(key);
            hasher.update_blob(value);
        }
        Ok(hasher.finalize())
    }

    // =========================================================================
    // INTERNAL HELPERS
    // =========================================================================

    fn load_world(&self) -> Result<World, Error> {
        Ok(self.store.get(&StoreKey::WorldState)?.unwrap_or_default())
    }

    /// Persist the world and collect the events it queued this invocation.
    fn save_world(&mut self, world: &mut World) -> Result<(), Error> {
        self.events.append(&mut world.take_events());
        self.store.set(&StoreKey::WorldState, world)
    }

    fn load_tournament(&self, id: TournamentId) -> Result<Tournament, Error> {
        self.store
            .get(&StoreKey::Tournament(id))?
            .ok_or(Error::TournamentNotFound)
    }
}

impl Default for GameContract {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ATTACK_DAMAGE;

    fn player(n: u8) -> PlayerId {
        PlayerId::new([n; 16])
    }

    fn ctx(n: u8, time: u64) -> CallContext {
        CallContext::new(player(n), time)
    }

    /// End-to-end walkthrough of the reference scenario.
    #[test]
    fn test_full_scenario() {
        let mut contract = GameContract::new();
        let caller = ctx(1, 0);

        // Spawn at (0, 0) with health 100.
        let id = contract.spawn_entity(&caller, 0, 0).unwrap();
        assert_eq!(
            contract.get_entity_health(id).unwrap(),
            Some(Health::full(100))
        );

        // Move by (5, -3): y clamps at 0.
        let pos = contract.move_entity(&caller, id, 5, -3).unwrap();
        assert_eq!(pos, Position::new(5, 0));

        // Two attacks: 100 -> 80.
        let _ = contract.attack_entity(&caller, id).unwrap();
        let health = contract.attack_entity(&caller, id).unwrap();
        assert_eq!(health.current, 100 - 2 * ATTACK_DAMAGE);

        // Ten attacks total: exactly 0, entity removed, counted dead once.
        for _ in 0..7 {
            let _ = contract.attack_entity(&caller, id).unwrap();
        }
        let health = contract.attack_entity(&caller, id).unwrap();
        assert_eq!(health.current, 0);
        assert_eq!(contract.entity_count().unwrap(), 0);
        assert_eq!(contract.dead_entity_count().unwrap(), 1);

        // The handle is dead now; attacking again is an error, despawning
        // again is idempotent-false.
        assert_eq!(contract.attack_entity(&caller, id), Err(Error::EntityDead));
        assert_eq!(contract.despawn_entity(&caller, id), Ok(false));
        assert_eq!(contract.dead_entity_count().unwrap(), 1);

        // Tournament: submit 500 at t=10, then replay 500 at t=5.
        let tid = contract
            .create_tournament(&caller, "puzzle-royale".into(), "Weekly Cup".into(), 1, 100, 50)
            .unwrap();
        let caller = ctx(1, 10);
        let rank = contract
            .submit_score(&caller, player(1), tid, 500, 10, None)
            .unwrap();
        assert_eq!(rank, 1);

        let err = contract.submit_score(&caller, player(1), tid, 500, 5, None);
        assert_eq!(err, Err(Error::DuplicateOrReplayedSubmission));

        // The rejected call changed nothing.
        let board = contract.get_leaderboard(tid, 0, 10).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].score, 500);
        assert_eq!(board[0].timestamp, 10);
    }

    #[test]
    fn test_spawn_after_death_recycles_slot() {
        let mut contract = GameContract::new();
        let caller = ctx(1, 0);

        let old = contract.spawn_entity(&caller, 1, 1).unwrap();
        assert!(contract.despawn_entity(&caller, old).unwrap());

        let new = contract.spawn_entity(&caller, 2, 2).unwrap();
        assert_eq!(new.index, old.index);
        assert_ne!(new.generation, old.generation);

        // Stale handle: unknown, reads nothing, moves nothing.
        assert_eq!(contract.get_entity_position(old).unwrap(), None);
        assert_eq!(
            contract.move_entity(&caller, old, 1, 1),
            Err(Error::InvalidEntity)
        );
        assert_eq!(
            contract.get_entity_position(new).unwrap(),
            Some(Position::new(2, 2))
        );
        assert_eq!(contract.dead_entity_count().unwrap(), 0);
    }

    #[test]
    fn test_teleport_and_heal() {
        let mut contract = GameContract::new();
        let caller = ctx(1, 0);
        let id = contract.spawn_entity(&caller, 0, 0).unwrap();

        let pos = contract.teleport_entity(&caller, id, 40, 2).unwrap();
        assert_eq!(pos, Position::new(40, 2));

        let _ = contract.attack_entity(&caller, id).unwrap();
        let healed = contract.heal_entity(&caller, id, 500).unwrap();
        // Clamped to maximum, never above starting health.
        assert_eq!(healed, Health::full(100));
    }

    #[test]
    fn test_submit_requires_caller_identity() {
        let mut contract = GameContract::new();
        let creator = ctx(9, 0);
        let tid = contract
            .create_tournament(&creator, "puzzle-royale".into(), "Cup".into(), 1, 100, 50)
            .unwrap();

        // Caller 2 cannot submit on behalf of player 1.
        let err = contract.submit_score(&ctx(2, 10), player(1), tid, 500, 10, None);
        assert_eq!(err, Err(Error::Unauthorized));
        assert!(contract.get_leaderboard(tid, 0, 10).unwrap().is_empty());
    }

    #[test]
    fn test_submit_to_unknown_or_inactive_tournament() {
        let mut contract = GameContract::new();
        let caller = ctx(1, 0);

        let err = contract.submit_score(&caller, player(1), 99, 500, 10, None);
        assert_eq!(err, Err(Error::TournamentNotFound));

        let tid = contract
            .create_tournament(&caller, "puzzle-royale".into(), "Cup".into(), 50, 100, 10)
            .unwrap();

        // Before the window opens.
        let err = contract.submit_score(&ctx(1, 10), player(1), tid, 500, 10, None);
        assert_eq!(err, Err(Error::TournamentNotActive));

        // After it ends.
        let err = contract.submit_score(&ctx(1, 150), player(1), tid, 500, 150, None);
        assert_eq!(err, Err(Error::TournamentNotActive));
    }

    #[test]
    fn test_close_tournament_is_creator_only() {
        let mut contract = GameContract::new();
        let creator = ctx(9, 0);
        let tid = contract
            .create_tournament(&creator, "puzzle-royale".into(), "Cup".into(), 1, 100, 50)
            .unwrap();

        assert_eq!(
            contract.close_tournament(&ctx(2, 5), tid),
            Err(Error::Unauthorized)
        );
        contract.close_tournament(&creator, tid).unwrap();

        // Closed early: submissions inside the window are rejected.
        let err = contract.submit_score(&ctx(1, 10), player(1), tid, 500, 10, None);
        assert_eq!(err, Err(Error::TournamentNotActive));

        // And results become readable.
        let results = contract.get_tournament_results(&ctx(1, 10), tid).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_cap_eviction_via_entry_points() {
        let mut contract = GameContract::new();
        let creator = ctx(9, 0);
        let tid = contract
            .create_tournament(&creator, "puzzle-royale".into(), "Cup".into(), 1, 100, 3)
            .unwrap();

        for (n, score) in [(1u8, 100u32), (2, 200), (3, 300)] {
            let _ = contract
                .submit_score(&ctx(n, 10), player(n), tid, score, 10, None)
                .unwrap();
        }

        // A new top score over cap evicts the lowest-ranked entry.
        let rank = contract
            .submit_score(&ctx(4, 11), player(4), tid, 400, 11, None)
            .unwrap();
        assert_eq!(rank, 1);

        let board = contract.get_leaderboard(tid, 0, 10).unwrap();
        assert_eq!(board.len(), 3);
        assert!(board.iter().all(|e| e.player_id != player(1)));
    }

    #[test]
    fn test_global_board_and_history() {
        let mut contract = GameContract::new();
        let creator = ctx(9, 0);
        let game: GameId = "puzzle-royale".into();
        let t1 = contract
            .create_tournament(&creator, game.clone(), "Cup A".into(), 1, 100, 50)
            .unwrap();
        let t2 = contract
            .create_tournament(&creator, game.clone(), "Cup B".into(), 1, 100, 50)
            .unwrap();

        let _ = contract
            .submit_score(&ctx(1, 10), player(1), t1, 300, 10, None)
            .unwrap();
        let _ = contract
            .submit_score(&ctx(1, 20), player(1), t2, 500, 20, None)
            .unwrap();
        let _ = contract
            .submit_score(&ctx(2, 30), player(2), t1, 400, 30, None)
            .unwrap();

        // Global board keeps each player's best across tournaments.
        let global = contract.get_global_leaderboard(&game, 0, 10).unwrap();
        assert_eq!(global.len(), 2);
        assert_eq!(global[0].player_id, player(1));
        assert_eq!(global[0].score, 500);
        assert_eq!(global[1].score, 400);

        // History records every accepted submission, oldest first.
        let history = contract.get_player_history(&player(1)).unwrap();
        let scores: Vec<u32> = history.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![300, 500]);

        assert!(contract
            .get_global_leaderboard(&"other-game".to_string(), 0, 10)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_tournament_queries() {
        let mut contract = GameContract::new();
        let creator = ctx(9, 0);
        let game: GameId = "puzzle-royale".into();
        let t1 = contract
            .create_tournament(&creator, game.clone(), "Early".into(), 1, 50, 10)
            .unwrap();
        let t2 = contract
            .create_tournament(&creator, "other-game".into(), "Late".into(), 60, 100, 10)
            .unwrap();

        assert_eq!(contract.list_tournaments().unwrap(), vec![t1, t2]);

        let info = contract.get_tournament_info(&ctx(1, 10), t1).unwrap();
        assert_eq!(info.status, TournamentStatus::Active);
        assert_eq!(info.entry_cap, 10);

        assert!(contract.is_tournament_active(&ctx(1, 10), t1).unwrap());
        assert!(!contract.is_tournament_active(&ctx(1, 10), t2).unwrap());

        let active = contract.get_active_tournaments(&ctx(1, 10), None).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, t1);

        let filtered = contract
            .get_active_tournaments(&ctx(1, 70), Some(&game))
            .unwrap();
        assert!(filtered.is_empty());

        // Results are only readable once the window has closed.
        assert_eq!(
            contract.get_tournament_results(&ctx(1, 10), t1),
            Err(Error::TournamentNotActive)
        );
        assert!(contract.get_tournament_results(&ctx(1, 51), t1).unwrap().is_empty());

        assert_eq!(
            contract.get_tournament_info(&ctx(1, 10), 999),
            Err(Error::TournamentNotFound)
        );
    }

    #[test]
    fn test_create_tournament_validations_surface() {
        let mut contract = GameContract::new();
        let creator = ctx(9, 20);

        assert_eq!(
            contract.create_tournament(&creator, "g".into(), String::new(), 30, 40, 10),
            Err(Error::NameCannotBeEmpty)
        );
        assert_eq!(
            contract.create_tournament(&creator, "g".into(), "Cup".into(), 40, 30, 10),
            Err(Error::InvalidTimeRange)
        );
        assert_eq!(
            contract.create_tournament(&creator, "g".into(), "Cup".into(), 10, 40, 10),
            Err(Error::InvalidTimeRange)
        );
        assert_eq!(
            contract.create_tournament(&creator, "g".into(), "Cup".into(), 30, 40, 0),
            Err(Error::CapacityExceeded)
        );

        // Failed creations mint no ids and leave no trace.
        assert!(contract.list_tournaments().unwrap().is_empty());
        let tid = contract
            .create_tournament(&creator, "g".into(), "Cup".into(), 30, 40, 10)
            .unwrap();
        assert_eq!(tid, 1);
    }

    #[test]
    fn test_events_emitted_in_order() {
        let mut contract = GameContract::new();
        let caller = ctx(1, 0);

        let id = contract.spawn_entity(&caller, 0, 0).unwrap();
        let tid = contract
            .create_tournament(&caller, "g".into(), "Cup".into(), 1, 100, 10)
            .unwrap();
        let rank = contract
            .submit_score(&ctx(1, 10), player(1), tid, 500, 10, None)
            .unwrap();

        let events = contract.take_events();
        assert_eq!(
            events,
            vec![
                GameEvent::EntitySpawned { id },
                GameEvent::TournamentCreated {
                    id: tid,
                    game_id: "g".into()
                },
                GameEvent::ScoreSubmitted {
                    player: player(1),
                    tournament_id: tid,
                    score: 500,
                    rank,
                },
            ]
        );
        assert!(contract.take_events().is_empty());
    }

    #[test]
    fn test_failed_submission_emits_nothing() {
        let mut contract = GameContract::new();
        let caller = ctx(1, 0);
        let tid = contract
            .create_tournament(&caller, "g".into(), "Cup".into(), 1, 100, 10)
            .unwrap();
        let _ = contract.take_events();

        let err = contract.submit_score(&ctx(2, 10), player(1), tid, 500, 10, None);
        assert_eq!(err, Err(Error::Unauthorized));
        assert!(contract.take_events().is_empty());
    }

    #[test]
    fn test_identical_histories_hash_identically() {
        let script = |contract: &mut GameContract| {
            let caller = ctx(1, 0);
            let id = contract.spawn_entity(&caller, 3, 4).unwrap();
            let _ = contract.move_entity(&caller, id, 2, -1).unwrap();
            let tid = contract
                .create_tournament(&caller, "g".into(), "Cup".into(), 1, 100, 10)
                .unwrap();
            let _ = contract
                .submit_score(&ctx(1, 10), player(1), tid, 500, 10, None)
                .unwrap();
        };

        let mut a = GameContract::new();
        let mut b = GameContract::new();
        script(&mut a);
        script(&mut b);
        assert_eq!(a.state_hash().unwrap(), b.state_hash().unwrap());

        // Any divergence shows up in the digest.
        let caller = ctx(1, 20);
        let _ = a.spawn_entity(&caller, 0, 0).unwrap();
        assert_ne!(a.state_hash().unwrap(), b.state_hash().unwrap());
    }
}
