//! Matching engine - the owned container for all mutable matching state
//!
//! One write lock guards the canonical user store, the waiting pool, and the
//! active/confirmed team sets. Every mutation is bounded and synchronous, so
//! a coarse single-writer section keeps the sweeper and request handlers
//! serialized without finer locking.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::domain::matching::{
    ConfirmedTeamSnapshot, Disposition, ResolveAction, ResolveOutcome, StateSnapshot,
    SubmissionOutcome, TeamSnapshot,
};
use crate::domain::room::{RoomHandles, RoomProvisioner};
use crate::domain::team::{Feedback, Team, TeamId};
use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

use super::pool::WaitingPool;

/// Candidate ordering used by `assemble_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssemblyOrder {
    /// Pool order (arrival order)
    #[default]
    Fifo,
    /// Seeded shuffle of the pool
    Random,
}

/// Runtime configuration for the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Target team size
    pub team_size: usize,
    /// Window before non-responders are treated as decliners
    pub team_ttl: Duration,
    /// Candidate ordering for assembly
    pub assembly_order: AssemblyOrder,
    /// Fixed RNG seed; entropy-seeded when absent
    pub shuffle_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            team_size: 4,
            team_ttl: Duration::hours(24),
            assembly_order: AssemblyOrder::Fifo,
            shuffle_seed: None,
        }
    }
}

/// A confirmed team paired with its provisioned rooms
#[derive(Debug, Clone)]
struct ConfirmedTeam {
    team: Team,
    rooms: RoomHandles,
}

/// All mutable matching state, guarded by one lock
struct EngineState {
    /// Canonical user records; exclusion sets live here and survive
    /// confirmation and re-enqueue
    users: HashMap<UserId, User>,
    pool: WaitingPool,
    /// Forming teams
    active: Vec<Team>,
    confirmed: Vec<ConfirmedTeam>,
    rng: StdRng,
}

impl EngineState {
    fn pool_users(&self) -> Vec<User> {
        self.pool
            .ids()
            .iter()
            .filter_map(|id| self.users.get(id).cloned())
            .collect()
    }

    fn find_active(&self, team_id: &TeamId) -> Option<usize> {
        self.active.iter().position(|t| t.id() == team_id)
    }
}

/// Team formation engine.
///
/// Owns the waiting pool, the forming teams, and the confirmed teams, and
/// drives the full lifecycle: assembly, consensus evaluation, manual
/// resolution, and expiry sweeps.
pub struct MatchingEngine {
    config: EngineConfig,
    provisioner: Arc<dyn RoomProvisioner>,
    state: RwLock<EngineState>,
}

impl MatchingEngine {
    pub fn new(config: EngineConfig, provisioner: Arc<dyn RoomProvisioner>) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            provisioner,
            state: RwLock::new(EngineState {
                users: HashMap::new(),
                pool: WaitingPool::new(),
                active: Vec::new(),
                confirmed: Vec::new(),
                rng,
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Add a user to the waiting pool, or merge profile fields when the id
    /// is already waiting. Fails when the id belongs to a forming team.
    pub fn enqueue(
        &self,
        id: UserId,
        profile: Map<String, Value>,
    ) -> Result<Vec<User>, DomainError> {
        let mut state = self.write()?;

        if let Some(team) = state.active.iter().find(|t| t.is_member(&id)) {
            return Err(DomainError::already_assigned(
                id.as_str(),
                team.id().as_str(),
            ));
        }

        match state.users.entry(id.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().merge_profile(profile),
            Entry::Vacant(entry) => {
                entry.insert(User::new(id.clone(), profile));
            }
        }

        if state.pool.enqueue(id.clone()) {
            debug!(user_id = %id, waiting = state.pool.len(), "User enqueued");
        }

        Ok(state.pool_users())
    }

    /// Look up the canonical record for a user
    pub fn user(&self, id: &UserId) -> Result<User, DomainError> {
        let state = self.read()?;
        state
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(id.as_str()))
    }

    /// Batch the waiting pool into new Forming teams.
    ///
    /// The whole batch happens under one write lock; no observer ever sees a
    /// partially-formed set. A pool smaller than the team size yields an
    /// empty result, not an error.
    pub fn assemble_all(&self) -> Result<Vec<TeamSnapshot>, DomainError> {
        let mut state = self.write()?;
        let now = Utc::now();

        let mut candidates: Vec<UserId> = state.pool.ids().to_vec();
        if self.config.assembly_order == AssemblyOrder::Random {
            let state = &mut *state;
            candidates.shuffle(&mut state.rng);
        }

        let mut created = Vec::new();
        let mut offset = 0;

        while candidates.len() - offset >= self.config.team_size {
            let members = candidates[offset..offset + self.config.team_size].to_vec();
            offset += self.config.team_size;

            for id in &members {
                state.pool.remove(id);
            }

            let team = Team::new(members, now, self.config.team_ttl);
            info!(
                team_id = %team.id(),
                size = team.members().len(),
                "Assembled team from waiting pool"
            );
            created.push(TeamSnapshot::from_team(&team, &state.users));
            state.active.push(team);
        }

        Ok(created)
    }

    /// Record a member's feedback and evaluate the team's disposition
    pub fn submit_feedback(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
        value: Feedback,
    ) -> Result<SubmissionOutcome, DomainError> {
        let mut state = self.write()?;

        let idx = state
            .find_active(team_id)
            .ok_or_else(|| DomainError::team_not_found(team_id.as_str()))?;

        if !state.active[idx].set_feedback(user_id, value) {
            return Err(DomainError::member_not_found(
                team_id.as_str(),
                user_id.as_str(),
            ));
        }

        debug!(team_id = %team_id, user_id = %user_id, feedback = %value, "Feedback recorded");
        self.evaluate(&mut state, idx)
    }

    /// Manually resolve a team that has not reached consensus
    pub fn resolve(
        &self,
        team_id: &TeamId,
        action: ResolveAction,
    ) -> Result<ResolveOutcome, DomainError> {
        let mut state = self.write()?;

        let idx = state
            .find_active(team_id)
            .ok_or_else(|| DomainError::team_not_found(team_id.as_str()))?;

        match action {
            ResolveAction::Requeue => {
                let disagreeing = state.active[idx].disagreeing_members();
                remove_and_requeue(&mut state, idx, &disagreeing);
                info!(
                    team_id = %team_id,
                    requeued = disagreeing.len(),
                    "Disagreeing members returned to pool"
                );
                Ok(ResolveOutcome::Requeued {
                    pool: state.pool_users(),
                })
            }
            ResolveAction::Rematch => {
                let agreeing = state.active[idx].agreeing_members();
                if agreeing.is_empty() {
                    return Err(DomainError::validation(
                        "Cannot rematch a team with no agreeing members",
                    ));
                }

                let others: Vec<UserId> = state.active[idx]
                    .members()
                    .iter()
                    .filter(|id| !agreeing.contains(id))
                    .cloned()
                    .collect();
                remove_and_requeue(&mut state, idx, &others);

                // the old team now holds exactly the agreeing members
                let old = state.active.remove(idx);
                let team = Team::new(old.members().to_vec(), Utc::now(), self.config.team_ttl);
                info!(
                    old_team_id = %old.id(),
                    team_id = %team.id(),
                    size = team.members().len(),
                    "Rematched agreeing members into a fresh team"
                );

                let snapshot = TeamSnapshot::from_team(&team, &state.users);
                state.active.push(team);
                Ok(ResolveOutcome::Rematched { team: snapshot })
            }
        }
    }

    /// Expire stale Forming teams: members still Pending are treated as
    /// decliners, the team is refilled, and its deadline extended. Teams
    /// left empty are dropped. Returns the ids of reshaped teams.
    pub fn sweep(&self, now: DateTime<Utc>) -> Result<Vec<TeamId>, DomainError> {
        let mut state = self.write()?;
        let mut reshaped = Vec::new();
        let mut idx = 0;

        while idx < state.active.len() {
            if !state.active[idx].is_expired(now) {
                idx += 1;
                continue;
            }

            let pending = state.active[idx].pending_members();
            if pending.is_empty() {
                idx += 1;
                continue;
            }

            info!(
                team_id = %state.active[idx].id(),
                timed_out = pending.len(),
                "Expiry sweep reshaping team"
            );

            remove_and_requeue(&mut state, idx, &pending);
            self.refill(&mut state, idx, &pending);
            state.active[idx].extend_deadline(now, self.config.team_ttl);
            reshaped.push(state.active[idx].id().clone());

            if state.active[idx].members().is_empty() {
                let team = state.active.remove(idx);
                debug!(team_id = %team.id(), "Dropping team left empty by sweep");
            } else {
                idx += 1;
            }
        }

        Ok(reshaped)
    }

    /// Snapshot of the waiting pool
    pub fn pool_snapshot(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.read()?.pool_users())
    }

    /// Snapshots of the active Forming teams
    pub fn active_teams(&self) -> Result<Vec<TeamSnapshot>, DomainError> {
        let state = self.read()?;
        Ok(state
            .active
            .iter()
            .map(|t| TeamSnapshot::from_team(t, &state.users))
            .collect())
    }

    /// Snapshots of the confirmed teams with their room handles
    pub fn confirmed_teams(&self) -> Result<Vec<ConfirmedTeamSnapshot>, DomainError> {
        let state = self.read()?;
        Ok(state
            .confirmed
            .iter()
            .map(|c| ConfirmedTeamSnapshot {
                team: TeamSnapshot::from_team(&c.team, &state.users),
                rooms: c.rooms.clone(),
            })
            .collect())
    }

    /// Full read-only view of the engine state
    pub fn snapshot(&self) -> Result<StateSnapshot, DomainError> {
        let state = self.read()?;
        Ok(StateSnapshot {
            pool: state.pool_users(),
            active_teams: state
                .active
                .iter()
                .map(|t| TeamSnapshot::from_team(t, &state.users))
                .collect(),
            confirmed_teams: state
                .confirmed
                .iter()
                .map(|c| ConfirmedTeamSnapshot {
                    team: TeamSnapshot::from_team(&c.team, &state.users),
                    rooms: c.rooms.clone(),
                })
                .collect(),
        })
    }

    /// Decide the team's disposition after a successful submission
    fn evaluate(
        &self,
        state: &mut EngineState,
        idx: usize,
    ) -> Result<SubmissionOutcome, DomainError> {
        if state.active[idx].has_pending() {
            return Ok(SubmissionOutcome {
                team: TeamSnapshot::from_team(&state.active[idx], &state.users),
                disposition: Disposition::Waiting,
                rooms: None,
            });
        }

        let disagreeing = state.active[idx].disagreeing_members();
        if !disagreeing.is_empty() {
            remove_and_requeue(state, idx, &disagreeing);
            self.refill(state, idx, &disagreeing);

            let team = if state.active[idx].members().is_empty() {
                let team = state.active.remove(idx);
                debug!(team_id = %team.id(), "Dropping team left empty by reformation");
                TeamSnapshot::from_team(&team, &state.users)
            } else {
                info!(
                    team_id = %state.active[idx].id(),
                    removed = disagreeing.len(),
                    size = state.active[idx].members().len(),
                    "Team reformed after disagreement"
                );
                TeamSnapshot::from_team(&state.active[idx], &state.users)
            };

            return Ok(SubmissionOutcome {
                team,
                disposition: Disposition::Reformed,
                rooms: None,
            });
        }

        // unanimous agreement
        let mut team = state.active.remove(idx);
        team.confirm();
        let rooms = self.provisioner.provision(team.id());
        info!(team_id = %team.id(), "Team confirmed");

        let snapshot = TeamSnapshot::from_team(&team, &state.users);
        state.confirmed.push(ConfirmedTeam {
            team,
            rooms: rooms.clone(),
        });

        Ok(SubmissionOutcome {
            team: snapshot,
            disposition: Disposition::Confirmed,
            rooms: Some(rooms),
        })
    }

    /// Top up an undersized team from the pool, skipping every user excluded
    /// by any current member. The team stays Forming if still short.
    ///
    /// Members removed by the reflow that triggered this refill are skipped
    /// as well; without that a team emptied by the reflow would pull the
    /// same users straight back out of the pool.
    fn refill(&self, state: &mut EngineState, idx: usize, just_removed: &[UserId]) {
        let needed = self
            .config
            .team_size
            .saturating_sub(state.active[idx].members().len());
        if needed == 0 {
            return;
        }

        let mut exclude: BTreeSet<UserId> = state.active[idx]
            .members()
            .iter()
            .filter_map(|id| state.users.get(id))
            .flat_map(|u| u.excluded().iter().cloned())
            .collect();
        exclude.extend(just_removed.iter().cloned());

        let added = state.pool.dequeue_eligible(&exclude, needed);
        for id in added {
            debug!(team_id = %state.active[idx].id(), user_id = %id, "Refilled team member");
            state.active[idx].add_member(id);
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, EngineState>, DomainError> {
        self.state
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, EngineState>, DomainError> {
        self.state
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))
    }
}

/// Remove members from a team and return them to the pool, recording mutual
/// exclusions between each removed member and every member present at this
/// moment (other removed members included).
fn remove_and_requeue(state: &mut EngineState, idx: usize, removed: &[UserId]) {
    let present: Vec<UserId> = state.active[idx].members().to_vec();

    for r in removed {
        for m in &present {
            exclude_pair(&mut state.users, r, m);
        }
    }

    for r in removed {
        state.active[idx].remove_member(r);
        state.pool.enqueue(r.clone());
    }
}

fn exclude_pair(users: &mut HashMap<UserId, User>, a: &UserId, b: &UserId) {
    if a == b {
        return;
    }
    if let Some(user) = users.get_mut(a) {
        user.exclude(b);
    }
    if let Some(user) = users.get_mut(b) {
        user.exclude(a);
    }
}
