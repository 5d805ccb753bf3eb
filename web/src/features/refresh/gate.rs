use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use storage::error::Result;
use storage::models::RefreshPolicyState;
use storage::repository::refresh::RefreshStateRepository;
use storage::services::refresh::{self, RefreshDecision};

/// Serializes manual refreshes and owns the per-device policy states.
///
/// States live in memory keyed by device and are written through to the
/// store on every recorded attempt, so a restart picks up where a device
/// left off. A one-second sweeper prunes entries whose countdown has fully
/// lapsed; it is aborted when the gate is dropped.
pub struct RefreshGate {
    in_flight: AtomicBool,
    states: tokio::sync::Mutex<HashMap<String, RefreshPolicyState>>,
    sweeper: OnceLock<tokio::task::AbortHandle>,
}

impl RefreshGate {
    pub fn new() -> Arc<Self> {
        let gate = Arc::new(Self {
            in_flight: AtomicBool::new(false),
            states: tokio::sync::Mutex::new(HashMap::new()),
            sweeper: OnceLock::new(),
        });

        let handle = tokio::spawn(sweep(Arc::downgrade(&gate)));
        gate.sweeper.set(handle.abort_handle()).ok();

        gate
    }

    /// Claim the single in-flight slot. Returns a guard that releases the
    /// slot on drop, or None while another refresh is still running.
    pub fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| InFlightGuard(self))
    }

    pub async fn decision(
        &self,
        pool: &PgPool,
        device_key: &str,
        now: DateTime<Utc>,
    ) -> Result<RefreshDecision> {
        let state = self.load_state(pool, device_key, now).await?;
        Ok(refresh::evaluate(&state, now))
    }

    /// Fold an attempt outcome into the device state and persist it
    pub async fn commit_attempt(
        &self,
        pool: &PgPool,
        device_key: &str,
        success: bool,
        now: DateTime<Utc>,
    ) -> Result<RefreshPolicyState> {
        let state = self.load_state(pool, device_key, now).await?;
        let state = refresh::record_attempt(state, success, now);

        RefreshStateRepository::new(pool).save(&state).await?;
        self.states
            .lock()
            .await
            .insert(device_key.to_string(), state.clone());

        Ok(state)
    }

    async fn load_state(
        &self,
        pool: &PgPool,
        device_key: &str,
        now: DateTime<Utc>,
    ) -> Result<RefreshPolicyState> {
        if let Some(state) = self.states.lock().await.get(device_key) {
            return Ok(state.clone());
        }

        let state = RefreshStateRepository::new(pool)
            .load(device_key)
            .await?
            .unwrap_or_else(|| RefreshPolicyState::fresh(device_key, now));

        self.states
            .lock()
            .await
            .insert(device_key.to_string(), state.clone());

        Ok(state)
    }
}

impl Drop for RefreshGate {
    fn drop(&mut self) {
        if let Some(handle) = self.sweeper.get() {
            handle.abort();
        }
    }
}

/// Held while a refresh runs; dropping it reopens the gate
pub struct InFlightGuard<'a>(&'a RefreshGate);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.in_flight.store(false, Ordering::Release);
    }
}

/// Ticks every second, normalizing device states and evicting the ones
/// whose window, lockout and cooldown have all lapsed
async fn sweep(gate: Weak<RefreshGate>) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));

    loop {
        interval.tick().await;
        let Some(gate) = gate.upgrade() else {
            break;
        };

        let now = Utc::now();
        let mut states = gate.states.lock().await;
        states.retain(|_, state| {
            let normalized = refresh::normalize(state.clone(), now);
            let cooling_down = normalized
                .last_refresh_at
                .map(|at| now - at < Duration::seconds(refresh::REFRESH_COOLDOWN_SECONDS))
                .unwrap_or(false);
            let keep = normalized.count > 0 || cooling_down;
            if keep {
                *state = normalized;
            }
            keep
        });
    }
}
