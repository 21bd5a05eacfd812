//! Role router: where a signed-in user lands, and when they get there.
//!
//! [`landing_path`] is a pure, total mapping from a role name to a path.
//! [`RoleRouter`] carries the one-shot redirect intent:
//!
//! ```text
//! Idle --arm(role)--> Pending(role) --(spawned task, after delay)--> Navigated --> Idle
//!                          |
//!                          +--cancel() / drop--> Idle (no navigation)
//! ```
//!
//! The navigation always runs on a separate tokio task, never inside the
//! call that armed it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use campusdesk_models::Role;

pub const HOME_PATH: &str = "/";
pub const ADMIN_DASHBOARD_PATH: &str = "/dashboard/admin";
pub const FACULTY_DASHBOARD_PATH: &str = "/dashboard/faculty";
pub const STUDENT_DASHBOARD_PATH: &str = "/dashboard/student";

pub fn landing_path_for(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_DASHBOARD_PATH,
        Role::Faculty => FACULTY_DASHBOARD_PATH,
        Role::Student => STUDENT_DASHBOARD_PATH,
    }
}

/// Landing path for a role name; unknown names land on [`HOME_PATH`].
pub fn landing_path(role: &str) -> &'static str {
    role.parse::<Role>()
        .map(landing_path_for)
        .unwrap_or(HOME_PATH)
}

/// Performs a navigation to an app path.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, path: &str);
}

impl Navigator for mpsc::UnboundedSender<String> {
    fn navigate(&self, path: &str) {
        if self.send(path.to_string()).is_err() {
            debug!(path, "Navigation receiver gone");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectState {
    Idle,
    Pending(Role),
    Navigated(&'static str),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Current redirect plus a generation that changes on every arm and cancel,
/// so a navigation task only acts on the intent that spawned it.
#[derive(Debug)]
struct Slot {
    state: RedirectState,
    generation: u64,
}

pub struct RoleRouter<N> {
    navigator: Arc<N>,
    slot: Arc<Mutex<Slot>>,
    task: Mutex<Option<JoinHandle<()>>>,
    delay: Duration,
}

impl<N: Navigator> RoleRouter<N> {
    pub fn new(navigator: N, delay: Duration) -> Self {
        Self {
            navigator: Arc::new(navigator),
            slot: Arc::new(Mutex::new(Slot {
                state: RedirectState::Idle,
                generation: 0,
            })),
            task: Mutex::new(None),
            delay,
        }
    }

    /// Records a redirect intent and schedules its navigation.
    ///
    /// Returns `false` without scheduling anything if an intent is already
    /// pending; [`cancel`](Self::cancel) it first to replace it. Must be
    /// called from within a tokio runtime.
    pub fn arm(&self, role: Role) -> bool {
        let generation = {
            let mut slot = lock(&self.slot);
            if let RedirectState::Pending(current) = slot.state {
                warn!(%role, %current, "Redirect already pending, ignoring");
                return false;
            }
            slot.generation = slot.generation.wrapping_add(1);
            slot.state = RedirectState::Pending(role);
            slot.generation
        };

        let slot = Arc::clone(&self.slot);
        let navigator = Arc::clone(&self.navigator);
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            if delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(delay).await;
            }

            let target = {
                let mut slot = lock(&slot);
                if slot.generation != generation {
                    return;
                }
                let RedirectState::Pending(role) = slot.state else {
                    return;
                };
                let target = landing_path_for(role);
                slot.state = RedirectState::Navigated(target);
                target
            };

            debug!(target, "Navigating after login");
            navigator.navigate(target);

            let mut slot = lock(&slot);
            if slot.generation == generation {
                slot.state = RedirectState::Idle;
            }
        });

        if let Some(previous) = lock(&self.task).replace(handle) {
            previous.abort();
        }
        true
    }
}

impl<N> RoleRouter<N> {
    pub fn state(&self) -> RedirectState {
        lock(&self.slot).state
    }

    /// Drops a pending redirect. A navigation that already fired is unaffected.
    pub fn cancel(&self) {
        if let Some(handle) = lock(&self.task).take() {
            handle.abort();
        }

        let mut slot = lock(&self.slot);
        if let RedirectState::Pending(role) = slot.state {
            debug!(%role, "Pending redirect cancelled");
            slot.generation = slot.generation.wrapping_add(1);
            slot.state = RedirectState::Idle;
        }
    }
}

impl<N> Drop for RoleRouter<N> {
    fn drop(&mut self) {
        self.cancel();
    }
}
