use std::{collections::HashMap, sync::Arc};

use engine::TransactionKind;
use tokio::sync::Mutex;

/// Where a user is in the "add transaction" wizard.
///
/// Pending fields live inside the step that collected them, so leaving the
/// wizard drops them all at once.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum WizardStep {
    #[default]
    Idle,
    AwaitingCategory {
        kind: TransactionKind,
    },
    AwaitingAmount {
        kind: TransactionKind,
        category: String,
    },
    AwaitingComment {
        kind: TransactionKind,
        category: String,
        amount: f64,
    },
}

impl WizardStep {
    pub(crate) fn is_active(&self) -> bool {
        !matches!(self, WizardStep::Idle)
    }
}

/// Per-user wizard state, keyed by the user's Telegram id.
///
/// Volatile: nothing survives a restart.
#[derive(Clone, Default)]
pub(crate) struct SessionStore {
    inner: Arc<Mutex<HashMap<i64, WizardStep>>>,
}

impl SessionStore {
    pub(crate) async fn get(&self, user_id: i64) -> WizardStep {
        let guard = self.inner.lock().await;
        guard.get(&user_id).cloned().unwrap_or_default()
    }

    pub(crate) async fn set(&self, user_id: i64, step: WizardStep) {
        let mut guard = self.inner.lock().await;
        if step.is_active() {
            guard.insert(user_id, step);
        } else {
            guard.remove(&user_id);
        }
    }

    /// Resets the user to `Idle`, returning the discarded step.
    pub(crate) async fn clear(&self, user_id: i64) -> WizardStep {
        let mut guard = self.inner.lock().await;
        guard.remove(&user_id).unwrap_or_default()
    }

    /// Puts a taken step back, unless the user started something else in the
    /// meantime.
    pub(crate) async fn restore(&self, user_id: i64, step: WizardStep) {
        if !step.is_active() {
            return;
        }
        let mut guard = self.inner.lock().await;
        guard.entry(user_id).or_insert(step);
    }
}
