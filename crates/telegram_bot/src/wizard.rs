//! The three-step "add transaction" dialogue.
//!
//! `Idle → AwaitingCategory → AwaitingAmount → AwaitingComment → Idle`.
//! "Back" from any step returns to `Idle`.
//! [`WizardStep::on_text`] is the pure transition; [`handle_text`] applies it
//! to a user's session and writes to the store on the last step.

use engine::{Engine, ResultEngine, TransactionKind, normalize_comment};

use crate::{
    parsing::{ParseError, parse_amount},
    state::{SessionStore, WizardStep},
    ui,
};

/// A fully collected transaction, ready to be stored.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PendingTransaction {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Transition {
    /// Input accepted, move to the next step.
    Next(WizardStep),
    /// Input rejected, stay on the current step.
    Retry(Rejection),
    /// Last step done; store this and go back to `Idle`.
    Commit(PendingTransaction),
    /// "Back": drop everything collected so far.
    Cancelled,
    /// No wizard is running.
    Inactive,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Rejection {
    EmptyCategory,
    Amount(ParseError),
}

impl WizardStep {
    pub(crate) fn start(kind: TransactionKind) -> Self {
        WizardStep::AwaitingCategory { kind }
    }

    pub(crate) fn on_text(&self, text: &str) -> Transition {
        match self {
            WizardStep::Idle => Transition::Inactive,
            _ if text.trim() == ui::BUTTON_BACK => Transition::Cancelled,
            WizardStep::AwaitingCategory { kind } => {
                let category = text.trim();
                if category.is_empty() {
                    return Transition::Retry(Rejection::EmptyCategory);
                }
                Transition::Next(WizardStep::AwaitingAmount {
                    kind: *kind,
                    category: category.to_string(),
                })
            }
            WizardStep::AwaitingAmount { kind, category } => match parse_amount(text) {
                Ok(amount) => Transition::Next(WizardStep::AwaitingComment {
                    kind: *kind,
                    category: category.clone(),
                    amount,
                }),
                Err(err) => Transition::Retry(Rejection::Amount(err)),
            },
            WizardStep::AwaitingComment {
                kind,
                category,
                amount,
            } => Transition::Commit(PendingTransaction {
                kind: *kind,
                category: category.clone(),
                amount: *amount,
                comment: normalize_comment(Some(text)),
            }),
        }
    }
}

/// What the user should be told after a wizard reply.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Reply {
    AskAmount,
    AskComment,
    Rejected(Rejection),
    Saved { id: i64, saved: PendingTransaction },
    Cancelled,
}

/// Starts a wizard, discarding any one already in progress.
pub(crate) async fn start(sessions: &SessionStore, user_id: i64, kind: TransactionKind) {
    sessions.set(user_id, WizardStep::start(kind)).await;
}

/// Feeds a text reply into the user's wizard.
///
/// Returns `Ok(None)` when no wizard is active. The step is taken out of the
/// session store while the reply is processed, so a second reply racing this
/// one finds no wizard and cannot commit the same transaction twice. On a
/// storage failure the `AwaitingComment` step is put back and the error is
/// returned.
pub(crate) async fn handle_text(
    engine: &Engine,
    sessions: &SessionStore,
    user_id: i64,
    text: &str,
) -> ResultEngine<Option<Reply>> {
    let step = sessions.clear(user_id).await;
    let reply = match step.on_text(text) {
        Transition::Inactive => return Ok(None),
        Transition::Cancelled => Reply::Cancelled,
        Transition::Retry(rejection) => {
            sessions.restore(user_id, step).await;
            Reply::Rejected(rejection)
        }
        Transition::Next(next) => {
            let reply = match next {
                WizardStep::AwaitingComment { .. } => Reply::AskComment,
                _ => Reply::AskAmount,
            };
            sessions.restore(user_id, next).await;
            reply
        }
        Transition::Commit(pending) => {
            let stored = engine
                .add_transaction(
                    user_id,
                    pending.kind,
                    &pending.category,
                    pending.amount,
                    pending.comment.as_deref(),
                )
                .await;
            match stored {
                Ok(id) => Reply::Saved { id, saved: pending },
                Err(err) => {
                    sessions.restore(user_id, step).await;
                    return Err(err);
                }
            }
        }
    };
    Ok(Some(reply))
}
