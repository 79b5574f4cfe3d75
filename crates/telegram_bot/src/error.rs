use engine::EngineError;
use teloxide::RequestError;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("telegram request failed: {0}")]
    Request(#[from] RequestError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub(crate) type HandlerResult = Result<(), BotError>;
