use thiserror::Error;

use crate::ModuleId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Module {0} is not part of the graph")]
    UnknownModule(ModuleId),

    #[error("Graph run failed: {0}")]
    RunFailed(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
