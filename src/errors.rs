use thiserror::Error;

/// Error returned by caller-supplied option callbacks.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Error type covering menu construction, editing, navigation, and dispatch.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Menu creation failed: {0}")]
    Creation(String),
    #[error("Menu edit failed: {0}")]
    Edit(String),
    #[error("Navigation failed: {0}")]
    Navigation(String),
    #[error("Option error: {0}")]
    Option(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input ended while awaiting a selection")]
    EndOfInput,
    #[error("action for option {id} failed: {source}")]
    Action {
        id: u32,
        #[source]
        source: ActionError,
    },
}

impl MenuError {
    pub(crate) fn creation(message: impl Into<String>) -> Self {
        MenuError::Creation(message.into())
    }

    pub(crate) fn edit(message: impl Into<String>) -> Self {
        MenuError::Edit(message.into())
    }

    pub(crate) fn navigation(message: impl Into<String>) -> Self {
        MenuError::Navigation(message.into())
    }

    pub(crate) fn option(message: impl Into<String>) -> Self {
        MenuError::Option(message.into())
    }

    pub(crate) fn runtime(message: impl Into<String>) -> Self {
        MenuError::Runtime(message.into())
    }
}
