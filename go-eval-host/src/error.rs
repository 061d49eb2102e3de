use go_eval::EvalError;

#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    Eval(EvalError),
    /// An engine round trip is already outstanding.
    Busy,
    NotConnected,
    Transport(String),
    /// The engine answered with a failure.
    Rejected(String),
    Config(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::Eval(e) => write!(f, "{e}"),
            HostError::Busy => write!(f, "Engine is thinking"),
            HostError::NotConnected => write!(f, "No engine connected"),
            HostError::Transport(msg) => write!(f, "Transport error: {msg}"),
            HostError::Rejected(msg) => write!(f, "Engine rejected request: {msg}"),
            HostError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Eval(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EvalError> for HostError {
    fn from(e: EvalError) -> Self {
        HostError::Eval(e)
    }
}
