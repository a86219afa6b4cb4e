use serde::{Deserialize, Serialize};

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub subject: String,
    /// True when admitted by the bypass strategy.
    pub anonymous: bool,
}

impl Caller {
    pub fn anonymous() -> Self { Self { subject: "anonymous".into(), anonymous: true } }
}

/// Claims accepted in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}
