use serde::Serialize;

/// Liveness probe body.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Static version probe body.
#[derive(Serialize, Debug)]
pub struct Version {
    pub version: &'static str,
}
