/// Loads a service configuration struct from environment variables.
///
/// Implementors derive `serde::Deserialize`; field names map to their
/// upper-cased env var names (`database_url` reads `DATABASE_URL`).
///
/// # Panics
///
/// `from_env` panics when a required variable is missing or cannot be
/// deserialized; configuration errors should stop startup, not limp on.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Self {
        envy::from_env().expect("failed to load config from environment")
    }
}
