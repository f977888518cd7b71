/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` (field `redis_host` reads `REDIS_HOST`)
/// and call `Config::from_env()` at startup. A `.env` file in the working directory,
/// if present, is applied first; variables already set in the process win.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Result<Self, envy::Error> {
        let _ = dotenvy::dotenv();
        envy::from_env()
    }

    /// Load from an explicit set of `(NAME, value)` pairs instead of the process env.
    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
