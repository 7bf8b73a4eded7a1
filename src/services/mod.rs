// passkeep services
// Services provide the stateless pieces (strength policy, generator, cipher, export codec),
// the settings file, and the session that ties the stores to a key.

pub mod cipher;
pub mod password_generator;
pub mod persistence_codec;
pub mod settings_engine;
pub mod strength_policy;
pub mod vault_session;
