//! Standsheet - Character creation core for a Forged in the Dark stand/hamon/spin game
//!
//! - `domain`: the draft, the catalog, derived stats, dice rules and the wizard
//! - `application`: ports to the backend and the services that drive a session
//! - `infrastructure`: REST client, configuration, RNG and timers

pub mod application;
pub mod domain;
pub mod infrastructure;
