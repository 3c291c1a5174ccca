//! Domain layer - Core creation rules with no I/O
//!
//! This layer contains:
//! - Entities: the character draft and the reference catalog
//! - Value Objects: actions, coin stats, loadout, dice outcomes, ids
//! - Aggregates: the creation wizard
//! - Domain Services: derived stats, step validation, dice resolution

pub mod aggregates;
pub mod entities;
pub mod services;
pub mod value_objects;
