//! Movement domain: facing and input intent consumed by the combat systems.

mod components;

pub use components::{Facing, MeleeIntent, on_ground};
