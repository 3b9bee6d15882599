//! Domain layer - static classification data for corrective actions

pub mod taxonomy;

pub use taxonomy::{category_badges, Badge, BadgeVariant, CategorySelection};
