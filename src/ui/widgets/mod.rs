pub mod badge;

pub use badge::{badge_spans, BadgeRow};
