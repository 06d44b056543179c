//! Mixing levels for the festive soundtrack.
//!
//! The background loop sits well under the merge chime so the chime reads
//! as feedback rather than music.

pub const MUSIC_VOLUME: f32 = 0.30;
pub const MERGE_SFX_VOLUME: f32 = 0.45;
