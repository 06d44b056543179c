use game::settings::AudioSettings;
use game::sfx::{MERGE_SFX_VOLUME, MUSIC_VOLUME};

#[test]
fn volumes_are_normalized() {
    for v in [MUSIC_VOLUME, MERGE_SFX_VOLUME] {
        assert!((0.0..=1.0).contains(&v), "volume {v} out of range");
    }
}

#[test]
fn merge_chime_sits_above_the_music_bed() {
    assert!(MERGE_SFX_VOLUME > MUSIC_VOLUME);
}

#[test]
fn muted_settings_silence_both_channels() {
    let audio = AudioSettings {
        mute_all: true,
        ..AudioSettings::default()
    };
    assert_eq!(MUSIC_VOLUME * audio.effective_music_gain(), 0.0);
    assert_eq!(MERGE_SFX_VOLUME * audio.effective_sfx_gain(), 0.0);
}

#[test]
fn default_settings_leave_the_mix_audible() {
    let audio = AudioSettings::default();
    assert!(MUSIC_VOLUME * audio.effective_music_gain() > 0.0);
    assert!(MERGE_SFX_VOLUME * audio.effective_sfx_gain() > 0.0);
}
