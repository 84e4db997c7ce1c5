//! Audio domain: synthesized combat cues.
//!
//! Cues are short mono WAV clips generated at startup (a sine sweep under an
//! exponential decay envelope), so the app ships no audio assets. Each
//! drained battle event maps to at most one cue.

use bevy::audio::AudioSource;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::core::ArenaSet;
use crate::sim::BattleEvent;
use crate::sim::combatant::AttackKind;
use crate::sim::events::{Fighter, HitKind, Outcome, SimEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKind {
    SwingLight,
    SwingHeavy,
    SwingBoss,
    HitLight,
    HitHeavy,
    BossHit,
    ChargeLaunch,
    Slam,
    Jump,
    Victory,
    Defeat,
}

#[derive(Resource, Default)]
pub struct CueBank {
    handles: HashMap<CueKind, Handle<AudioSource>>,
}

const SAMPLE_RATE: u32 = 22_050;

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CueBank>()
            .add_systems(Startup, build_cue_bank)
            .add_systems(Update, play_cues.in_set(ArenaSet::Present));
    }
}

/// Sine sweep from `freq_start` to `freq_end` with a squared decay envelope.
fn synth(freq_start: f32, freq_end: f32, secs: f32, gain: f32) -> AudioSource {
    let count = (secs * SAMPLE_RATE as f32) as usize;
    let mut samples = Vec::with_capacity(count);
    let mut phase = 0.0_f32;
    for i in 0..count {
        let t = i as f32 / count as f32;
        let freq = freq_start + (freq_end - freq_start) * t;
        phase += std::f32::consts::TAU * freq / SAMPLE_RATE as f32;
        let envelope = (1.0 - t) * (1.0 - t);
        samples.push((phase.sin() * envelope * gain).clamp(-1.0, 1.0));
    }
    AudioSource {
        bytes: wav_bytes(&samples).into(),
    }
}

/// Minimal 16-bit PCM mono WAV container around the sample buffer.
fn wav_bytes(samples: &[f32]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + samples.len() * 2);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16_u32.to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1_u16.to_le_bytes()); // mono
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    out.extend_from_slice(&2_u16.to_le_bytes());
    out.extend_from_slice(&16_u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&((sample * i16::MAX as f32) as i16).to_le_bytes());
    }
    out
}

pub(crate) fn build_cue_bank(
    mut bank: ResMut<CueBank>,
    mut sources: ResMut<Assets<AudioSource>>,
) {
    let cues = [
        (CueKind::SwingLight, synth(520.0, 300.0, 0.08, 0.25)),
        (CueKind::SwingHeavy, synth(300.0, 150.0, 0.16, 0.3)),
        (CueKind::SwingBoss, synth(180.0, 110.0, 0.2, 0.35)),
        (CueKind::HitLight, synth(220.0, 90.0, 0.12, 0.45)),
        (CueKind::HitHeavy, synth(180.0, 55.0, 0.2, 0.55)),
        (CueKind::BossHit, synth(140.0, 70.0, 0.18, 0.5)),
        (CueKind::ChargeLaunch, synth(90.0, 260.0, 0.3, 0.4)),
        (CueKind::Slam, synth(75.0, 32.0, 0.42, 0.7)),
        (CueKind::Jump, synth(320.0, 520.0, 0.12, 0.2)),
        (CueKind::Victory, synth(440.0, 880.0, 0.7, 0.4)),
        (CueKind::Defeat, synth(220.0, 70.0, 0.9, 0.4)),
    ];
    for (kind, source) in cues {
        bank.handles.insert(kind, sources.add(source));
    }
}

fn cue_for(event: &SimEvent) -> Option<CueKind> {
    match event {
        SimEvent::AttackStarted { actor, kind } => Some(match (actor, kind) {
            (Fighter::Hero, AttackKind::Heavy) => CueKind::SwingHeavy,
            (Fighter::Hero, _) => CueKind::SwingLight,
            (Fighter::Boss, _) => CueKind::SwingBoss,
        }),
        SimEvent::HitLanded { target, kind, .. } => Some(match (target, kind) {
            (Fighter::Boss, HitKind::Heavy) => CueKind::HitHeavy,
            (Fighter::Boss, _) => CueKind::HitLight,
            (Fighter::Hero, _) => CueKind::BossHit,
        }),
        SimEvent::ChargeLaunched { .. } => Some(CueKind::ChargeLaunch),
        SimEvent::SlamShockwave { .. } => Some(CueKind::Slam),
        SimEvent::Jumped => Some(CueKind::Jump),
        SimEvent::OutcomeChanged(Outcome::Win) => Some(CueKind::Victory),
        SimEvent::OutcomeChanged(Outcome::Lose) => Some(CueKind::Defeat),
        SimEvent::OutcomeChanged(Outcome::None) => None,
    }
}

pub(crate) fn play_cues(
    mut commands: Commands,
    mut events: MessageReader<BattleEvent>,
    bank: Res<CueBank>,
) {
    for BattleEvent(event) in events.read() {
        let Some(kind) = cue_for(event) else {
            continue;
        };
        if let Some(handle) = bank.handles.get(&kind) {
            commands.spawn((AudioPlayer::new(handle.clone()), PlaybackSettings::DESPAWN));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_matches_payload() {
        let samples = vec![0.0_f32; 100];
        let bytes = wav_bytes(&samples);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(bytes.len(), 44 + 200);
        let data_len = u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]);
        assert_eq!(data_len, 200);
    }

    #[test]
    fn synth_output_is_bounded() {
        let source = synth(440.0, 110.0, 0.1, 0.9);
        // Header plus at least a thousand samples of payload.
        assert!(source.bytes.len() > 44 + 2000);
    }

    #[test]
    fn every_combat_event_has_a_cue_or_is_silent() {
        assert_eq!(cue_for(&SimEvent::Jumped), Some(CueKind::Jump));
        assert_eq!(
            cue_for(&SimEvent::OutcomeChanged(Outcome::None)),
            None
        );
    }
}
