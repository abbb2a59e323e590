use std::collections::HashMap;
use std::sync::Arc;

use skein_asset_core::{
    bake_clip, AccessorDescriptor, AccessorRef, AnimationChannel, AnimationClip, BakingConfig,
    BufferId, ChannelPath, ClipBuilder, ComponentKind, Config, ElementShape, Interpolation,
    KeyframeTrack, NamingContext, PlaybackController, PlaybackState, SliceBuffers, TargetId,
    TrackValues, Transform, TransformSampler,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn vec3_track(times: &[f32], values: &[[f32; 3]]) -> KeyframeTrack {
    KeyframeTrack::new(
        times.to_vec(),
        TrackValues::Vec3(values.to_vec()),
        Interpolation::Linear,
    )
    .unwrap()
}

fn sampler_with_span(times: &[f32]) -> TransformSampler {
    let values = vec![[0.0f32; 3]; times.len()];
    TransformSampler::new(
        Some(vec3_track(times, &values)),
        None,
        None,
        Transform::default(),
        1.0 / 30.0,
    )
}

fn two_span_clip() -> AnimationClip {
    AnimationClip::new(
        "walk".to_string(),
        vec![
            (TargetId(0), sampler_with_span(&[0.0, 2.0])),
            (TargetId(1), sampler_with_span(&[1.0, 3.0])),
        ],
    )
}

#[test]
fn clip_envelope_spans_all_samplers() {
    let clip = two_span_clip();
    assert_eq!(clip.start_time(), 0.0);
    assert_eq!(clip.end_time(), 3.0);
    assert_eq!(clip.duration(), 3.0);
}

#[test]
fn empty_clip_has_zero_duration() {
    let clip = AnimationClip::new("empty".to_string(), vec![]);
    assert_eq!(clip.duration(), 0.0);
    assert!(clip.sample(1.0).is_empty());
}

#[test]
fn playback_state_machine() {
    let clip = Arc::new(two_span_clip());
    let mut ctl = PlaybackController::new(Arc::clone(&clip));

    assert_eq!(ctl.state(), PlaybackState::Stopped);
    assert!(!ctl.is_playing());
    assert_eq!(ctl.duration(), 3.0);

    // Advancing while stopped reports nothing and moves nothing.
    assert!(ctl.advance(1.0).is_empty());
    assert_eq!(ctl.current_time(), 0.0);

    ctl.play();
    assert!(ctl.is_playing());
    let updates = ctl.advance(0.5);
    assert_eq!(updates.len(), 2);
    assert_eq!(ctl.current_time(), 0.5);

    ctl.pause();
    assert_eq!(ctl.state(), PlaybackState::Paused);
    assert!(ctl.advance(10.0).is_empty());
    assert_eq!(ctl.current_time(), 0.5);

    ctl.resume();
    assert!(ctl.is_playing());
    ctl.advance(0.25);
    approx(ctl.current_time(), 0.75, 1e-6);

    ctl.stop();
    assert_eq!(ctl.state(), PlaybackState::Stopped);
    assert_eq!(ctl.current_time(), 0.0);
}

#[test]
fn playback_completes_at_clip_end_with_a_final_frame() {
    let clip = Arc::new(two_span_clip());
    let mut ctl = PlaybackController::new(clip);
    ctl.play();

    // Irregular deltas are fine; the final overshooting tick clamps.
    assert_eq!(ctl.advance(1.7).len(), 2);
    assert!(ctl.is_playing());
    let last = ctl.advance(5.0);
    assert_eq!(last.len(), 2);
    assert_eq!(ctl.current_time(), 3.0);
    assert!(ctl.is_complete());

    // Complete is terminal for advance, but the data stays evaluable.
    assert!(ctl.advance(1.0).is_empty());
    assert_eq!(ctl.clip().sample(1.5).len(), 2);

    // Seeking out of completion resumes a paused position.
    ctl.seek(1.0);
    assert_eq!(ctl.state(), PlaybackState::Paused);
    assert_eq!(ctl.current_time(), 1.0);
}

#[test]
fn controllers_share_one_clip_independently() {
    let clip = Arc::new(two_span_clip());
    let mut a = PlaybackController::new(Arc::clone(&clip));
    let mut b = PlaybackController::new(Arc::clone(&clip));

    a.play();
    b.play();
    a.advance(0.25);
    b.advance(2.0);
    approx(a.current_time(), 0.25, 1e-6);
    approx(b.current_time(), 2.0, 1e-6);

    a.stop();
    assert!(b.is_playing());
}

// --- end-to-end: channel records + raw bytes -> clip -> playback ---

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn scalar_f32(count: usize) -> AccessorDescriptor {
    AccessorDescriptor {
        component: ComponentKind::F32,
        shape: ElementShape::Scalar,
        count,
        byte_offset: 0,
        byte_stride: 0,
        normalized: false,
    }
}

fn vec3_f32(count: usize) -> AccessorDescriptor {
    AccessorDescriptor {
        component: ComponentKind::F32,
        shape: ElementShape::Vec3,
        count,
        byte_offset: 0,
        byte_stride: 0,
        normalized: false,
    }
}

#[test]
fn clip_builder_decodes_channels_and_skips_weights() {
    // Buffer 0: times [0, 1, 2]; buffer 1: translations; buffer 2: bogus/short.
    let times = f32_bytes(&[0.0, 1.0, 2.0]);
    let translations = f32_bytes(&[
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        2.0, 0.0, 0.0,
    ]);
    let short = f32_bytes(&[0.0]);
    let buffers = [times.as_slice(), translations.as_slice(), short.as_slice()];
    let source = SliceBuffers(&buffers);

    let channels = [
        AnimationChannel {
            target: TargetId(7),
            path: ChannelPath::Translation,
            interpolation: Interpolation::Linear,
            input: AccessorRef {
                buffer: BufferId(0),
                descriptor: scalar_f32(3),
            },
            output: AccessorRef {
                buffer: BufferId(1),
                descriptor: vec3_f32(3),
            },
        },
        // Scale output bytes are too short: the axis degrades to rest.
        AnimationChannel {
            target: TargetId(7),
            path: ChannelPath::Scale,
            interpolation: Interpolation::Linear,
            input: AccessorRef {
                buffer: BufferId(0),
                descriptor: scalar_f32(3),
            },
            output: AccessorRef {
                buffer: BufferId(2),
                descriptor: vec3_f32(3),
            },
        },
        // Morph-target weights are skipped outright.
        AnimationChannel {
            target: TargetId(7),
            path: ChannelPath::Weights,
            interpolation: Interpolation::Linear,
            input: AccessorRef {
                buffer: BufferId(0),
                descriptor: scalar_f32(3),
            },
            output: AccessorRef {
                buffer: BufferId(0),
                descriptor: scalar_f32(3),
            },
        },
    ];

    let rest = Transform {
        translation: [0.0, 0.0, 0.0],
        rotation: [0.0, 0.0, 0.0, 1.0],
        scale: [3.0, 3.0, 3.0],
    };
    let rest_poses: HashMap<TargetId, Transform> = [(TargetId(7), rest)].into_iter().collect();

    let mut naming = NamingContext::new();
    let mut builder = ClipBuilder::new(Config::default(), &mut naming);
    let clip = builder.build(None, &channels, &source, &rest_poses);

    assert_eq!(clip.name(), "animation0");
    assert_eq!(clip.samplers().len(), 1);
    assert_eq!(clip.duration(), 2.0);

    let mut ctl = PlaybackController::new(Arc::new(clip));
    ctl.play();
    let updates = ctl.advance(0.5);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].target, TargetId(7));
    approx(updates[0].transform.translation[0], 0.5, 1e-6);
    // The degraded scale channel fell back to the rest pose.
    assert_eq!(updates[0].transform.scale, [3.0, 3.0, 3.0]);
    assert_eq!(updates[0].transform.rotation, [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn baking_emits_inclusive_uniform_frames() {
    let values = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
    let sampler = TransformSampler::new(
        Some(vec3_track(&[0.0, 2.0], &values)),
        None,
        None,
        Transform::default(),
        1.0 / 30.0,
    );
    let clip = AnimationClip::new("bounce".to_string(), vec![(TargetId(0), sampler)]);

    let baked = bake_clip(
        &clip,
        &BakingConfig {
            sample_interval: Some(0.5),
            ..BakingConfig::default()
        },
    );
    assert_eq!(baked.sample_interval, 0.5);
    assert_eq!(baked.start_time, 0.0);
    assert_eq!(baked.end_time, 2.0);
    // 0.0, 0.5, 1.0, 1.5, 2.0
    assert_eq!(baked.frame_count(), 5);
    let frames = &baked.targets[0].frames;
    approx(frames[0].translation[0], 0.0, 1e-6);
    approx(frames[2].translation[0], 1.0, 1e-6);
    approx(frames[4].translation[0], 2.0, 1e-6);
}

#[test]
fn baking_defaults_to_recommended_cadence() {
    let clip = two_span_clip();
    let baked = bake_clip(&clip, &BakingConfig::default());
    assert!(baked.sample_interval > 0.0);
    assert!(baked.sample_interval <= 1.0 / 30.0 + 1e-6);
    assert_eq!(baked.end_time, 3.0);
    assert_eq!(baked.targets.len(), 2);
}
