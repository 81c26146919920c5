mod common;

use common::synthetic_image::strip_chart_u8;
use ecg_screener::classify::{ClassScores, ClassifierInput};
use ecg_screener::error::ClassifierError;
use ecg_screener::image::Frame;
use ecg_screener::{Decision, Pipeline, PipelineOptions, ScreenError};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

fn frame_from_gray(width: usize, height: usize, data: Vec<u8>) -> Frame {
    let buffer = image::GrayImage::from_raw(width as u32, height as u32, data)
        .expect("buffer matches dimensions");
    Frame::from_dynamic(image::DynamicImage::ImageLuma8(buffer))
}

fn plausible_frame() -> Frame {
    frame_from_gray(300, 100, strip_chart_u8(300, 100, 5))
}

fn portrait_frame() -> Frame {
    frame_from_gray(100, 300, vec![255u8; 100 * 300])
}

fn counting_stub(
    scores: Vec<f32>,
    calls: &AtomicUsize,
) -> impl Fn(&ClassifierInput) -> Result<ClassScores, ClassifierError> + '_ {
    move |_input| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(ClassScores::new(scores.clone()))
    }
}

#[test]
fn confident_scores_classify_with_the_fixed_label() {
    let calls = AtomicUsize::new(0);
    let pipeline = Pipeline::new(
        PipelineOptions::default(),
        counting_stub(vec![0.9, 0.03, 0.03, 0.04], &calls),
    );

    let decision = pipeline.decide(&plausible_frame()).expect("no error");
    assert_eq!(
        decision,
        Decision::Classified {
            label: "History of MI".to_string(),
            confidence: 0.9
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(decision.summary(), "History of MI");
}

#[test]
fn structural_rejection_never_invokes_the_classifier() {
    let calls = AtomicUsize::new(0);
    let pipeline = Pipeline::new(
        PipelineOptions::default(),
        counting_stub(vec![0.9, 0.03, 0.03, 0.04], &calls),
    );

    let decision = pipeline.decide(&portrait_frame()).expect("no error");
    assert_eq!(decision, Decision::StructuralReject);
    assert_eq!(
        calls.load(Ordering::SeqCst),
        0,
        "classifier must not run on a structural rejection"
    );
    assert_eq!(
        decision.summary(),
        "image is not a recognizable structural trace"
    );
}

#[test]
fn low_confidence_rejects() {
    let calls = AtomicUsize::new(0);
    let pipeline = Pipeline::new(
        PipelineOptions::default(),
        counting_stub(vec![0.5, 0.45, 0.03, 0.02], &calls),
    );

    let decision = pipeline.decide(&plausible_frame()).expect("no error");
    assert_eq!(decision, Decision::ConfidenceReject);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        decision.summary(),
        "recognizable structure but classification confidence is too low"
    );
}

#[test]
fn narrow_margin_rejects_despite_confidence() {
    let calls = AtomicUsize::new(0);
    let pipeline = Pipeline::new(
        PipelineOptions::default(),
        counting_stub(vec![0.62, 0.55, 0.02, 0.01], &calls),
    );

    let decision = pipeline.decide(&plausible_frame()).expect("no error");
    assert_eq!(decision, Decision::ConfidenceReject);
}

#[test]
fn decisions_are_deterministic() {
    let calls = AtomicUsize::new(0);
    let pipeline = Pipeline::new(
        PipelineOptions::default(),
        counting_stub(vec![0.1, 0.2, 0.65, 0.05], &calls),
    );

    let frame = plausible_frame();
    let first = pipeline.decide(&frame).expect("no error");
    let second = pipeline.decide(&frame).expect("no error");
    assert_eq!(first, second);
    assert_eq!(
        calls.load(Ordering::SeqCst),
        2,
        "decisions are recomputed, never cached"
    );
}

#[test]
fn classifier_failure_propagates_as_an_error() {
    let failing = |_input: &ClassifierInput| -> Result<ClassScores, ClassifierError> {
        Err("model backend offline".into())
    };
    let pipeline = Pipeline::new(PipelineOptions::default(), failing);

    let err = pipeline.decide(&plausible_frame()).unwrap_err();
    assert!(
        matches!(err, ScreenError::Classifier(_)),
        "unexpected error: {err:?}"
    );
}

#[test]
fn score_vector_must_match_the_label_table() {
    let short = |_input: &ClassifierInput| -> Result<ClassScores, ClassifierError> {
        Ok(ClassScores::new(vec![0.9, 0.1]))
    };
    let pipeline = Pipeline::new(PipelineOptions::default(), short);

    let err = pipeline.decide(&plausible_frame()).unwrap_err();
    match err {
        ScreenError::ScoreShape { scores, labels } => {
            assert_eq!(scores, 2);
            assert_eq!(labels, 4);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn detailed_report_records_gate_measurements() {
    let calls = AtomicUsize::new(0);
    let pipeline = Pipeline::new(
        PipelineOptions::default(),
        counting_stub(vec![0.9, 0.03, 0.03, 0.04], &calls),
    );

    let detail = pipeline
        .decide_detailed(&plausible_frame())
        .expect("no error");
    assert!(detail.report.screen.accepted());
    let mean = detail.report.mean_intensity.expect("telemetry recorded");
    assert!((0.0..=1.0).contains(&mean), "normalized mean: {mean}");
    assert_eq!(detail.report.top_confidence, Some(0.9));
    let margin = detail.report.margin.expect("margin recorded");
    assert!((margin - 0.86).abs() < 1e-6, "margin: {margin}");
}

#[test]
fn structural_rejection_skips_telemetry_and_scores() {
    let calls = AtomicUsize::new(0);
    let pipeline = Pipeline::new(
        PipelineOptions::default(),
        counting_stub(vec![0.9, 0.03, 0.03, 0.04], &calls),
    );

    let detail = pipeline
        .decide_detailed(&portrait_frame())
        .expect("no error");
    assert_eq!(detail.decision, Decision::StructuralReject);
    assert!(detail.report.mean_intensity.is_none());
    assert!(detail.report.scores.is_none());
}

#[test]
fn missing_file_resolves_to_structural_rejection() {
    let calls = AtomicUsize::new(0);
    let pipeline = Pipeline::new(
        PipelineOptions::default(),
        counting_stub(vec![0.9, 0.03, 0.03, 0.04], &calls),
    );

    let decision = pipeline
        .decide_path(std::path::Path::new("does-not-exist.png"))
        .expect("unreadable input is not an error");
    assert_eq!(decision, Decision::StructuralReject);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn undecodable_file_resolves_to_structural_rejection() {
    let calls = AtomicUsize::new(0);
    let pipeline = Pipeline::new(
        PipelineOptions::default(),
        counting_stub(vec![0.9, 0.03, 0.03, 0.04], &calls),
    );

    let path = std::env::temp_dir().join("ecg_screener_not_an_image.png");
    fs::write(&path, b"definitely not a png").expect("temp file written");
    let decision = pipeline
        .decide_path(&path)
        .expect("undecodable input is not an error");
    assert_eq!(decision, Decision::StructuralReject);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    let _ = fs::remove_file(&path);
}
