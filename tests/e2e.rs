mod common;

use common::init_logging;
use common::synthetic_image::{disk, stripe, thick_segment};
use shape_tuner::image::SourceImage;
use shape_tuner::{DetectionResult, Mode, ParameterVector, Pipeline};
use std::f32::consts::PI;

fn detect(mode: Mode, gray: image::GrayImage, raw: Vec<i32>) -> DetectionResult {
    let pipeline = Pipeline::new(mode, SourceImage::from_gray(gray));
    let sanitized = shape_tuner::sanitize(&ParameterVector::new(raw), pipeline.spec());
    pipeline.detect(&sanitized)
}

fn angle_gap(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(PI);
    d.min(PI - d)
}

#[test]
fn vertical_stripe_gives_a_vertical_line() {
    init_logging();
    let gray = stripe(100, 100, 45, 54, 5, 95);
    let DetectionResult::Lines(lines) = detect(Mode::Lines, gray, vec![1, 1, 50, 0, 0]) else {
        panic!("line mode must report lines");
    };

    assert!(!lines.is_empty(), "expected at least one line");
    let top = lines[0];
    assert!(
        angle_gap(top.theta, 0.0) <= 1f32.to_radians(),
        "strongest line theta={:.4}",
        top.theta
    );
    assert!(
        (top.rho.abs() - 54.0).abs() <= 1.0,
        "strongest line rho={:.2}",
        top.rho
    );
    assert!(lines.windows(2).all(|w| w[0].votes >= w[1].votes));
}

#[test]
fn slanted_segment_gives_its_normal_angle() {
    init_logging();
    let gray = thick_segment(100, 50.0, 50.0, 30.0, 45);
    let DetectionResult::Lines(lines) = detect(Mode::Lines, gray, vec![1, 1, 50, 0, 0]) else {
        panic!("line mode must report lines");
    };

    assert!(!lines.is_empty());
    let top = lines[0];
    assert!(
        angle_gap(top.theta, 120f32.to_radians()) <= 2f32.to_radians(),
        "strongest line at {:.1} deg",
        top.theta.to_degrees()
    );
}

#[test]
fn single_disk_gives_single_circle() {
    init_logging();
    let gray = disk(100, 50.0, 50.0, 20.0);
    let DetectionResult::Circles(circles) =
        detect(Mode::Circles, gray, vec![10, 20, 100, 20, 15, 25])
    else {
        panic!("circle mode must report circles");
    };

    assert_eq!(circles.len(), 1, "circles: {circles:?}");
    let c = circles[0];
    assert!((c.x - 50.0).abs() <= 2.0 && (c.y - 50.0).abs() <= 2.0, "{c:?}");
    assert!((c.radius - 20.0).abs() <= 2.0, "{c:?}");
}

#[test]
fn inverted_radius_bounds_are_repaired() {
    init_logging();
    let gray = disk(100, 50.0, 50.0, 10.0);
    let DetectionResult::Circles(circles) =
        detect(Mode::Circles, gray, vec![10, 20, 100, 5, 10, 9])
    else {
        panic!("circle mode must report circles");
    };

    assert!(!circles.is_empty());
    for c in &circles {
        assert!(
            (10.0..=11.0).contains(&c.radius),
            "radius {} outside the repaired range",
            c.radius
        );
    }
}

#[test]
fn edge_view_is_repeatable_and_leaves_the_source_alone() {
    init_logging();
    let gray = disk(64, 32.0, 30.0, 14.0);
    let pipeline = Pipeline::new(Mode::Edges, SourceImage::from_gray(gray.clone()));
    let raw = ParameterVector::new(vec![50, 150, 6]);

    let first = pipeline.process(&raw);
    let second = pipeline.process(&raw);
    assert_eq!(first.frame, second.frame);
    assert!(first.detections > 0);
    assert_eq!(first.sanitized.int(2), 7);
    assert_eq!(pipeline.source().gray(), &gray);
}

#[test]
fn zero_sliders_never_fail() {
    init_logging();
    let gray = disk(48, 24.0, 24.0, 9.0);
    for mode in Mode::ALL {
        let pipeline = Pipeline::new(mode, SourceImage::from_gray(gray.clone()));
        let zeros = ParameterVector::new(vec![0; mode.spec().len()]);
        let out = pipeline.process(&zeros);
        assert_eq!((out.frame.width(), out.frame.height()), (48, 48), "{mode}");
    }
}
