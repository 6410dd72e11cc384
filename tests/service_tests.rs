// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! End-to-end tests for the host-facing service.
//!
//! Run with: cargo test --test service_tests

mod common;

use std::fs::{self, File};
use std::path::PathBuf;
use std::rc::Rc;

use common::{analog_channel, utc, MemoryRecording, MemorySegment, MemorySource};
use sweepcat::catalog::build_catalog;
use sweepcat::core::{timestamp_from_utc_header, AccessError, Ticks};
use sweepcat::read::ReadRequest;
use sweepcat::service::AccessService;
use sweepcat::source::ChannelKey;

const PERIOD_SECS: f64 = 1e-3;

fn day_base() -> Ticks {
    timestamp_from_utc_header(2021, 100, 0.0).unwrap()
}

/// A source with one recording under /d/a.rec holding a single analog
/// channel "Grp A / Rec 1 / Ch" with 50 ms of 1 kHz ramp data.
fn ramp_source() -> MemorySource {
    let samples: Vec<f64> = (0..50).map(|i| i as f64).collect();
    MemorySource::new().with_file(
        "/d/a.rec",
        MemoryRecording::new().with_channel(analog_channel(
            "Grp A",
            "Rec 1",
            "Ch",
            utc(2021, 100, 0.0),
            vec![MemorySegment::new(0.0, PERIOD_SECS, samples)],
        )),
    )
}

fn explicit_descriptor() -> sweepcat::config::CatalogDescriptor {
    sweepcat::config::CatalogDescriptor {
        id: "bench".into(),
        title: "Bench rig".into(),
        data_dir: None,
        pattern: None,
        files: vec![PathBuf::from("/d/a.rec")],
        min_confidence: 1,
    }
}

#[test]
fn test_registrations_list_declared_catalogs() {
    let service = AccessService::new(Rc::new(ramp_source()), vec![explicit_descriptor()]);
    let regs = service.registrations();
    assert_eq!(regs, vec![("bench".to_string(), "Bench rig".to_string())]);
}

#[test]
fn test_unknown_catalog_id_is_configuration_error() {
    let service = AccessService::new(Rc::new(ramp_source()), vec![explicit_descriptor()]);
    let err = service.materialize("nope").unwrap_err();
    assert!(matches!(err, AccessError::Configuration { .. }));
}

#[test]
fn test_materialize_then_read() {
    let service = AccessService::new(Rc::new(ramp_source()), vec![explicit_descriptor()]);

    let catalog = service.materialize("bench").unwrap();
    assert_eq!(catalog.id, "bench");
    assert_eq!(catalog.channels.len(), 1);
    let channel = &catalog.channels[0];
    assert_eq!(channel.identifier, "GrpARec1Ch");
    assert_eq!(channel.key, ChannelKey::new("Grp A", "Rec 1", "Ch"));
    assert_eq!(channel.representations.len(), 1);
    let period = channel.representations[0].period;
    assert_eq!(period, Ticks::from_secs_f64(PERIOD_SECS));

    // Read the catalog channel back over the first 50 ms.
    let begin = day_base();
    let end = begin + Ticks::from_secs_f64(0.05);
    let mut samples = vec![0.0; 50];
    let mut present = vec![false; 50];
    let mut requests = [ReadRequest {
        channel: channel.key.clone(),
        period,
        samples: &mut samples,
        present: &mut present,
    }];
    service.read("bench", begin, end, &mut requests).unwrap();

    assert!(present.iter().all(|&p| p));
    for (i, &s) in samples.iter().enumerate() {
        assert_eq!(s, i as f64);
    }
}

#[test]
fn test_read_honours_descriptor_confidence_floor() {
    let source = ramp_source().with_confidence("/d/a.rec", 40);
    let mut descriptor = explicit_descriptor();
    descriptor.min_confidence = 50;
    let service = AccessService::new(Rc::new(source), vec![descriptor]);

    let begin = day_base();
    let end = begin + Ticks::from_secs_f64(0.05);
    let mut samples = vec![0.0; 50];
    let mut present = vec![false; 50];
    let mut requests = [ReadRequest {
        channel: ChannelKey::new("Grp A", "Rec 1", "Ch"),
        period: Ticks::from_secs_f64(PERIOD_SECS),
        samples: &mut samples,
        present: &mut present,
    }];
    service.read("bench", begin, end, &mut requests).unwrap();
    assert!(present.iter().all(|&p| !p));
}

#[test]
fn test_descriptor_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor_path = dir.path().join("catalogs.toml");
    fs::write(
        &descriptor_path,
        r#"
            [[catalog]]
            id = "bench"
            title = "Bench rig"
            files = ["/d/a.rec"]
        "#,
    )
    .unwrap();

    let service =
        AccessService::from_descriptor_file(Rc::new(ramp_source()), &descriptor_path).unwrap();
    assert_eq!(service.registrations().len(), 1);

    let catalog = service.materialize("bench").unwrap();
    assert_eq!(catalog.channels.len(), 1);
}

#[test]
fn test_duplicate_catalog_ids_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor_path = dir.path().join("catalogs.toml");
    fs::write(
        &descriptor_path,
        r#"
            [[catalog]]
            id = "bench"
            title = "One"
            files = ["/d/a.rec"]

            [[catalog]]
            id = "bench"
            title = "Two"
            files = ["/d/b.rec"]
        "#,
    )
    .unwrap();

    let result = AccessService::from_descriptor_file(Rc::new(ramp_source()), &descriptor_path);
    assert!(matches!(
        result.err(),
        Some(AccessError::Configuration { .. })
    ));
}

#[test]
fn test_directory_scope_matches_pattern_one_level_deep() {
    let dir = tempfile::tempdir().unwrap();
    File::create(dir.path().join("shot_02.rec")).unwrap();
    File::create(dir.path().join("shot_01.rec")).unwrap();
    File::create(dir.path().join("notes.txt")).unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    File::create(dir.path().join("nested").join("shot_03.rec")).unwrap();

    let descriptor = sweepcat::config::CatalogDescriptor {
        id: "line4".into(),
        title: "Line 4".into(),
        data_dir: Some(dir.path().to_path_buf()),
        pattern: Some("*.rec".into()),
        files: Vec::new(),
        min_confidence: 1,
    };

    let files = descriptor.resolve_files().unwrap();
    assert_eq!(
        files,
        vec![
            dir.path().join("shot_01.rec"),
            dir.path().join("shot_02.rec"),
        ]
    );

    // A directory scope catalogs only its first (representative) file.
    let representative = descriptor.representative_files().unwrap();
    assert_eq!(representative, vec![dir.path().join("shot_01.rec")]);
}

#[test]
fn test_catalog_over_directory_scope() {
    // The catalog build opens the representative file through the injected
    // source, keyed by the path the directory scan produced.
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("shot_01.rec");
    File::create(&file_path).unwrap();

    let source = MemorySource::new().with_file(
        &file_path,
        MemoryRecording::new().with_channel(analog_channel(
            "G",
            "R",
            "Ch",
            utc(2021, 100, 0.0),
            vec![MemorySegment::new(0.0, PERIOD_SECS, vec![0.0; 10])],
        )),
    );
    let descriptor = sweepcat::config::CatalogDescriptor {
        id: "line4".into(),
        title: "Line 4".into(),
        data_dir: Some(dir.path().to_path_buf()),
        pattern: Some("*.rec".into()),
        files: Vec::new(),
        min_confidence: 1,
    };

    let files = descriptor.representative_files().unwrap();
    let catalog = build_catalog(&source, "line4", "Line 4", &files).unwrap();
    assert_eq!(catalog.channels.len(), 1);
    assert_eq!(catalog.channels[0].identifier, "GRCh");
}
