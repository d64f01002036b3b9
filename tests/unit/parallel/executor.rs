use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

#[test]
fn for_each_index_visits_every_index_once() {
    let exec = Executor::global();
    let hits: Vec<AtomicUsize> = (0..257).map(|_| AtomicUsize::new(0)).collect();
    exec.for_each_index(hits.len(), |i| {
        hits[i].fetch_add(1, Ordering::Relaxed);
    })
    .unwrap();
    assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
}

#[test]
fn for_each_row_hands_out_disjoint_rows() {
    let exec = Executor::new(ExecutorOpts::default().with_threads(Some(3))).unwrap();
    let mut data = vec![0usize; 5 * 7];
    exec.for_each_row(&mut data, 5, |y, row| {
        assert_eq!(row.len(), 5);
        row.fill(y);
    })
    .unwrap();
    for (y, row) in data.chunks(5).enumerate() {
        assert!(row.iter().all(|&v| v == y));
    }
}

#[test]
fn for_each_row_rejects_zero_width() {
    let mut data = vec![0u8; 4];
    let err = Executor::global()
        .for_each_row(&mut data, 0, |_, _| {})
        .unwrap_err();
    assert!(matches!(err, DrawingError::Validation(_)));
}

#[test]
fn for_each_pixel_sees_flat_indices() {
    let mut data = vec![0usize; 100];
    Executor::global()
        .for_each_pixel(&mut data, |i, px| *px = i * 2)
        .unwrap();
    assert!(data.iter().enumerate().all(|(i, &v)| v == i * 2));
}

#[test]
fn row_pairs_skip_middle_row_of_odd_height() {
    let mut data: Vec<u32> = (0..5).flat_map(|y| [y, y]).collect();
    Executor::global()
        .for_each_row_pair(&mut data, 2, |top, a, b, scratch| {
            assert_eq!(a[0] as usize, top);
            assert_eq!(b[0] as usize, 4 - top);
            scratch.clear();
            scratch.extend_from_slice(a);
            a.copy_from_slice(b);
            b.copy_from_slice(scratch);
        })
        .unwrap();
    assert_eq!(data, vec![4, 4, 3, 3, 2, 2, 1, 1, 0, 0]);
}

#[test]
fn partition_panic_is_reported_after_join() {
    let exec = Executor::new(ExecutorOpts::default().with_threads(Some(2))).unwrap();
    let done = AtomicUsize::new(0);
    let err = exec
        .for_each_index(64, |i| {
            if i == 17 {
                panic!("boom at {i}");
            }
            done.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap_err();
    match err {
        DrawingError::Partition(msg) => assert!(msg.contains("boom at 17")),
        other => panic!("unexpected error: {other:?}"),
    }

    // The executor stays usable after a failed call.
    exec.for_each_index(4, |_| {}).unwrap();
}

#[test]
fn zero_threads_are_rejected() {
    let err = Executor::new(ExecutorOpts { threads: Some(0) }).unwrap_err();
    assert!(matches!(err, DrawingError::Validation(_)));
}

#[test]
fn dedicated_pool_reports_its_size() {
    let exec = Executor::new(ExecutorOpts { threads: Some(2) }).unwrap();
    assert_eq!(exec.threads(), 2);
    assert!(Executor::global().threads() >= 1);
}

#[test]
fn env_value_parsing() {
    assert_eq!(ExecutorOpts::from_env_value(None), ExecutorOpts::default());
    assert_eq!(
        ExecutorOpts::from_env_value(Some(" 4 ")),
        ExecutorOpts { threads: Some(4) }
    );
    assert_eq!(ExecutorOpts::from_env_value(Some("0")), ExecutorOpts::default());
    assert_eq!(
        ExecutorOpts::from_env_value(Some("many")),
        ExecutorOpts::default()
    );
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: ExecutorOpts = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, ExecutorOpts::default());
    let opts: ExecutorOpts = serde_json::from_str(r#"{"threads": 3}"#).unwrap();
    assert_eq!(opts.threads, Some(3));
}
