use assert_fs::prelude::*;
use assert_fs::TempDir;
use chrono::{Datelike, Local};
use photo_sorter::core::gateway::InMemoryGateway;
use photo_sorter::core::metadata::MetadataRecord;
use photo_sorter::core::organize::{FileOutcome, OperationMode, SortConfig, Sorter};
use photo_sorter::core::timestamp::SkipReason;
use photo_sorter::core::FingerprintStrategy;
use predicates::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

struct Workspace {
    src: TempDir,
    dest: TempDir,
    gateway: InMemoryGateway,
}

impl Workspace {
    fn new() -> Self {
        Self {
            src: TempDir::new().unwrap(),
            dest: TempDir::new().unwrap(),
            gateway: InMemoryGateway::new(),
        }
    }

    /// Source file with a capture date
    fn photo(&self, name: &str, content: &str, date: &str) -> PathBuf {
        let child = self.src.child(name);
        child.write_str(content).unwrap();
        self.gateway.insert(
            child.path(),
            MetadataRecord::from_pairs([("EXIF:DateTimeOriginal", date)]),
        );
        child.path().to_path_buf()
    }

    /// File already sitting in the destination tree
    fn existing(&self, rel: &str, content: &str) -> PathBuf {
        let child = self.dest.child(rel);
        child.write_str(content).unwrap();
        child.path().to_path_buf()
    }

    fn run(&self, config: SortConfig) -> Vec<FileOutcome> {
        Sorter::new(&self.gateway, self.dest.path(), config)
            .run(self.src.path())
            .unwrap()
            .outcomes
    }
}

fn config(operation: OperationMode, dry_run: bool) -> SortConfig {
    SortConfig {
        operation,
        dry_run,
        ..SortConfig::default()
    }
}

/// Every file and directory under `root`, with file contents
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| {
            let content = entry
                .file_type()
                .is_file()
                .then(|| fs::read(entry.path()).unwrap());
            (entry.path().to_path_buf(), content)
        })
        .collect()
}

#[test]
fn copy_builds_dated_tree_and_second_run_is_a_no_op() {
    let ws = Workspace::new();
    let a = ws.photo("IMG_0001.JPG", "alpha", "2019:07:04 18:30:00");
    let b = ws.photo("clip.mov", "bravo", "2020:12:31 23:59:59");
    ws.src.child("notes.txt").write_str("not media").unwrap();

    let first = ws.run(SortConfig::default());
    assert_eq!(first.len(), 3);

    ws.dest
        .child("2019/07/20190704_183000.jpg")
        .assert("alpha");
    ws.dest
        .child("2020/12/20201231_235959.mov")
        .assert("bravo");
    ws.src.child("IMG_0001.JPG").assert(predicate::path::exists());

    let tree = snapshot(ws.dest.path());
    let second = ws.run(SortConfig::default());

    assert!(second
        .iter()
        .all(|o| !matches!(o, FileOutcome::Transferred { .. })));
    assert!(second.contains(&FileOutcome::Duplicate {
        source: a,
        existing: ws.dest.path().join("2019/07/20190704_183000.jpg"),
        source_removed: false,
    }));
    assert!(second.contains(&FileOutcome::Duplicate {
        source: b,
        existing: ws.dest.path().join("2020/12/20201231_235959.mov"),
        source_removed: false,
    }));
    assert_eq!(snapshot(ws.dest.path()), tree);
}

#[test]
fn different_content_under_the_same_name_gets_the_next_counter() {
    let ws = Workspace::new();
    ws.existing("2020/01/20200101_120000.jpg", "first");
    ws.existing("2020/01/20200101_120000_000.jpg", "zero");
    let source = ws.photo("new.jpg", "second", "2020:01:01 12:00:00");

    let outcomes = ws.run(SortConfig::default());

    assert_eq!(
        outcomes,
        vec![FileOutcome::Transferred {
            source,
            destination: ws.dest.path().join("2020/01/20200101_120000_001.jpg"),
        }]
    );
    ws.dest.child("2020/01/20200101_120000.jpg").assert("first");
    ws.dest
        .child("2020/01/20200101_120000_001.jpg")
        .assert("second");
}

#[test]
fn dry_run_touches_nothing_and_predicts_the_real_run() {
    let ws = Workspace::new();
    ws.existing("2018/03/20180301_090000.jpg", "already sorted");
    ws.photo("a.jpg", "already sorted", "2018:03:01 09:00:00");
    ws.photo("b.jpg", "burst 1", "2018:03:02 10:00:00");
    ws.photo("c.jpg", "burst 2", "2018:03:02 10:00:00");
    ws.photo("d.jpg", "burst 1", "2018:03:02 10:00:00");
    ws.photo("e.jpg", "too old", "1985:01:01 00:00:00");

    let src_before = snapshot(ws.src.path());
    let dest_before = snapshot(ws.dest.path());

    let planned = ws.run(config(OperationMode::Move, true));

    assert_eq!(snapshot(ws.src.path()), src_before);
    assert_eq!(snapshot(ws.dest.path()), dest_before);
    ws.dest.child("2018/03/20180302_100000.jpg").assert(predicate::path::missing());

    let actual = ws.run(config(OperationMode::Move, false));

    assert_eq!(actual.len(), planned.len());
    for (dry, real) in planned.iter().zip(&actual) {
        match (dry, real) {
            (
                FileOutcome::Duplicate { source: s1, existing: e1, source_removed: false },
                FileOutcome::Duplicate { source: s2, existing: e2, source_removed: true },
            ) => {
                assert_eq!(s1, s2);
                assert_eq!(e1, e2);
            }
            (dry, real) => assert_eq!(dry, real),
        }
    }

    ws.dest.child("2018/03/20180302_100000.jpg").assert("burst 1");
    ws.dest.child("2018/03/20180302_100000_001.jpg").assert("burst 2");
    ws.dest
        .child("2018/03/20180302_100000_002.jpg")
        .assert(predicate::path::missing());
    ws.src.child("e.jpg").assert(predicate::path::exists());
}

#[test]
fn move_mode_deletes_duplicate_sources_and_copy_mode_keeps_them() {
    let ws = Workspace::new();
    ws.existing("2016/05/20160505_050505.jpg", "same");
    let source = ws.photo("dup.jpg", "same", "2016:05:05 05:05:05");

    let copied = ws.run(config(OperationMode::Copy, false));
    assert!(matches!(
        copied[0],
        FileOutcome::Duplicate { source_removed: false, .. }
    ));
    ws.src.child("dup.jpg").assert(predicate::path::exists());

    let moved = ws.run(config(OperationMode::Move, false));
    assert_eq!(
        moved,
        vec![FileOutcome::Duplicate {
            source,
            existing: ws.dest.path().join("2016/05/20160505_050505.jpg"),
            source_removed: true,
        }]
    );
    ws.src.child("dup.jpg").assert(predicate::path::missing());
    ws.dest.child("2016/05/20160505_050505.jpg").assert("same");
}

#[test]
fn move_mode_relocates_distinct_files() {
    let ws = Workspace::new();
    ws.photo("holiday.mp4", "video", "2011:08:15 14:00:00");

    ws.run(config(OperationMode::Move, false));

    ws.src.child("holiday.mp4").assert(predicate::path::missing());
    ws.dest.child("2011/08/20110815_140000.mp4").assert("video");
}

#[test]
fn capture_years_outside_1990_to_now_are_skipped() {
    let ws = Workspace::new();
    let now = Local::now().year();
    let old = ws.photo("a.jpg", "a", "1989:12:31 23:59:59");
    ws.photo("b.jpg", "b", "1990:01:01 00:00:00");
    ws.photo("c.jpg", "c", &format!("{now}:01:01 00:00:00"));
    let future = ws.photo("d.jpg", "d", &format!("{}:01:01 00:00:00", now + 1));

    let outcomes = ws.run(SortConfig::default());

    assert_eq!(
        outcomes[0],
        FileOutcome::Skipped {
            path: old,
            reason: SkipReason::WrongDate("19891231_235959".to_string()),
        }
    );
    assert!(matches!(outcomes[1], FileOutcome::Transferred { .. }));
    assert!(matches!(outcomes[2], FileOutcome::Transferred { .. }));
    assert_eq!(
        outcomes[3],
        FileOutcome::Skipped {
            path: future,
            reason: SkipReason::WrongDate(format!("{}0101_000000", now + 1)),
        }
    );
    ws.dest.child("1990/01/19900101_000000.jpg").assert("b");
}

#[test]
fn retagged_copy_is_a_duplicate_unless_hashing_raw_bytes() {
    let ws = Workspace::new();
    let existing = ws.existing("2014/02/20140214_200000.jpg", "EXIF-Apixels");
    ws.gateway.insert_payload(&existing, b"EXIF-A".to_vec());
    let source = ws.photo("retagged.jpg", "EXIF-Bpixels", "2014:02:14 20:00:00");
    ws.gateway.insert_payload(&source, b"EXIF-B".to_vec());

    let stripped = ws.run(SortConfig::default());
    assert!(matches!(stripped[0], FileOutcome::Duplicate { .. }));

    let raw = ws.run(SortConfig {
        fingerprint: FingerprintStrategy::Raw,
        ..SortConfig::default()
    });
    assert_eq!(
        raw[0],
        FileOutcome::Transferred {
            source,
            destination: ws.dest.path().join("2014/02/20140214_200000_001.jpg"),
        }
    );
}

#[test]
fn modify_date_fallback_is_opt_in() {
    let ws = Workspace::new();
    let child = ws.src.child("scan.jpg");
    child.write_str("scan").unwrap();
    ws.gateway.insert(
        child.path(),
        MetadataRecord::from_pairs([("EXIF:ModifyDate", "2003:03:03 03:03:03")]),
    );

    let without = ws.run(SortConfig::default());
    assert_eq!(
        without,
        vec![FileOutcome::Skipped {
            path: child.path().to_path_buf(),
            reason: SkipReason::DateMissing,
        }]
    );

    let mut with_fallback = SortConfig::default();
    with_fallback.date_tags.push("EXIF:ModifyDate".to_string());
    ws.run(with_fallback);
    ws.dest.child("2003/03/20030303_030303.jpg").assert("scan");
}

#[test]
fn moving_into_a_tree_nested_in_the_source_keeps_sorted_files_on_rerun() {
    let src = TempDir::new().unwrap();
    let gateway = InMemoryGateway::new();
    let photo = src.child("a.jpg");
    photo.write_str("only copy").unwrap();
    gateway.insert(
        photo.path(),
        MetadataRecord::from_pairs([("EXIF:DateTimeOriginal", "2020:01:01 12:00:00")]),
    );
    let dest = src.child("sorted");
    dest.create_dir_all().unwrap();
    let sorted = dest.child("2020/01/20200101_120000.jpg");
    let move_mode = || config(OperationMode::Move, false);

    let first = Sorter::new(&gateway, dest.path(), move_mode())
        .run(src.path())
        .unwrap();
    assert_eq!(first.transferred(), 1);
    sorted.assert("only copy");

    // the sorted file now answers to the same metadata
    gateway.insert(
        sorted.path(),
        MetadataRecord::from_pairs([("EXIF:DateTimeOriginal", "2020:01:01 12:00:00")]),
    );
    let second = Sorter::new(&gateway, dest.path(), move_mode())
        .run(src.path())
        .unwrap();

    assert_eq!(
        second.outcomes,
        vec![FileOutcome::Skipped {
            path: sorted.path().to_path_buf(),
            reason: SkipReason::AlreadySorted,
        }]
    );
    sorted.assert("only copy");
}
