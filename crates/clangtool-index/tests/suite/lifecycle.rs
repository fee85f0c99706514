use clangtool_index::{EntryState, Index};
use clangtool_test_utils::{FakeFrontEnd, Fixture, ParseKind};

#[test]
fn status_is_ordered_by_path_and_reports_usage() {
    let fixture = Fixture::with_files([("b.c", "int bb;"), ("a.c", "int a;")]);
    let mut index = Index::new(FakeFrontEnd::default());

    index.touch(&fixture.path("b.c"));
    index.touch(&fixture.path("a.c"));

    let status = index.status();
    let paths: Vec<_> = status.iter().map(|e| e.path.clone()).collect();
    assert_eq!(paths, vec![fixture.path("a.c"), fixture.path("b.c")]);
    assert_eq!(status[0].bytes, 6);
    assert_eq!(status[1].bytes, 7);
}

#[test]
fn remove_hides_the_entry_and_releases_its_handle() {
    let fixture = Fixture::with_files([("a.c", "int a;")]);
    let path = fixture.path("a.c");
    let mut index = Index::new(FakeFrontEnd::default());

    index.touch(&path);
    assert_eq!(index.front_end().live_units(), 1);

    assert!(index.remove(&path));
    assert!(index.status().iter().all(|e| e.path != path));
    assert_eq!(index.state(&path), None);
    assert_eq!(index.front_end().live_units(), 0);

    assert!(!index.remove(&path));
}

#[test]
fn clear_empties_everything() {
    let fixture = Fixture::with_files([("a.c", "int a;"), ("b.c", "int b;")]);
    let mut index = Index::new(FakeFrontEnd::default());
    index.touch(&fixture.path("a.c"));
    index.touch(&fixture.path("b.c"));

    index.clear();
    assert!(index.status().is_empty());
    assert!(index.is_empty());
    assert_eq!(index.front_end().live_units(), 0);
}

#[test]
fn failed_reparse_falls_back_to_a_full_parse() {
    let fixture = Fixture::with_files([("a.c", "int a;")]);
    let path = fixture.path("a.c");
    let mut index = Index::new(FakeFrontEnd::default());

    index.touch(&path);
    index.front_end().set_fail_reparse(true);
    let entry = index.touch(&path);
    assert!(entry.unit().is_some());

    let kinds: Vec<_> = index.front_end().parses().iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![ParseKind::Full, ParseKind::Incremental, ParseKind::Full]
    );
    assert_eq!(index.front_end().live_units(), 1);
}

#[test]
fn failed_entry_recovers_once_the_file_appears() {
    let fixture = Fixture::new();
    let path = fixture.path("late.c");
    let mut index = Index::new(FakeFrontEnd::default());

    assert!(index.touch(&path).unit().is_none());
    fixture.write("late.c", "int late;");
    let entry = index.touch(&path);
    assert!(entry.unit().is_some());
    assert!(entry.diagnostics().is_empty());

    // No handle to reuse, so the retry is a full parse.
    let last = index.front_end().last_parse().unwrap();
    assert_eq!(last.kind, ParseKind::Full);
    assert_eq!(index.state(&path), Some(EntryState::Ready));
}

#[test]
fn one_entry_per_path() {
    let fixture = Fixture::with_files([("a.c", "int a;")]);
    let path = fixture.path("a.c");
    let mut index = Index::new(FakeFrontEnd::default());

    index.touch(&path);
    index.touch(&path);
    index.ensure(&path);
    assert_eq!(index.len(), 1);
    assert_eq!(index.paths().collect::<Vec<_>>(), vec![path.as_path()]);
}
