use clangtool_core::Severity;
use clangtool_frontend::{CursorKind, FrontEnd, ParseRequest, ParsedUnit, UnsavedFile};
use clangtool_test_utils::Fixture;

use super::{front_end, main_file_spellings, parse};

#[test]
fn clean_file_has_no_diagnostics() {
    let Some(fe) = front_end() else { return };
    let fixture = Fixture::new();
    let path = fixture.write("clean.c", "int main(void) { return 0; }\n");

    let unit = parse(&fe, &path, &[]);
    assert!(unit.diagnostics().is_empty(), "{:?}", unit.diagnostics());

    let top: Vec<_> = unit
        .children(unit.root())
        .into_iter()
        .map(|c| unit.info(c))
        .filter(|info| info.in_main_file)
        .collect();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].kind, CursorKind::FunctionDecl);
    assert_eq!(top[0].spelling, "main");
    assert_eq!(top[0].ty, "int (void)");
    assert!(top[0].is_definition);
    assert_eq!((top[0].location.row, top[0].location.col), (1, 5));
}

#[test]
fn missing_semicolon_is_an_error() {
    let Some(fe) = front_end() else { return };
    let fixture = Fixture::new();
    let path = fixture.write("broken.c", "int x\n");

    let unit = parse(&fe, &path, &[]);
    let diagnostics = unit.diagnostics();
    assert!(
        diagnostics.iter().any(|d| d.severity >= Severity::Error),
        "{diagnostics:?}"
    );
    let first = &diagnostics[0];
    assert!(first.text.contains(&first.summary));
    assert_eq!(first.location.file().file_name(), path.file_name());
    assert_eq!(first.location.row, 1);
}

#[test]
fn overlay_for_a_header_is_honored() {
    let Some(fe) = front_end() else { return };
    let fixture = Fixture::new();
    let main = fixture.write("main.c", "#include \"virtual.h\"\nint y = X;\n");
    let header = fixture.path("virtual.h");
    let unsaved = [UnsavedFile {
        path: &header,
        contents: b"#define X 1\n",
    }];

    let unit = parse(&fe, &main, &unsaved);
    assert!(unit.diagnostics().is_empty(), "{:?}", unit.diagnostics());
}

#[test]
fn reparse_picks_up_unsaved_content() {
    let Some(fe) = front_end() else { return };
    let fixture = Fixture::new();
    let path = fixture.write("a.c", "int a;\n");

    let mut unit = parse(&fe, &path, &[]);
    assert_eq!(main_file_spellings(&unit), vec!["a"]);

    let unsaved = [UnsavedFile {
        path: &path,
        contents: b"int a;\nint b;\n",
    }];
    fe.reparse(
        &mut unit,
        &ParseRequest {
            path: &path,
            args: &[],
            unsaved: &unsaved,
        },
    )
    .expect("reparse");
    assert_eq!(main_file_spellings(&unit), vec!["a", "b"]);
}

#[test]
fn resource_usage_is_reported() {
    let Some(fe) = front_end() else { return };
    let fixture = Fixture::new();
    let path = fixture.write("usage.c", "int x;\n");

    let unit = parse(&fe, &path, &[]);
    assert!(unit.resource_usage().total() > 0);
}

#[test]
fn arguments_reach_the_preprocessor() {
    let Some(fe) = front_end() else { return };
    let fixture = Fixture::new();
    let path = fixture.write("defs.c", "int y = VALUE;\n");

    let args = vec!["-DVALUE=3".to_string()];
    let unit = fe
        .parse(&ParseRequest {
            path: &path,
            args: &args,
            unsaved: &[],
        })
        .expect("parse");
    assert!(unit.diagnostics().is_empty(), "{:?}", unit.diagnostics());
}
