//! Engine behavior against the real libclang front end.

use clangtool_clang::ClangFrontEnd;
use clangtool_core::{CompletionKind, Severity};
use clangtool_ide::Engine;
use clangtool_test_utils::libclang::clang_front_end;
use clangtool_test_utils::Fixture;

fn engine() -> Option<Engine<ClangFrontEnd>> {
    match clang_front_end() {
        Some(fe) => Some(Engine::new(fe)),
        None => {
            eprintln!("libclang not found; skipping");
            None
        }
    }
}

const SHAPES_H: &str = "typedef unsigned long size_type;\n";

const SHAPES: &str = r#"#include "shapes.h"

/// A point in the plane.
struct Point {
    int x;
    int y;
    Point(int x, int y);
    int norm() const;
};

int Point::norm() const { return x * x + y * y; }

static int counter;

int area(int w, int) { return w; }
"#;

#[test]
fn clean_file_has_no_diagnostics() {
    let Some(mut engine) = engine() else { return };
    let fixture = Fixture::with_files([("clean.c", "int main(void) { return 0; }\n")]);
    assert!(engine.file_diagnose(fixture.path("clean.c")).is_empty());
}

#[test]
fn missing_semicolon_is_at_least_an_error() {
    let Some(mut engine) = engine() else { return };
    let fixture = Fixture::with_files([("broken.c", "int main(void) { return 0 }\n")]);
    let diagnostics = engine.file_diagnose(fixture.path("broken.c"));
    assert!(diagnostics.iter().any(|d| d.severity >= Severity::Error));
}

#[test]
fn outline_lists_top_level_symbols() {
    let Some(mut engine) = engine() else { return };
    let fixture = Fixture::with_files([("shapes.h", SHAPES_H), ("shapes.cpp", SHAPES)]);

    let outline = engine.file_outline(fixture.path("shapes.cpp"));
    assert_eq!(outline.includes, vec!["shapes.h"]);
    assert_eq!(outline.variables, vec!["counter"]);

    assert_eq!(outline.classes.len(), 1);
    let point = &outline.classes[0];
    assert_eq!(point.name, "Point");
    assert_eq!(point.attributes, vec!["x", "y"]);
    let methods: Vec<_> = point.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(methods, vec!["Point", "norm"]);
    assert_eq!(point.functions[0].params, vec!["x", "y"]);

    let functions: Vec<_> = outline.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(functions, vec!["norm", "area"]);
    assert_eq!(outline.functions[1].params, vec!["w", "int"]);
}

#[test]
fn ast_carries_docs_types_and_children() {
    let Some(mut engine) = engine() else { return };
    let fixture = Fixture::with_files([("shapes.h", SHAPES_H), ("shapes.cpp", SHAPES)]);

    let ast = engine.file_ast(fixture.path("shapes.cpp"));
    let point = ast
        .find(CompletionKind::Struct, "Point")
        .expect("struct Point");
    assert_eq!(point.doc, "A point in the plane.");
    assert_eq!(point.location.row, 4);
    let x = point
        .find(CompletionKind::Attribute, "x")
        .expect("field x");
    assert_eq!(x.ty, "int");
    assert!(ast.find(CompletionKind::Parameter, "w").is_some());
    // Function nodes are named with their parameter list.
    assert!(ast.find(CompletionKind::Function, "area(int, int)").is_some());
    // Header declarations are filtered out by default.
    assert!(ast.find(CompletionKind::Typedef, "size_type").is_none());
}

#[test]
fn overlay_content_wins_over_disk() {
    let Some(mut engine) = engine() else { return };
    let fixture = Fixture::with_files([("a.c", "int on_disk;\n")]);
    let path = fixture.path("a.c");

    let buffer = b"int in_buffer;\n";
    engine.index_touch_unsaved(&path, buffer, buffer.len());
    assert_eq!(engine.file_outline(&path).variables, vec!["in_buffer"]);

    engine.index_touch(&path);
    assert_eq!(engine.file_outline(&path).variables, vec!["on_disk"]);
}

#[test]
fn repeated_touch_gives_identical_asts() {
    let Some(mut engine) = engine() else { return };
    let fixture = Fixture::with_files([("shapes.h", SHAPES_H), ("shapes.cpp", SHAPES)]);
    let path = fixture.path("shapes.cpp");

    engine.index_touch(&path);
    let first = engine.file_ast(&path);
    engine.index_touch(&path);
    assert_eq!(engine.file_ast(&path), first);
}

#[test]
fn candidates_are_sorted_by_priority() {
    let Some(mut engine) = engine() else { return };
    let fixture = Fixture::with_files([(
        "complete.cpp",
        "struct S { int member; void run(int times); };\nvoid f() { S s; s. }\n",
    )]);

    let candidates = engine.cursor_candidates_at(fixture.path("complete.cpp"), 2, 19);
    assert!(candidates.iter().any(|c| c.name == "member"));
    let run = candidates
        .iter()
        .find(|c| c.name == "run")
        .expect("run candidate");
    assert_eq!(run.kind, CompletionKind::Method);
    assert_eq!(run.args, vec!["int times"]);
    assert!(candidates.windows(2).all(|w| w[0].priority <= w[1].priority));
}

#[test]
fn declaration_and_definition_resolve() {
    let Some(mut engine) = engine() else { return };
    let source = "int twice(int v);\nint twice(int v) { return v * 2; }\nint main(void) { return twice(21); }\n";
    let fixture = Fixture::with_files([("nav.c", source)]);
    let path = fixture.path("nav.c");

    assert_eq!(engine.cursor_type_at(&path, 3, 25), "int (int)");

    let declaration = engine.cursor_declaration_at(&path, 3, 25);
    assert!(!declaration.is_none());
    let again = engine.cursor_declaration_at(declaration.file(), declaration.row, declaration.col);
    assert_eq!(again, declaration);

    let definition = engine.cursor_definition_at(&path, 3, 25);
    assert_eq!((definition.row, definition.col), (2, 5));
}

#[test]
fn unresolvable_cursor_gives_empty_results() {
    let Some(mut engine) = engine() else { return };
    let fixture = Fixture::with_files([("blank.c", "\n\n   \nint x;\n")]);
    let path = fixture.path("blank.c");

    assert_eq!(engine.cursor_type_at(&path, 2, 1), "");
    assert!(engine.cursor_declaration_at(&path, 2, 1).is_none());
    assert!(engine.cursor_definition_at(&path, 2, 1).is_none());
    assert!(engine.cursor_declaration_at(&path, 99, 1).is_none());
}

#[test]
fn clear_empties_status() {
    let Some(mut engine) = engine() else { return };
    let fixture = Fixture::with_files([("a.c", "int a;\n"), ("b.c", "int b;\n")]);
    engine.index_touch(fixture.path("a.c"));
    engine.index_touch(fixture.path("b.c"));
    assert_eq!(engine.index_status().len(), 2);
    assert!(engine.index_status().iter().all(|e| e.bytes > 0));

    engine.index_clear();
    assert!(engine.index_status().is_empty());
}
