use clangtool_core::{CompletionKind, Diagnostic, Severity, SourceLocation};
use clangtool_frontend::{CursorKind, RawCompletion};
use clangtool_ide::{Engine, QueryOptions};
use clangtool_memory::{MemoryPressure, ResourceKind, ResourceUsage};
use clangtool_test_utils::{FakeFrontEnd, FakeNode, FakeOutput, FakeSource, Fixture};

/// Treats every `int NAME;` line as a top-level variable.
fn variables(source: &FakeSource<'_>) -> FakeOutput {
    let mut output = FakeOutput::new().usage(
        ResourceUsage::new().with(ResourceKind::Ast, source.text.len() as u64),
    );
    for (i, line) in source.text.lines().enumerate() {
        if let Some(name) = line.strip_prefix("int ").and_then(|s| s.strip_suffix(';')) {
            output = output.node(
                FakeNode::new(CursorKind::VarDecl, name)
                    .at(source.path, i as u32 + 1, 5)
                    .ty("int")
                    .definition(),
            );
        } else if line.contains("error") {
            output = output.diagnostic(Diagnostic::new(
                SourceLocation::new(source.path, i as u32 + 1, 1),
                Severity::Error,
                format!("{}:{}:1: error: bad line", source.path.display(), i + 1),
                "bad line",
            ));
        }
    }
    output
}

fn engine() -> Engine<FakeFrontEnd> {
    Engine::new(FakeFrontEnd::new(|source| Ok(variables(source))))
}

#[test]
fn touch_then_remove_hides_the_path_from_status() {
    let fixture = Fixture::with_files([("a.c", "int a;\n")]);
    let path = fixture.path("a.c");
    let mut engine = engine();

    engine.index_touch(&path);
    assert_eq!(engine.index_status().len(), 1);
    assert_eq!(engine.index_status()[0].path, path);

    engine.index_remove(&path);
    assert!(engine.index_status().iter().all(|e| e.path != path));
}

#[test]
fn clear_empties_status() {
    let fixture = Fixture::with_files([("a.c", "int a;\n"), ("b.c", "int b;\n")]);
    let mut engine = engine();
    engine.index_touch(fixture.path("a.c"));
    engine.index_touch(fixture.path("b.c"));

    engine.index_clear();
    assert!(engine.index_status().is_empty());
    assert_eq!(engine.front_end().live_units(), 0);
}

#[test]
fn paths_are_normalized_to_one_entry() {
    let fixture = Fixture::with_files([("a.c", "int a;\n")]);
    let mut engine = engine();

    engine.index_touch(fixture.path("a.c"));
    engine.index_touch(fixture.root().join("sub/../a.c"));
    engine.index_touch(fixture.root().join("./a.c"));
    assert_eq!(engine.index_status().len(), 1);
}

#[test]
fn overlay_precedence_shows_in_the_outline() {
    let fixture = Fixture::with_files([("a.c", "int on_disk;\n")]);
    let path = fixture.path("a.c");
    let mut engine = engine();

    let buffer = b"int in_buffer;\nint trailing;\n";
    engine.index_touch_unsaved(&path, buffer, 15);
    assert_eq!(engine.file_outline(&path).variables, vec!["in_buffer"]);

    // A plain touch drops the buffer and goes back to disk.
    engine.index_touch(&path);
    assert_eq!(engine.file_outline(&path).variables, vec!["on_disk"]);
}

#[test]
fn unsaved_buffer_survives_later_touches_of_other_files() {
    let fixture = Fixture::with_files([("a.c", "int a;\n"), ("b.c", "int b;\n")]);
    let mut engine = engine();

    engine.index_touch_unsaved(fixture.path("a.c"), b"int a2;\n", 100);
    engine.index_touch(fixture.path("b.c"));
    engine.index_remove(fixture.path("a.c"));

    // Implicit touch after eviction still sees the buffer.
    assert_eq!(engine.file_outline(fixture.path("a.c")).variables, vec!["a2"]);
}

#[test]
fn queries_touch_untouched_paths() {
    let fixture = Fixture::with_files([("a.c", "int a;\n")]);
    let path = fixture.path("a.c");
    let mut engine = engine();

    let ast = engine.file_ast(&path);
    assert_eq!(ast.children.len(), 1);
    assert_eq!(ast.children[0].kind, CompletionKind::Variable);
    assert_eq!(engine.index_status().len(), 1);
    assert_eq!(engine.front_end().parse_count(), 1);

    engine.file_diagnose(&path);
    engine.file_outline(&path);
    assert_eq!(engine.front_end().parse_count(), 1);
}

#[test]
fn touching_twice_with_identical_content_gives_identical_asts() {
    let fixture = Fixture::with_files([("a.c", "int a;\nint b;\n")]);
    let path = fixture.path("a.c");
    let mut engine = engine();

    engine.index_touch(&path);
    let first = engine.file_ast(&path);
    engine.index_touch(&path);
    let second = engine.file_ast(&path);
    assert_eq!(first, second);
}

#[test]
fn diagnostics_are_returned_in_emission_order() {
    let fixture = Fixture::with_files([("a.c", "error one\nint ok;\nerror two\n")]);
    let path = fixture.path("a.c");
    let mut engine = engine();

    let diagnostics = engine.file_diagnose(&path);
    let rows: Vec<_> = diagnostics.iter().map(|d| d.location.row).collect();
    assert_eq!(rows, vec![1, 3]);
    assert!(diagnostics.iter().all(|d| d.severity.is_error()));
}

#[test]
fn missing_file_yields_one_fatal_diagnostic_and_empty_results() {
    let fixture = Fixture::new();
    let path = fixture.path("nowhere.c");
    let mut engine = engine();

    let diagnostics = engine.file_diagnose(&path);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Fatal);

    let ast = engine.file_ast(&path);
    assert!(ast.children.is_empty());
    assert!(engine.file_outline(&path).is_empty());
    assert!(engine.cursor_candidates_at(&path, 1, 1).is_empty());
    assert!(engine.cursor_type_at(&path, 1, 1).is_empty());

    let status = engine.index_status();
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].bytes, 0);
}

#[test]
fn arguments_apply_to_later_parses_only() {
    let fixture = Fixture::with_files([("a.c", "int a;\n")]);
    let path = fixture.path("a.c");
    let mut engine = engine();

    engine.index_touch(&path);
    engine.set_arguments(vec!["-DX=1".to_string()]);
    assert_eq!(engine.arguments(), ["-DX=1"]);
    engine.file_ast(&path);
    assert!(engine.front_end().last_parse().unwrap().args.is_empty());

    engine.index_touch(&path);
    assert_eq!(engine.front_end().last_parse().unwrap().args, ["-DX=1"]);
}

fn completion(name: &str, priority: u32, available: bool) -> RawCompletion {
    RawCompletion {
        kind: CursorKind::FunctionDecl,
        typed_text: name.to_string(),
        result_type: "void".to_string(),
        placeholders: vec!["int x".to_string()],
        brief: format!("{name} docs"),
        priority,
        available,
    }
}

fn completing_engine(options: QueryOptions) -> Engine<FakeFrontEnd> {
    Engine::with_options(
        FakeFrontEnd::new(|_| {
            Ok(FakeOutput::new()
                .completion(completion("zeta", 40, true))
                .completion(completion("deprecated", 1, false))
                .completion(completion("alpha", 12, true))
                .completion(completion("beta", 40, true)))
        }),
        options,
    )
}

#[test]
fn candidates_are_sorted_by_ascending_priority() {
    let fixture = Fixture::with_files([("a.c", "int main() {\n  \n}\n")]);
    let mut engine = completing_engine(QueryOptions::default());

    let candidates = engine.cursor_candidates_at(fixture.path("a.c"), 2, 3);
    let names: Vec<_> = candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta", "beta"]);
    assert!(candidates.windows(2).all(|w| w[0].priority <= w[1].priority));

    let alpha = &candidates[0];
    assert_eq!(alpha.kind, CompletionKind::Function);
    assert_eq!(alpha.result_type, "void");
    assert_eq!(alpha.args, vec!["int x"]);
    assert_eq!(alpha.brief, "alpha docs");
}

#[test]
fn max_candidates_truncates() {
    let fixture = Fixture::with_files([("a.c", "x\n")]);
    let mut engine = completing_engine(QueryOptions {
        max_candidates: Some(2),
        ..QueryOptions::default()
    });
    assert_eq!(engine.cursor_candidates_at(fixture.path("a.c"), 1, 1).len(), 2);
}

#[test]
fn completion_sees_every_overlay() {
    let fixture = Fixture::with_files([("a.c", "x\n")]);
    let mut engine = completing_engine(QueryOptions::default());

    engine.index_touch_unsaved(fixture.path("b.h"), b"int b;", 6);
    engine.cursor_candidates_at(fixture.path("a.c"), 1, 1);

    let calls = engine.front_end().completions();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].unsaved, vec![fixture.path("b.h")]);
}

#[test]
fn out_of_bounds_positions_are_empty() {
    let fixture = Fixture::with_files([("a.c", "ab\ncd\n")]);
    let path = fixture.path("a.c");
    let mut engine = completing_engine(QueryOptions::default());

    assert!(engine.cursor_candidates_at(&path, 0, 1).is_empty());
    assert!(engine.cursor_candidates_at(&path, 1, 0).is_empty());
    // Row 0 / col 0 are rejected before anything is parsed.
    assert_eq!(engine.front_end().parse_count(), 0);

    assert!(engine.cursor_candidates_at(&path, 9, 1).is_empty());
    assert!(engine.cursor_candidates_at(&path, 1, 5).is_empty());
    assert_eq!(engine.cursor_candidates_at(&path, 1, 3).len(), 3);
}

#[test]
fn report_classifies_against_the_budget() {
    let fixture = Fixture::with_files([("a.c", "int a;\n")]);
    let mut engine = engine();
    engine.index_touch(fixture.path("a.c"));

    let report = engine.index_report(Some(7));
    assert_eq!(report.total_bytes, 7);
    assert_eq!(report.pressure, Some(MemoryPressure::Critical));
    assert_eq!(engine.index_report(None).pressure, None);
}

#[test]
fn query_options_default_to_main_file_only() {
    let options = QueryOptions::default();
    assert!(!options.include_headers);
    assert_eq!(options.max_candidates, None);
}

#[test]
fn deeply_nested_ast_is_built_and_dropped_safely() {
    let fixture = Fixture::with_files([("deep.c", "int f(void) { return ((((0)))); }\n")]);
    let path = fixture.path("deep.c");
    let mut engine = Engine::new(FakeFrontEnd::new(|source| {
        let mut node = FakeNode::new(CursorKind::VarDecl, "innermost").at(source.path, 1, 1);
        for _ in 0..200_000 {
            node = FakeNode::new(CursorKind::Other, "").at(source.path, 1, 1).child(node);
        }
        Ok(FakeOutput::new().node(node))
    }));

    let tree = engine.file_ast(&path);
    assert_eq!(tree.len(), 200_002);
    assert!(tree.find(CompletionKind::Variable, "innermost").is_some());
    drop(tree);
}
