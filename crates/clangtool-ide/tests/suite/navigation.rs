use std::path::PathBuf;

use clangtool_core::SourceLocation;
use clangtool_frontend::CursorKind;
use clangtool_ide::Engine;
use clangtool_test_utils::{FakeFrontEnd, FakeNode, FakeOutput, Fixture};

// int twice(int v);
// int twice(int v) { return v * 2; }
// int main(void) { return twice(21); }
const SOURCE: &str = "int twice(int v);\n\
                      int twice(int v) { return v * 2; }\n\
                      int main(void) { return twice(21); }\n";

fn engine(fixture: &Fixture) -> (PathBuf, Engine<FakeFrontEnd>) {
    let path = fixture.write("nav.c", SOURCE);
    let fe = FakeFrontEnd::new(|source| {
        let p = source.path;
        Ok(FakeOutput::new()
            .node(
                FakeNode::new(CursorKind::FunctionDecl, "twice")
                    .at(p, 1, 5)
                    .ty("int (int)")
                    .key("twice.decl")
                    .defined_by("twice.def")
                    .child(FakeNode::new(CursorKind::ParmDecl, "v").at(p, 1, 15).ty("int")),
            )
            .node(
                FakeNode::new(CursorKind::FunctionDecl, "twice")
                    .at(p, 2, 5)
                    .ty("int (int)")
                    .key("twice.def")
                    .definition(),
            )
            .node(
                FakeNode::new(CursorKind::FunctionDecl, "main")
                    .at(p, 3, 5)
                    .ty("int (void)")
                    .definition()
                    .child(
                        // The call expression has no type of its own here so
                        // the referenced entity's type is used.
                        FakeNode::new(CursorKind::Other, "twice")
                            .at(p, 3, 25)
                            .refers_to("twice.decl"),
                    ),
            ))
    });
    (path, Engine::new(fe))
}

#[test]
fn type_falls_back_to_the_referenced_entity() {
    let fixture = Fixture::new();
    let (path, mut engine) = engine(&fixture);
    assert_eq!(engine.cursor_type_at(&path, 3, 26), "int (int)");
    assert_eq!(engine.cursor_type_at(&path, 1, 15), "int");
}

#[test]
fn declaration_is_a_fixed_point() {
    let fixture = Fixture::new();
    let (path, mut engine) = engine(&fixture);

    let declaration = engine.cursor_declaration_at(&path, 3, 25);
    assert_eq!(declaration, SourceLocation::new(&path, 1, 5));

    let again = engine.cursor_declaration_at(
        declaration.file(),
        declaration.row,
        declaration.col,
    );
    assert_eq!(again, declaration);
}

#[test]
fn definition_goes_through_the_referenced_declaration() {
    let fixture = Fixture::new();
    let (path, mut engine) = engine(&fixture);

    assert_eq!(
        engine.cursor_definition_at(&path, 3, 25),
        SourceLocation::new(&path, 2, 5)
    );
    assert_eq!(
        engine.cursor_definition_at(&path, 1, 5),
        SourceLocation::new(&path, 2, 5)
    );
    assert_eq!(
        engine.cursor_definition_at(&path, 3, 5),
        SourceLocation::new(&path, 3, 5)
    );
}

#[test]
fn unresolvable_positions_give_empty_results() {
    let fixture = Fixture::new();
    let (path, mut engine) = engine(&fixture);

    // Whitespace between declarations.
    assert_eq!(engine.cursor_type_at(&path, 1, 4), "");
    assert!(engine.cursor_declaration_at(&path, 1, 4).is_none());
    assert!(engine.cursor_definition_at(&path, 1, 4).is_none());

    // Past the end of the file.
    assert!(engine.cursor_declaration_at(&path, 40, 1).is_none());
    assert!(engine.cursor_definition_at(&path, 1, 400).is_none());
}
