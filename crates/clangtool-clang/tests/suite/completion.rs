use clangtool_frontend::{CursorKind, ParsedUnit};
use clangtool_test_utils::Fixture;

use super::{front_end, parse};

#[test]
fn member_access_completes_fields() {
    let Some(fe) = front_end() else { return };
    let fixture = Fixture::new();
    let path = fixture.write(
        "members.cpp",
        "struct S { int member; };\nvoid f() { S s; s. }\n",
    );
    let mut unit = parse(&fe, &path, &[]);

    let results = unit.complete_at(&path, 2, 19, &[]);
    let member = results
        .iter()
        .find(|r| r.typed_text == "member")
        .expect("member candidate");
    assert_eq!(member.kind, CursorKind::FieldDecl);
    assert_eq!(member.result_type, "int");
    assert!(member.available);
}

#[test]
fn completion_outside_the_file_is_empty() {
    let Some(fe) = front_end() else { return };
    let fixture = Fixture::new();
    let path = fixture.write("empty.cpp", "int x;\n");
    let mut unit = parse(&fe, &path, &[]);

    assert!(unit.complete_at(&path, 30, 1, &[]).is_empty());
}
