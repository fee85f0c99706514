use clangtool_core::{Outline, OutlineClass, OutlineFunction};
use clangtool_frontend::{CursorInfo, CursorKind, ParsedUnit};

/// Parameter names, or the parameter type when it is unnamed.
fn params<U: ParsedUnit>(unit: &U, cursor: U::Cursor) -> Vec<String> {
    unit.children(cursor)
        .into_iter()
        .map(|c| unit.info(c))
        .filter(|info| info.kind == CursorKind::ParmDecl)
        .map(|info| if info.spelling.is_empty() { info.ty } else { info.spelling })
        .collect()
}

fn function<U: ParsedUnit>(unit: &U, cursor: U::Cursor, info: CursorInfo) -> OutlineFunction {
    OutlineFunction {
        name: info.spelling,
        params: params(unit, cursor),
    }
}

fn class<U: ParsedUnit>(unit: &U, cursor: U::Cursor, info: CursorInfo) -> OutlineClass {
    let mut class = OutlineClass {
        name: info.spelling,
        ..OutlineClass::default()
    };
    for member in unit.children(cursor) {
        let member_info = unit.info(member);
        match member_info.kind {
            CursorKind::FieldDecl => class.attributes.push(member_info.spelling),
            kind if kind.is_member_function() => {
                class.functions.push(function(unit, member, member_info))
            }
            _ => {}
        }
    }
    class
}

/// One pass over the top-level cursors of the main file. Nested scopes are
/// not expanded.
pub(crate) fn build<U: ParsedUnit>(unit: &U) -> Outline {
    let mut outline = Outline::default();
    for cursor in unit.children(unit.root()) {
        let info = unit.info(cursor);
        if !info.in_main_file {
            continue;
        }
        match info.kind {
            CursorKind::InclusionDirective => outline.includes.push(info.spelling),
            CursorKind::VarDecl => outline.variables.push(info.spelling),
            kind if kind.is_function_like() => outline.functions.push(function(unit, cursor, info)),
            kind if kind.is_class_like() && info.is_definition => {
                outline.classes.push(class(unit, cursor, info))
            }
            _ => {}
        }
    }
    outline
}
