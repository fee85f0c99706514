use clangtool_core::CompletionKind;
use serde::{Deserialize, Serialize};

/// Front-end-neutral classification of a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorKind {
    TranslationUnit,
    InclusionDirective,
    MacroDefinition,
    Namespace,
    ClassDecl,
    StructDecl,
    UnionDecl,
    EnumDecl,
    ClassTemplate,
    FieldDecl,
    Method,
    Constructor,
    Destructor,
    ConversionFunction,
    FunctionDecl,
    FunctionTemplate,
    ParmDecl,
    VarDecl,
    EnumConstantDecl,
    TypedefDecl,
    TypeAliasDecl,
    Other,
}

impl CursorKind {
    /// Record-like declarations the outline lists as classes.
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            CursorKind::ClassDecl
                | CursorKind::StructDecl
                | CursorKind::UnionDecl
                | CursorKind::ClassTemplate
        )
    }

    /// Member functions of a class.
    pub fn is_member_function(self) -> bool {
        matches!(
            self,
            CursorKind::Method
                | CursorKind::Constructor
                | CursorKind::Destructor
                | CursorKind::ConversionFunction
                | CursorKind::FunctionTemplate
        )
    }

    /// Anything callable that may appear at file scope.
    pub fn is_function_like(self) -> bool {
        matches!(self, CursorKind::FunctionDecl) || self.is_member_function()
    }

    pub fn completion_kind(self) -> CompletionKind {
        match self {
            CursorKind::Namespace => CompletionKind::Namespace,
            CursorKind::ClassDecl | CursorKind::ClassTemplate => CompletionKind::Class,
            CursorKind::FieldDecl => CompletionKind::Attribute,
            CursorKind::Method
            | CursorKind::Constructor
            | CursorKind::Destructor
            | CursorKind::ConversionFunction => CompletionKind::Method,
            CursorKind::ParmDecl => CompletionKind::Parameter,
            CursorKind::StructDecl => CompletionKind::Struct,
            CursorKind::FunctionDecl | CursorKind::FunctionTemplate => CompletionKind::Function,
            CursorKind::EnumDecl => CompletionKind::Enum,
            CursorKind::EnumConstantDecl => CompletionKind::EnumConstant,
            CursorKind::UnionDecl => CompletionKind::Union,
            CursorKind::TypedefDecl | CursorKind::TypeAliasDecl => CompletionKind::Typedef,
            CursorKind::VarDecl => CompletionKind::Variable,
            CursorKind::MacroDefinition => CompletionKind::Macro,
            CursorKind::InclusionDirective => CompletionKind::Include,
            CursorKind::TranslationUnit | CursorKind::Other => CompletionKind::Unknown,
        }
    }
}

impl From<CursorKind> for CompletionKind {
    fn from(kind: CursorKind) -> Self {
        kind.completion_kind()
    }
}
