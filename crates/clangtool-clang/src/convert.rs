use clang_sys as cx;
use clangtool_core::{AccessSpecifier, Severity};
use clangtool_frontend::CursorKind;
use clangtool_memory::ResourceKind;

pub(crate) fn cursor_kind(kind: cx::CXCursorKind) -> CursorKind {
    match kind {
        cx::CXCursor_TranslationUnit => CursorKind::TranslationUnit,
        cx::CXCursor_InclusionDirective => CursorKind::InclusionDirective,
        cx::CXCursor_MacroDefinition => CursorKind::MacroDefinition,
        cx::CXCursor_Namespace => CursorKind::Namespace,
        cx::CXCursor_ClassDecl => CursorKind::ClassDecl,
        cx::CXCursor_StructDecl => CursorKind::StructDecl,
        cx::CXCursor_UnionDecl => CursorKind::UnionDecl,
        cx::CXCursor_EnumDecl => CursorKind::EnumDecl,
        cx::CXCursor_ClassTemplate => CursorKind::ClassTemplate,
        cx::CXCursor_FieldDecl => CursorKind::FieldDecl,
        cx::CXCursor_CXXMethod => CursorKind::Method,
        cx::CXCursor_Constructor => CursorKind::Constructor,
        cx::CXCursor_Destructor => CursorKind::Destructor,
        cx::CXCursor_ConversionFunction => CursorKind::ConversionFunction,
        cx::CXCursor_FunctionDecl => CursorKind::FunctionDecl,
        cx::CXCursor_FunctionTemplate => CursorKind::FunctionTemplate,
        cx::CXCursor_ParmDecl => CursorKind::ParmDecl,
        cx::CXCursor_VarDecl => CursorKind::VarDecl,
        cx::CXCursor_EnumConstantDecl => CursorKind::EnumConstantDecl,
        cx::CXCursor_TypedefDecl => CursorKind::TypedefDecl,
        cx::CXCursor_TypeAliasDecl => CursorKind::TypeAliasDecl,
        _ => CursorKind::Other,
    }
}

/// `None` for ignored diagnostics.
pub(crate) fn severity(severity: cx::CXDiagnosticSeverity) -> Option<Severity> {
    match severity {
        cx::CXDiagnostic_Note => Some(Severity::Note),
        cx::CXDiagnostic_Warning => Some(Severity::Warning),
        cx::CXDiagnostic_Error => Some(Severity::Error),
        cx::CXDiagnostic_Fatal => Some(Severity::Fatal),
        _ => None,
    }
}

pub(crate) fn access(access: cx::CX_CXXAccessSpecifier) -> AccessSpecifier {
    match access {
        cx::CX_CXXPublic => AccessSpecifier::Public,
        cx::CX_CXXProtected => AccessSpecifier::Protected,
        cx::CX_CXXPrivate => AccessSpecifier::Private,
        _ => AccessSpecifier::None,
    }
}

pub(crate) fn resource_kind(kind: cx::CXTUResourceUsageKind) -> ResourceKind {
    match kind {
        cx::CXTUResourceUsage_AST => ResourceKind::Ast,
        cx::CXTUResourceUsage_Identifiers => ResourceKind::Identifiers,
        cx::CXTUResourceUsage_Selectors => ResourceKind::Selectors,
        cx::CXTUResourceUsage_GlobalCompletionResults => ResourceKind::GlobalCompletionResults,
        cx::CXTUResourceUsage_SourceManagerContentCache => {
            ResourceKind::SourceManagerContentCache
        }
        cx::CXTUResourceUsage_AST_SideTables => ResourceKind::AstSideTables,
        cx::CXTUResourceUsage_SourceManager_Membuffer_Malloc => {
            ResourceKind::SourceManagerMembufferMalloc
        }
        cx::CXTUResourceUsage_SourceManager_Membuffer_MMap => {
            ResourceKind::SourceManagerMembufferMmap
        }
        cx::CXTUResourceUsage_ExternalASTSource_Membuffer_Malloc => {
            ResourceKind::ExternalAstSourceMembufferMalloc
        }
        cx::CXTUResourceUsage_ExternalASTSource_Membuffer_MMap => {
            ResourceKind::ExternalAstSourceMembufferMmap
        }
        cx::CXTUResourceUsage_Preprocessor => ResourceKind::Preprocessor,
        cx::CXTUResourceUsage_PreprocessingRecord => ResourceKind::PreprocessingRecord,
        cx::CXTUResourceUsage_SourceManager_DataStructures => {
            ResourceKind::SourceManagerDataStructures
        }
        cx::CXTUResourceUsage_Preprocessor_HeaderSearch => ResourceKind::PreprocessorHeaderSearch,
        _ => ResourceKind::Other,
    }
}
