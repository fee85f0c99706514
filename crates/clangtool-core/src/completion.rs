use serde::{Deserialize, Serialize};

/// Coarse classification of a symbol, shared by AST nodes and completion
/// candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionKind {
    Namespace,
    Class,
    Attribute,
    Method,
    Parameter,
    Struct,
    Function,
    Enum,
    EnumConstant,
    Union,
    Typedef,
    Variable,
    Macro,
    Include,
    #[default]
    Unknown,
}

impl CompletionKind {
    pub const ALL: [CompletionKind; 15] = [
        CompletionKind::Namespace,
        CompletionKind::Class,
        CompletionKind::Attribute,
        CompletionKind::Method,
        CompletionKind::Parameter,
        CompletionKind::Struct,
        CompletionKind::Function,
        CompletionKind::Enum,
        CompletionKind::EnumConstant,
        CompletionKind::Union,
        CompletionKind::Typedef,
        CompletionKind::Variable,
        CompletionKind::Macro,
        CompletionKind::Include,
        CompletionKind::Unknown,
    ];

    #[inline]
    pub fn is_unknown(self) -> bool {
        self == CompletionKind::Unknown
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompletionKind::Namespace => "namespace",
            CompletionKind::Class => "class",
            CompletionKind::Attribute => "attribute",
            CompletionKind::Method => "method",
            CompletionKind::Parameter => "parameter",
            CompletionKind::Struct => "struct",
            CompletionKind::Function => "function",
            CompletionKind::Enum => "enum",
            CompletionKind::EnumConstant => "enum_constant",
            CompletionKind::Union => "union",
            CompletionKind::Typedef => "typedef",
            CompletionKind::Variable => "variable",
            CompletionKind::Macro => "macro",
            CompletionKind::Include => "include",
            CompletionKind::Unknown => "unknown",
        }
    }
}

/// One suggestion returned by code completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCandidate {
    pub name: String,
    pub result_type: String,
    pub kind: CompletionKind,
    pub brief: String,
    /// Lower is more relevant.
    pub priority: u32,
    /// Parameter signatures, in declaration order.
    pub args: Vec<String>,
}
