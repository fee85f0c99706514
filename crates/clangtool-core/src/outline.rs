use serde::{Deserialize, Serialize};

/// Flat table of contents for one file's top-level scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub includes: Vec<String>,
    pub functions: Vec<OutlineFunction>,
    pub classes: Vec<OutlineClass>,
    pub variables: Vec<String>,
}

impl Outline {
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
            && self.functions.is_empty()
            && self.classes.is_empty()
            && self.variables.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineFunction {
    pub name: String,
    pub params: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineClass {
    pub name: String,
    pub attributes: Vec<String>,
    pub functions: Vec<OutlineFunction>,
}
