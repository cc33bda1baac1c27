use std::{
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

/// The three kinds of type declaration the resolver recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Struct,
    Packet,
    Enum,
}

impl DefinitionKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "struct" => Some(Self::Struct),
            "packet" => Some(Self::Packet),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Packet => "packet",
            Self::Enum => "enum",
        }
    }

    /// Packets are top-level messages and cannot appear as a field type.
    pub fn is_type_usable(self) -> bool {
        !matches!(self, Self::Packet)
    }
}

impl Display for DefinitionKind {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One enumerator of an `enum` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    /// Zero-based line within the enum's source file.
    pub line: usize,
    pub doc: Option<String>,
}

/// A discovered `struct`, `packet` or `enum` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub kind: DefinitionKind,
    /// Normalised absolute path of the file the declaration occurs in.
    pub source_file: PathBuf,
    /// Zero-based line of the introducing keyword.
    pub line: usize,
    pub doc: Option<String>,
    /// Enumerators in textual order. Always empty for structs and packets.
    pub members: Vec<Member>,
}

impl Definition {
    pub fn is_defined_in(
        &self,
        path: &Path,
    ) -> bool {
        self.source_file == path
    }

    pub fn member(
        &self,
        name: &str,
    ) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// File name used in editor-facing labels such as `Defined in types.cnd`.
    pub fn file_name(&self) -> String {
        self.source_file
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_file.display().to_string())
    }
}
