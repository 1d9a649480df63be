use serde::{Deserialize, Serialize};
use std::fmt;

/// A text column on the source site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Greek,
    English,
    Latin,
}

impl Language {
    /// Numeric column id used by newadvent.org.
    pub fn source_id(self) -> u8 {
        match self {
            Language::Greek => 1,
            Language::English => 2,
            Language::Latin => 3,
        }
    }

    /// CSS class of the table cells holding this language's paragraphs.
    pub fn cell_class(self) -> String {
        format!("bibletd{}", self.source_id())
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Greek => "greek",
            Language::English => "english",
            Language::Latin => "latin",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
