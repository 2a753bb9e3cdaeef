use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An abstract data type description: signatures, laws, and two
/// implementation variants.
///
/// Values are snapshots. Edits in [`crate::edit`] return a new `Adt` and
/// leave the old one untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Adt {
    pub name: String,
    /// Description of the value domain.
    pub domain: String,
    /// Typical uses of the type.
    pub uses: String,
    pub profiles: Vec<Profile>,
    pub axioms: Vec<Axiom>,
    pub implementations: Implementations,
}

/// A behavioral signature (one operation of the type).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub id: String,
    pub name: String,
    /// Call signature, e.g. `push(s: Stack, x: Item) -> void`.
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Precondition expressions, one per entry.
    pub preconditions: Vec<String>,
}

/// An equational law relating profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Axiom {
    pub id: String,
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ids of the profiles the axiom mentions.
    pub related_profile_ids: Vec<String>,
}

/// One implementation variant: its value space and a method body per
/// profile id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Implementation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain_space: String,
    /// Profile id -> pseudocode body.
    #[serde(default)]
    pub methods: BTreeMap<String, String>,
}

impl Implementation {
    /// An empty implementation for `variant`.
    pub fn empty(variant: Variant) -> Self {
        Implementation {
            id: variant.id().to_string(),
            name: variant.label().to_string(),
            domain_space: String::new(),
            methods: BTreeMap::new(),
        }
    }

    pub fn method(&self, profile_id: &str) -> Option<&str> {
        self.methods.get(profile_id).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Implementations {
    pub contiguous: Implementation,
    pub chained: Implementation,
}

impl Default for Implementations {
    fn default() -> Self {
        Implementations {
            contiguous: Implementation::empty(Variant::Contiguous),
            chained: Implementation::empty(Variant::Chained),
        }
    }
}

impl Implementations {
    pub fn get(&self, variant: Variant) -> &Implementation {
        match variant {
            Variant::Contiguous => &self.contiguous,
            Variant::Chained => &self.chained,
        }
    }

    pub(crate) fn get_mut(&mut self, variant: Variant) -> &mut Implementation {
        match variant {
            Variant::Contiguous => &mut self.contiguous,
            Variant::Chained => &mut self.chained,
        }
    }
}

/// Selects one of the two implementation variants.
///
/// Serialized as its lowercase key; read through [`FromStr`], so any case
/// is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Variant {
    /// Array-backed.
    #[default]
    Contiguous,
    /// Linked.
    Chained,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Contiguous, Variant::Chained];

    /// Key used in the interchange format.
    pub fn key(self) -> &'static str {
        match self {
            Variant::Contiguous => "contiguous",
            Variant::Chained => "chained",
        }
    }

    /// Default implementation id.
    pub fn id(self) -> &'static str {
        match self {
            Variant::Contiguous => "impl-contiguous",
            Variant::Chained => "impl-chained",
        }
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Contiguous => "Contiguous",
            Variant::Chained => "Chained",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown variant '{}' (expected contiguous or chained)", s))
    }
}

impl TryFrom<String> for Variant {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Adt {
    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn axiom(&self, id: &str) -> Option<&Axiom> {
        self.axioms.iter().find(|a| a.id == id)
    }

    pub fn implementation(&self, variant: Variant) -> &Implementation {
        self.implementations.get(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_has_both_variants() {
        let adt = Adt::default();
        assert_eq!(adt.implementation(Variant::Contiguous).id, "impl-contiguous");
        assert_eq!(adt.implementation(Variant::Chained).name, "Chained");
        assert!(adt.profiles.is_empty());
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("Chained".parse::<Variant>(), Ok(Variant::Chained));
        assert_eq!(" contiguous ".parse::<Variant>(), Ok(Variant::Contiguous));
        assert!("linked".parse::<Variant>().is_err());
    }

    #[test]
    fn variant_deserializes_in_any_case() {
        let variant: Variant = serde_json::from_str("\"Chained\"").unwrap();
        assert_eq!(variant, Variant::Chained);
        assert_eq!(serde_json::to_string(&Variant::Chained).unwrap(), "\"chained\"");
        assert!(serde_json::from_str::<Variant>("\"linked\"").is_err());
    }
}
