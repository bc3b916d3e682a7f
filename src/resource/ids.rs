use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Backend entity id; some resources use numbers, others strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Str(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(id) => write!(f, "{}", id),
            ResourceId::Str(id) => f.write_str(id),
        }
    }
}

/// Canonical integers become numeric ids; anything else, including
/// `007` or `+7`, stays a string so the text is sent unchanged
impl FromStr for ResourceId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(id) if id.to_string() == s => Ok(ResourceId::Int(id)),
            _ => Ok(ResourceId::Str(s.to_string())),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Int(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        ResourceId::Int(i64::from(id))
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        ResourceId::Int(i64::from(id))
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::Str(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Str(id.to_string())
    }
}

impl From<&ResourceId> for ResourceId {
    fn from(id: &ResourceId) -> Self {
        id.clone()
    }
}

/// Ordered batch of ids for delete endpoints.
///
/// A single id is just a batch of one, so every delete is a bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ids(Vec<ResourceId>);

impl Ids {
    pub fn as_slice(&self) -> &[ResourceId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceId> {
        self.0.iter()
    }
}

impl fmt::Display for Ids {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&joined.join(","))
    }
}

impl FromIterator<ResourceId> for Ids {
    fn from_iter<I: IntoIterator<Item = ResourceId>>(iter: I) -> Self {
        Ids(iter.into_iter().collect())
    }
}

impl IntoIterator for Ids {
    type Item = ResourceId;
    type IntoIter = std::vec::IntoIter<ResourceId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

macro_rules! ids_from {
    ($($single:ty),*) => {
        $(
            impl From<$single> for Ids {
                fn from(id: $single) -> Self {
                    Ids(vec![ResourceId::from(id)])
                }
            }

            impl From<Vec<$single>> for Ids {
                fn from(ids: Vec<$single>) -> Self {
                    ids.into_iter().map(ResourceId::from).collect()
                }
            }

            impl<const N: usize> From<[$single; N]> for Ids {
                fn from(ids: [$single; N]) -> Self {
                    ids.into_iter().map(ResourceId::from).collect()
                }
            }
        )*
    };
}

ids_from!(i64, i32, u32, String, &str, ResourceId);

impl From<&[i64]> for Ids {
    fn from(ids: &[i64]) -> Self {
        ids.iter().copied().map(ResourceId::from).collect()
    }
}

impl From<&[ResourceId]> for Ids {
    fn from(ids: &[ResourceId]) -> Self {
        ids.iter().cloned().collect()
    }
}
