use serde::{Deserialize, Deserializer, Serialize};

/// Structured summary of an interviewee, produced once per completed
/// interview. Anything the conversation did not cover stays `None` or empty.
///
/// Field names mirror the JSON shape the summarizer asks the provider for,
/// so a provider reply deserializes directly into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub personal_info: Option<PersonalInfo>,
    pub background: Option<Background>,
    pub personality: Option<Personality>,
    #[serde(deserialize_with = "null_as_empty")]
    pub relationships: Vec<Relationship>,
    #[serde(deserialize_with = "null_as_empty")]
    pub anecdotes: Vec<Anecdote>,
}

impl Profile {
    /// True when nothing at all was learned about the person.
    pub fn is_unpopulated(&self) -> bool {
        self.personal_info.as_ref().is_none_or(PersonalInfo::is_empty)
            && self.background.as_ref().is_none_or(Background::is_empty)
            && self.personality.as_ref().is_none_or(Personality::is_empty)
            && self.relationships.is_empty()
            && self.anecdotes.is_empty()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.personal_info.as_ref().and_then(|p| p.name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub occupation: Option<String>,
}

impl PersonalInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.location.is_none()
            && self.occupation.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Background {
    pub hometown: Option<String>,
    pub education: Option<String>,
    pub career: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub hobbies: Vec<String>,
}

impl Background {
    pub fn is_empty(&self) -> bool {
        self.hometown.is_none()
            && self.education.is_none()
            && self.career.is_none()
            && self.hobbies.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Personality {
    #[serde(deserialize_with = "null_as_empty")]
    pub traits: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub values: Vec<String>,
    pub communication_style: Option<String>,
    pub humor: Option<String>,
}

impl Personality {
    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
            && self.values.is_empty()
            && self.communication_style.is_none()
            && self.humor.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Relationship {
    pub name: Option<String>,
    pub relation: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Anecdote {
    pub title: Option<String>,
    pub story: Option<String>,
}

// The provider contract says "null or an empty array"; accept both.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
