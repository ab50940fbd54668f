//! JSON body sent to the form-collection endpoint

use super::attendee::Attendee;
use super::invitation::InvitationForm;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Flat submission body: `nome`, `idade`, `mensagem`, then
/// `acompanhante_{i}_nome` / `acompanhante_{i}_idade` for each companion
/// (1-based, in list order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub name: String,
    pub age: String,
    pub message: String,
    pub companions: Vec<(String, String)>,
}

impl SubmissionPayload {
    pub fn from_form(form: &InvitationForm) -> Self {
        Self {
            name: form.primary.name.clone(),
            age: form.primary.age_wire_value().to_string(),
            message: form.message.clone(),
            companions: form
                .companions
                .iter()
                .map(|entry| companion_pair(&entry.attendee))
                .collect(),
        }
    }

    /// Number of keys in the serialized object
    pub fn key_count(&self) -> usize {
        3 + self.companions.len() * 2
    }
}

fn companion_pair(attendee: &Attendee) -> (String, String) {
    (
        attendee.name.clone(),
        attendee.age_wire_value().to_string(),
    )
}

impl Serialize for SubmissionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.key_count()))?;
        map.serialize_entry("nome", &self.name)?;
        map.serialize_entry("idade", &self.age)?;
        map.serialize_entry("mensagem", &self.message)?;
        for (i, (name, age)) in self.companions.iter().enumerate() {
            let position = i + 1;
            map.serialize_entry(&format!("acompanhante_{position}_nome"), name)?;
            map.serialize_entry(&format!("acompanhante_{position}_idade"), age)?;
        }
        map.end()
    }
}
