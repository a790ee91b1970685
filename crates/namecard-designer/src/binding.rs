//! Profile binding: rewrite a template's text slots for one person.
//!
//! Each text field is resolved by the first rule that applies:
//! 1. its trimmed text is a known label for a slot (`이름`, `Company`, ...)
//! 2. its text equals one of the profile's values (re-binding)
//! 3. its rank among text fields sorted by `top` is 0, 1 or 2
//!
//! Only `text` is written; geometry and the object set are untouched.

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// The person record a template is bound against. Unknown fields are
/// ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, alias = "company_name", alias = "organization")]
    pub company: Option<String>,
    #[serde(default, alias = "fullname", alias = "full_name")]
    pub name: Option<String>,
    #[serde(default, alias = "position", alias = "job_title")]
    pub title: Option<String>,
}

impl Profile {
    pub fn new(company: &str, name: &str, title: &str) -> Self {
        Self {
            company: Some(company.to_string()),
            name: Some(name.to_string()),
            title: Some(title.to_string()),
        }
    }

    /// Non-empty value for a slot.
    pub fn value(&self, slot: ProfileSlot) -> Option<&str> {
        let value = match slot {
            ProfileSlot::Company => self.company.as_deref(),
            ProfileSlot::Name => self.name.as_deref(),
            ProfileSlot::Title => self.title.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    /// Value for a slot, or the slot's placeholder label when missing.
    pub fn resolved(&self, slot: ProfileSlot) -> &str {
        self.value(slot).unwrap_or_else(|| slot.placeholder())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSlot {
    Company,
    Name,
    Title,
}

impl ProfileSlot {
    /// Slots in positional order, top of the badge first.
    pub const ALL: [ProfileSlot; 3] = [ProfileSlot::Company, ProfileSlot::Name, ProfileSlot::Title];

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            ProfileSlot::Company => &["회사명", "Company", "회사", "company"],
            ProfileSlot::Name => &["이름", "Name", "성명", "fullname"],
            ProfileSlot::Title => &["직급", "Title", "Position", "부서"],
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ProfileSlot::Company => "회사명",
            ProfileSlot::Name => "이름",
            ProfileSlot::Title => "직급",
        }
    }

    /// Slot whose label table contains `text` exactly (after trimming).
    pub fn from_label(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|slot| slot.aliases().contains(&text))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingRule {
    Keyword,
    CurrentValue,
    Positional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub id: u64,
    pub slot: ProfileSlot,
    pub rule: BindingRule,
    /// Whether the field's text actually changed.
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingOutcome {
    /// At least one text field exists; `updated` of them were rewritten.
    Bound { updated: usize },
    /// The document has no text fields to bind. Not an error.
    Ungrounded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingReport {
    pub bindings: Vec<FieldBinding>,
    pub outcome: BindingOutcome,
}

impl BindingReport {
    pub fn updated(&self) -> usize {
        match self.outcome {
            BindingOutcome::Bound { updated } => updated,
            BindingOutcome::Ungrounded => 0,
        }
    }
}

fn resolve(text: &str, rank: usize, profile: &Profile) -> Option<(ProfileSlot, BindingRule)> {
    if let Some(slot) = ProfileSlot::from_label(text) {
        return Some((slot, BindingRule::Keyword));
    }
    if let Some(slot) = ProfileSlot::ALL
        .into_iter()
        .find(|slot| profile.value(*slot) == Some(text))
    {
        return Some((slot, BindingRule::CurrentValue));
    }
    ProfileSlot::ALL
        .get(rank)
        .map(|slot| (*slot, BindingRule::Positional))
}

/// Binds `profile` onto the document's text fields in place.
pub fn bind_profile(doc: &mut Document, profile: &Profile) -> BindingReport {
    let mut fields: Vec<(u64, f64, String)> = doc
        .text_fields()
        .map(|(id, t)| (id, t.top, t.text.clone()))
        .collect();

    if fields.is_empty() {
        tracing::debug!("No text fields to bind");
        return BindingReport {
            bindings: Vec::new(),
            outcome: BindingOutcome::Ungrounded,
        };
    }

    // Stable sort: equal tops keep stacking order.
    fields.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut bindings = Vec::new();
    for (rank, (id, _, text)) in fields.iter().enumerate() {
        let Some((slot, rule)) = resolve(text, rank, profile) else {
            continue;
        };
        let value = profile.resolved(slot);
        let changed = text != value;
        if changed {
            if let Some(field) = doc.text_field_mut(*id) {
                field.set_text(value);
            }
        }
        tracing::debug!(id, ?slot, ?rule, changed, "Bound text field");
        bindings.push(FieldBinding {
            id: *id,
            slot,
            rule,
            changed,
        });
    }

    let updated = bindings.iter().filter(|b| b.changed).count();
    if updated > 0 {
        doc.mark_dirty();
    }
    BindingReport {
        bindings,
        outcome: BindingOutcome::Bound { updated },
    }
}
