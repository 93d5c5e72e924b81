use serde::{Deserialize, Serialize};

use crate::model::id::CandidateId;

fn default_photo() -> String {
    "/images/default.jpg".to_string()
}

/// A candidate standing in one election, including the private biographical
/// block. Only election admins may see this representation; everyone else
/// gets [`PublicCandidate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Roster-unique id.
    pub id: CandidateId,
    /// Display name.
    pub name: String,
    /// Photo path or URL.
    #[serde(default = "default_photo")]
    pub photo: String,
    /// Short bio shown on the ballot.
    pub bio: String,
    /// Longer biography text.
    #[serde(default)]
    pub biography: String,
    /// Numeric activity score.
    #[serde(default)]
    pub activity: u32,
    /// Free-text field-of-activity tag.
    #[serde(default)]
    pub field_of_activity: String,
    /// Private biographical attributes.
    #[serde(flatten)]
    pub private: PrivateProfile,
}

impl Candidate {
    /// Erase the private profile, leaving the voter-facing projection.
    pub fn erase_private(self) -> PublicCandidate {
        PublicCandidate {
            id: self.id,
            name: self.name,
            photo: self.photo,
            bio: self.bio,
            biography: self.biography,
            activity: self.activity,
            field_of_activity: self.field_of_activity,
        }
    }
}

/// Biographical attributes visible only to election admins, never to plain
/// voters or in public result views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub place_of_birth: String,
    #[serde(default)]
    pub residence: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub work: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub facebook_url: String,
}

/// The voter-facing projection of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCandidate {
    pub id: CandidateId,
    pub name: String,
    pub photo: String,
    pub bio: String,
    pub biography: String,
    pub activity: u32,
    pub field_of_activity: String,
}

/// Admin-supplied fields for a new roster entry. Ids are assigned by the
/// roster, never by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCandidate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub activity: u32,
    #[serde(default)]
    pub field_of_activity: String,
    #[serde(flatten)]
    pub private: PrivateProfile,
}

impl NewCandidate {
    /// Trim surrounding whitespace from every string field.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            photo: self.photo.map(|p| p.trim().to_string()),
            bio: self.bio.trim().to_string(),
            biography: self.biography.trim().to_string(),
            activity: self.activity,
            field_of_activity: self.field_of_activity.trim().to_string(),
            private: PrivateProfile {
                full_name: self.private.full_name.trim().to_string(),
                email: self.private.email.trim().to_string(),
                phone: self.private.phone.trim().to_string(),
                place_of_birth: self.private.place_of_birth.trim().to_string(),
                residence: self.private.residence.trim().to_string(),
                date_of_birth: self.private.date_of_birth.trim().to_string(),
                work: self.private.work.trim().to_string(),
                education: self.private.education.trim().to_string(),
                facebook_url: self.private.facebook_url.trim().to_string(),
            },
        }
    }

    /// Build the stored candidate under `id`.
    pub(crate) fn into_candidate(self, id: CandidateId) -> Candidate {
        Candidate {
            id,
            name: self.name,
            photo: self.photo.unwrap_or_else(default_photo),
            bio: self.bio,
            biography: self.biography,
            activity: self.activity,
            field_of_activity: self.field_of_activity,
            private: self.private,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erase_private_drops_the_private_block() {
        let candidate = NewCandidate::example("Anna").trimmed().into_candidate(1);
        let full = serde_json::to_value(&candidate).unwrap();
        assert_eq!(full["email"], "anna@example.com");

        let public = serde_json::to_value(candidate.erase_private()).unwrap();
        for key in ["full_name", "email", "phone", "place_of_birth", "residence",
                    "date_of_birth", "work", "education", "facebook_url"] {
            assert!(public.get(key).is_none(), "{key} leaked into the public view");
        }
        assert_eq!(public["name"], "Anna");
        assert_eq!(public["bio"], "Anna has served on the council before");
    }

    #[test]
    fn trimmed_strips_surrounding_whitespace() {
        let new = NewCandidate {
            name: "  Anna  ".to_string(),
            bio: "\tbio\n".to_string(),
            ..NewCandidate::default()
        }
        .trimmed();

        assert_eq!(new.name, "Anna");
        assert_eq!(new.bio, "bio");
    }

    #[test]
    fn missing_photo_falls_back_to_the_default() {
        let candidate = NewCandidate::example("Anna").into_candidate(1);
        assert_eq!(candidate.photo, "/images/default.jpg");
    }

    #[test]
    fn stored_shape_is_flat() {
        // The private block serialises inline, so documents written by
        // earlier versions of the system load unchanged.
        let candidate: Candidate = serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "Anna",
            "bio": "short",
            "email": "anna@example.com",
            "work": "carpenter"
        }))
        .unwrap();

        assert_eq!(candidate.private.email, "anna@example.com");
        assert_eq!(candidate.private.work, "carpenter");
        assert_eq!(candidate.photo, "/images/default.jpg");
    }
}
