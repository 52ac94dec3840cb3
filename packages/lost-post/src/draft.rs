//! Post draft input model and its validation rules.
//!
//! Every field is required and nothing else is checked: `lost_date` is kept
//! as typed text and `picture_path` is not checked against the filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Message reported for an empty field.
pub const REQUIRED: &str = "Required";

/// The five user-editable fields of a post draft, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Title,
    LostStatus,
    LostDate,
    LostLocation,
    PicturePath,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::Title,
        DraftField::LostStatus,
        DraftField::LostDate,
        DraftField::LostLocation,
        DraftField::PicturePath,
    ];

    /// Multipart key used by the posts service.
    pub fn wire_name(&self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::LostStatus => "lostStatus",
            DraftField::LostDate => "lostDate",
            DraftField::LostLocation => "lostLocation",
            DraftField::PicturePath => "picturePath",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Title => "Title",
            DraftField::LostStatus => "Lost Status",
            DraftField::LostDate => "Lost Date",
            DraftField::LostLocation => "Lost Location",
            DraftField::PicturePath => "Picture",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// User-edited, pre-submission representation of a post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub lost_status: String,
    pub lost_date: String,
    pub lost_location: String,
    pub picture_path: String,
}

impl PostDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::LostStatus => &self.lost_status,
            DraftField::LostDate => &self.lost_date,
            DraftField::LostLocation => &self.lost_location,
            DraftField::PicturePath => &self.picture_path,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::Title => &mut self.title,
            DraftField::LostStatus => &mut self.lost_status,
            DraftField::LostDate => &mut self.lost_date,
            DraftField::LostLocation => &mut self.lost_location,
            DraftField::PicturePath => &mut self.picture_path,
        };
        *slot = value.into();
    }

    /// Check every field; an empty result means the draft can be submitted.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in DraftField::ALL {
            if self.get(field).is_empty() {
                errors.insert(field, REQUIRED);
            }
        }
        errors
    }

    pub fn validated(self) -> Result<ValidDraft, FieldErrors> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(ValidDraft(self))
        } else {
            Err(errors)
        }
    }
}

/// A draft whose fields are all present.
///
/// Only [`PostDraft::validated`] produces one, so payload assembly never has
/// to handle a missing field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidDraft(PostDraft);

impl ValidDraft {
    pub fn draft(&self) -> &PostDraft {
        &self.0
    }

    pub fn into_inner(self) -> PostDraft {
        self.0
    }
}

/// Field name to error message. Empty means valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<DraftField, &'static str>);

impl FieldErrors {
    pub fn insert(&mut self, field: DraftField, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: DraftField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Draft plus touched-field tracking.
///
/// Re-validates on every change and blur. Errors for untouched fields are
/// kept but not surfaced through [`DraftForm::visible_error`].
#[derive(Clone, Debug)]
pub struct DraftForm {
    draft: PostDraft,
    touched: BTreeSet<DraftField>,
    errors: FieldErrors,
}

impl DraftForm {
    pub fn new() -> Self {
        let draft = PostDraft::default();
        let errors = draft.validate();
        Self {
            draft,
            touched: BTreeSet::new(),
            errors,
        }
    }

    /// Start from an existing draft, nothing touched.
    pub fn from_draft(draft: PostDraft) -> Self {
        let errors = draft.validate();
        Self {
            draft,
            touched: BTreeSet::new(),
            errors,
        }
    }

    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    pub fn value(&self, field: DraftField) -> &str {
        self.draft.get(field)
    }

    pub fn change(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
        self.revalidate();
    }

    pub fn blur(&mut self, field: DraftField) {
        self.touched.insert(field);
        self.revalidate();
    }

    pub fn touch_all(&mut self) {
        self.touched.extend(DraftField::ALL);
    }

    pub fn is_touched(&self, field: DraftField) -> bool {
        self.touched.contains(&field)
    }

    /// Re-run validation against the current values.
    pub fn revalidate(&mut self) -> &FieldErrors {
        self.errors = self.draft.validate();
        &self.errors
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Error to show next to a field; untouched fields stay quiet.
    pub fn visible_error(&self, field: DraftField) -> Option<&'static str> {
        if self.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for DraftForm {
    fn default() -> Self {
        Self::new()
    }
}
