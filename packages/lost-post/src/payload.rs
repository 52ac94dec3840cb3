//! Submission payload assembly.
//!
//! [`build`] is a pure function: it merges a validated draft, the optional
//! attachment and the user identity into a [`SubmissionPayload`]. Conversion
//! to a multipart form happens in [`SubmissionPayload::into_form`], at the
//! transport boundary.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use crate::attachment::Attachment;
use crate::draft::{DraftField, ValidDraft};
use crate::error::{TransportError, TransportResult};
use crate::identity::Identity;

/// Multipart key carrying the user id.
pub const USER_ID_KEY: &str = "userId";

/// Multipart key carrying the image bytes.
pub const PICTURE_KEY: &str = "picture";

/// Binary part of the payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachmentPart {
    pub file_name: String,
    pub mime: String,
    pub content: Bytes,
}

/// Transmittable post: ordered text parts plus an optional binary part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionPayload {
    fields: Vec<(&'static str, String)>,
    attachment: Option<AttachmentPart>,
}

impl SubmissionPayload {
    /// Value of the text part named `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Text parts in wire order. Each key appears once.
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn attachment(&self) -> Option<&AttachmentPart> {
        self.attachment.as_ref()
    }

    pub fn picture_path(&self) -> Option<&str> {
        self.text(DraftField::PicturePath.wire_name())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.text(USER_ID_KEY)
    }

    /// Encode as multipart form data.
    pub fn into_form(self) -> TransportResult<Form> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        if let Some(part) = self.attachment {
            let part = Part::bytes(part.content.to_vec())
                .file_name(part.file_name)
                .mime_str(&part.mime)
                .map_err(TransportError::Encode)?;
            form = form.part(PICTURE_KEY, part);
        }

        Ok(form)
    }
}

/// Assemble the payload for one submission.
///
/// Every draft field is copied verbatim, followed by `userId`. With an
/// attachment, its bytes go into the `picture` part and its file name
/// replaces whatever was typed as `picturePath`.
pub fn build(
    draft: &ValidDraft,
    attachment: Option<&Attachment>,
    identity: &Identity,
) -> SubmissionPayload {
    let draft = draft.draft();

    let mut fields: Vec<(&'static str, String)> = DraftField::ALL
        .iter()
        .map(|field| (field.wire_name(), draft.get(*field).to_string()))
        .collect();
    fields.push((USER_ID_KEY, identity.user_id().to_string()));

    let attachment = attachment.map(|attachment| {
        if let Some((_, value)) = fields
            .iter_mut()
            .find(|(name, _)| *name == DraftField::PicturePath.wire_name())
        {
            *value = attachment.file_name().to_string();
        }
        AttachmentPart {
            file_name: attachment.file_name().to_string(),
            mime: attachment.mime().to_string(),
            content: attachment.content().clone(),
        }
    });

    tracing::debug!(
        parts = fields.len(),
        has_attachment = attachment.is_some(),
        "Submission payload assembled"
    );

    SubmissionPayload { fields, attachment }
}
