//! Single-image attachment held alongside a draft.

use std::path::Path;

use bytes::Bytes;

use crate::error::AttachmentError;

/// Binary file picked or dropped by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    mime: String,
    content: Bytes,
}

impl Attachment {
    /// Build an attachment from in-memory content; the MIME type is guessed
    /// from the file name.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            mime,
            content: content.into(),
        }
    }

    /// Read a file from disk, named after its final path component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AttachmentError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| AttachmentError::NoFileName {
                path: path.to_path_buf(),
            })?;

        let content = tokio::fs::read(path)
            .await
            .map_err(|source| AttachmentError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(file_name = %file_name, size = content.len(), "Attachment loaded");
        Ok(Self::new(file_name, content))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Holds at most one attachment plus the panel visibility toggle.
///
/// The panel flag is independent of the held file: the panel can be open
/// with nothing selected, and closing it keeps the selection.
#[derive(Clone, Debug, Default)]
pub struct AttachmentSelector {
    current: Option<Attachment>,
    panel_visible: bool,
}

impl AttachmentSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the first candidate, replacing whatever was held before.
    ///
    /// An empty candidate list leaves the current selection as it is.
    pub fn select<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = Attachment>,
    {
        if let Some(first) = candidates.into_iter().next() {
            tracing::debug!(file_name = %first.file_name(), "Attachment selected");
            self.current = Some(first);
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Attachment> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn set_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
    }

    pub fn toggle_panel(&mut self) {
        self.panel_visible = !self.panel_visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> Attachment {
        Attachment::new(name, name.as_bytes().to_vec())
    }

    #[test]
    fn select_keeps_only_first_candidate() {
        let mut selector = AttachmentSelector::new();
        selector.select(vec![file("a.png"), file("b.png")]);

        assert_eq!(selector.current().map(Attachment::file_name), Some("a.png"));
    }

    #[test]
    fn select_replaces_previous_attachment() {
        let mut selector = AttachmentSelector::new();
        selector.select([file("a.png")]);
        selector.select([file("b.jpg")]);

        assert_eq!(selector.current().map(Attachment::file_name), Some("b.jpg"));
    }

    #[test]
    fn empty_selection_keeps_current() {
        let mut selector = AttachmentSelector::new();
        selector.select([file("a.png")]);
        selector.select(Vec::new());

        assert_eq!(selector.current().map(Attachment::file_name), Some("a.png"));
    }

    #[test]
    fn clear_removes_attachment() {
        let mut selector = AttachmentSelector::new();
        selector.select([file("a.png")]);
        selector.clear();

        assert!(selector.is_empty());
        assert!(selector.current().is_none());
    }

    #[test]
    fn panel_toggle_is_independent_of_selection() {
        let mut selector = AttachmentSelector::new();
        assert!(!selector.panel_visible());

        selector.toggle_panel();
        assert!(selector.panel_visible());
        assert!(selector.is_empty());

        selector.select([file("a.png")]);
        selector.toggle_panel();
        assert!(!selector.panel_visible());
        assert!(!selector.is_empty());
    }

    #[test]
    fn mime_is_guessed_from_file_name() {
        assert_eq!(file("dog.jpg").mime(), "image/jpeg");
        assert_eq!(file("dog.png").mime(), "image/png");
        assert_eq!(file("notes").mime(), "application/octet-stream");
    }

    #[tokio::test]
    async fn from_path_reads_file_and_names_it() {
        let dir = std::env::temp_dir().join(format!("lost-post-attach-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("dog.jpg");
        tokio::fs::write(&path, b"jpeg-bytes").await.unwrap();

        let attachment = Attachment::from_path(&path).await.unwrap();

        assert_eq!(attachment.file_name(), "dog.jpg");
        assert_eq!(attachment.content().as_ref(), b"jpeg-bytes");
        assert_eq!(attachment.size(), 10);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn from_path_reports_missing_file() {
        let err = Attachment::from_path("/definitely/not/here/dog.jpg")
            .await
            .unwrap_err();

        assert!(matches!(err, AttachmentError::Read { .. }));
    }
}
