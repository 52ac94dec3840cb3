//! Lost item post submission pipeline.
//!
//! Composes a lost item post (five text fields plus an optional image),
//! validates it, sends it to the posts service as multipart form data and
//! replaces the shared posts collection with the service's answer.
//!
//! # Example
//!
//! ```rust,ignore
//! use lost_post::{
//!     Attachment, Composer, CreatePostPipeline, DraftField, HttpTransport, Identity, SharedPosts,
//! };
//!
//! let pipeline = CreatePostPipeline::new(HttpTransport::new(), SharedPosts::new());
//! let identity = Identity::new("u1", "bearer-token");
//!
//! let mut composer = Composer::default();
//! composer.form.change(DraftField::Title, "Lost Wallet");
//! composer.form.change(DraftField::LostStatus, "lost");
//! composer.form.change(DraftField::LostDate, "2024-01-01");
//! composer.form.change(DraftField::LostLocation, "Main St");
//! composer.form.change(DraftField::PicturePath, "wallet.jpg");
//! composer.attachments.select([Attachment::from_path("wallet.jpg").await?]);
//!
//! pipeline.submit(&mut composer, &identity).await?;
//! println!("{} posts", pipeline.store().posts().len());
//! ```

pub mod attachment;
pub mod draft;
pub mod error;
pub mod identity;
pub mod payload;
pub mod pipeline;
pub mod state;
pub mod testing;
pub mod transport;
pub mod types;

pub use attachment::{Attachment, AttachmentSelector};
pub use draft::{DraftField, DraftForm, FieldErrors, PostDraft, ValidDraft};
pub use error::{AttachmentError, SubmitError, TransportError};
pub use identity::Identity;
pub use payload::{build, AttachmentPart, SubmissionPayload};
pub use pipeline::{Composer, CreatePostPipeline};
pub use state::{reconcile, PostsAction, PostsStore, SharedPosts};
pub use transport::{HttpTransport, PostsTransport};
pub use types::{Post, PostsCollection};
