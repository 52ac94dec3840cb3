//! Create-post submission cycle.
//!
//! One [`CreatePostPipeline`] drives validation, payload assembly, the
//! network exchange and reconciliation for the [`Composer`] handed to it:
//!
//! `Idle → Validating → (Invalid → Idle) | (Valid → Assembling → Submitting
//! → Succeeded | Failed → Idle)`
//!
//! Only one submission per pipeline may be outstanding; a second call while
//! one is in flight is rejected with [`SubmitError::InProgress`].

use std::sync::atomic::{AtomicBool, Ordering};

use crate::attachment::AttachmentSelector;
use crate::draft::DraftForm;
use crate::error::{Result, SubmitError};
use crate::identity::Identity;
use crate::payload;
use crate::state::{reconcile, PostsStore};
use crate::transport::PostsTransport;

/// Per-widget editing state: the draft form and its attachment.
#[derive(Clone, Debug, Default)]
pub struct Composer {
    pub form: DraftForm,
    pub attachments: AttachmentSelector,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Releases the in-flight flag when dropped, including when the submit
/// future is dropped mid-request.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct CreatePostPipeline<T, S> {
    transport: T,
    store: S,
    in_flight: AtomicBool,
}

impl<T, S> CreatePostPipeline<T, S>
where
    T: PostsTransport,
    S: PostsStore,
{
    pub fn new(transport: T, store: S) -> Self {
        Self {
            transport,
            store,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one submission cycle for `composer`.
    ///
    /// On success the store holds the service's collection and the
    /// composer's attachment is cleared; text fields are left as they are.
    /// On any error the store and the composer are unchanged.
    #[tracing::instrument(skip_all, fields(user_id = %identity.user_id()))]
    pub async fn submit(&self, composer: &mut Composer, identity: &Identity) -> Result<()> {
        let _guard = InFlight::acquire(&self.in_flight).ok_or_else(|| {
            tracing::warn!("Submission rejected, another one is in flight");
            SubmitError::InProgress
        })?;

        composer.form.touch_all();
        let errors = composer.form.revalidate();
        if !errors.is_empty() {
            tracing::debug!(errors = %errors, "Draft failed validation");
            return Err(SubmitError::Validation(errors.clone()));
        }

        let draft = composer.form.draft().clone().validated()?;
        let payload = payload::build(&draft, composer.attachments.current(), identity);

        tracing::info!(
            has_attachment = payload.attachment().is_some(),
            "Submitting lost item post"
        );
        let posts = self
            .transport
            .submit(payload, identity.token())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Post submission failed");
                SubmitError::Transport(e)
            })?;

        reconcile(&self.store, posts);
        composer.attachments.clear();

        tracing::info!("Lost item post submitted");
        Ok(())
    }
}
