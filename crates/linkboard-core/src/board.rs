//! Client state and the operations that change it.
//!
//! [`BoardClient`] owns everything the board page shows: the snapshot (via
//! [`StateStore`]), the link form, the category-name draft and the single
//! status message. It is constructed empty, filled by [`BoardClient::load`],
//! and afterwards only changes through a refresh or a form transition.
//!
//! Every mutation runs mutate, then refresh, then any form reset, each step
//! starting only after the previous one succeeded. Independent operations
//! are not serialized against each other; whichever refresh lands last
//! decides what is shown. `RefCell` borrows are never held across an await.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use linkboard_shared::{CategoryId, LinkId};
use tracing::{debug, info, warn};

use crate::form::{FormController, FormMode, LinkField};
use crate::intent::Intent;
use crate::remote::{CatalogApi, Failure, RemoteClient};
use crate::render::{self, BoardView, CategoryOption};
use crate::store::{Snapshot, StateStore};

pub struct BoardClient<C> {
    api: CatalogApi<C>,
    store: StateStore,
    form: RefCell<FormController>,
    category_draft: RefCell<String>,
    message: RefCell<Option<String>>,
    revision: Cell<u64>,
}

impl<C: RemoteClient> BoardClient<C> {
    pub fn new(api: CatalogApi<C>) -> Self {
        Self {
            api,
            store: StateStore::new(),
            form: RefCell::new(FormController::new()),
            category_draft: RefCell::new(String::new()),
            message: RefCell::new(None),
            revision: Cell::new(0),
        }
    }

    pub fn api(&self) -> &CatalogApi<C> {
        &self.api
    }

    pub fn snapshot(&self) -> Rc<Snapshot> {
        self.store.snapshot()
    }

    pub fn view(&self) -> BoardView {
        render::render(&self.store.snapshot())
    }

    pub fn category_options(&self) -> Vec<CategoryOption> {
        render::category_options(&self.store.snapshot())
    }

    pub fn form(&self) -> FormController {
        self.form.borrow().clone()
    }

    pub fn mode(&self) -> FormMode {
        self.form.borrow().mode()
    }

    pub fn message(&self) -> Option<String> {
        self.message.borrow().clone()
    }

    pub fn category_draft(&self) -> String {
        self.category_draft.borrow().clone()
    }

    /// Number of snapshots that have landed; failed refreshes leave it alone.
    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    /// Bumped on every observable change; front-ends redraw when it moves.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn set_field(&self, field: LinkField, value: impl Into<String>) {
        self.form.borrow_mut().set_field(field, value);
        self.touch();
    }

    pub fn set_category_draft(&self, value: impl Into<String>) {
        *self.category_draft.borrow_mut() = value.into();
        self.touch();
    }

    /// First refresh, followed by a form reset so the first category is
    /// preselected.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Result<(), Failure> {
        self.refresh_or_surface("load").await?;
        let snapshot = self.store.snapshot();
        self.form.borrow_mut().reset(&snapshot);
        self.clear_message();
        info!(
            categories = snapshot.categories.len(),
            links = snapshot.links.len(),
            "board loaded"
        );
        Ok(())
    }

    /// Refreshes the snapshot without any preceding mutation.
    pub async fn refresh(&self) -> Result<(), Failure> {
        self.refresh_or_surface("refresh").await
    }

    pub fn begin_edit(&self, id: LinkId) -> bool {
        let snapshot = self.store.snapshot();
        let entered = self.form.borrow_mut().begin_edit(&snapshot, id);
        if entered {
            self.touch();
        }
        entered
    }

    pub fn cancel_edit(&self) {
        let snapshot = self.store.snapshot();
        self.form.borrow_mut().cancel(&snapshot);
        self.touch();
    }

    /// Creates or updates a link from the current form fields.
    ///
    /// On failure the mode and the typed fields stay exactly as they were.
    #[tracing::instrument(skip(self))]
    pub async fn submit_link(&self) -> Result<(), Failure> {
        self.clear_message();
        let (target, payload) = {
            let form = self.form.borrow();
            (form.edit_target(), form.payload())
        };

        let outcome = match target {
            Some(id) => self.api.update_link(id, &payload).await.map(|link| {
                info!(link_id = link.id, "link updated");
            }),
            None => self.api.create_link(&payload).await.map(|link| {
                info!(link_id = link.id, "link created");
            }),
        };
        self.surface_on_error("submit link", outcome)?;

        self.refresh_or_surface("submit link").await?;
        let snapshot = self.store.snapshot();
        self.form.borrow_mut().reset(&snapshot);
        self.clear_message();
        Ok(())
    }

    /// The name is trimmed but not validated; the service decides.
    #[tracing::instrument(skip(self))]
    pub async fn create_category(&self, name: &str) -> Result<(), Failure> {
        self.clear_message();
        let outcome = self.api.create_category(name.trim()).await.map(|category| {
            info!(category_id = category.id, name = %category.name, "category created");
        });
        self.surface_on_error("create category", outcome)?;

        self.category_draft.borrow_mut().clear();
        self.touch();

        self.refresh_or_surface("create category").await?;
        self.clear_message();
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), Failure> {
        let outcome = self.api.delete_category(id).await;
        self.surface_on_error("delete category", outcome)?;
        info!(category_id = id, "category deleted");

        self.refresh_or_surface("delete category").await?;
        self.clear_message();
        Ok(())
    }

    /// Deletes a link; if it was the one being edited the form goes back to
    /// adding once the refresh has landed.
    #[tracing::instrument(skip(self))]
    pub async fn delete_link(&self, id: LinkId) -> Result<(), Failure> {
        let outcome = self.api.delete_link(id).await;
        self.surface_on_error("delete link", outcome)?;
        info!(link_id = id, "link deleted");

        self.refresh_or_surface("delete link").await?;
        if self.form.borrow().edit_target() == Some(id) {
            debug!(link_id = id, "edited link was deleted; resetting form");
            let snapshot = self.store.snapshot();
            self.form.borrow_mut().reset(&snapshot);
        }
        self.clear_message();
        Ok(())
    }

    /// Runs the operation a classified board click asks for.
    pub async fn dispatch(&self, intent: Intent) -> Result<(), Failure> {
        debug!(?intent, "dispatching board intent");
        match intent {
            Intent::EditLink(id) => {
                self.begin_edit(id);
                Ok(())
            }
            Intent::DeleteLink(id) => self.delete_link(id).await,
            Intent::DeleteCategory(id) => self.delete_category(id).await,
            Intent::None => Ok(()),
        }
    }

    async fn refresh_or_surface(&self, op: &'static str) -> Result<(), Failure> {
        let snapshot = self.store.refresh(&self.api).await;
        let snapshot = self.surface_on_error(op, snapshot)?;
        self.form.borrow_mut().sync_categories(&snapshot);
        self.touch();
        Ok(())
    }

    fn surface_on_error<T>(&self, op: &'static str, outcome: Result<T, Failure>) -> Result<T, Failure> {
        outcome.inspect_err(|failure| {
            warn!(op, error = %failure, "operation failed");
            *self.message.borrow_mut() = Some(failure.message().to_string());
            self.touch();
        })
    }

    fn clear_message(&self) {
        if self.message.borrow_mut().take().is_some() {
            self.touch();
        }
    }

    fn touch(&self) {
        self.revision.set(self.revision.get().wrapping_add(1));
    }
}
