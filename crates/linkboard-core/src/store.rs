use std::cell::{Cell, RefCell};
use std::rc::Rc;

use linkboard_shared::{Category, CategoryId, Link, LinkId};
use tracing::{debug, warn};

use crate::remote::{CatalogApi, Failure, RemoteClient};

/// Categories and links as of the last completed refresh, in service order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub links: Vec<Link>,
}

impl Snapshot {
    pub fn new(categories: Vec<Category>, links: Vec<Link>) -> Self {
        Self { categories, links }
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|link| link.id == id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn first_category_id(&self) -> Option<CategoryId> {
        self.categories.first().map(|category| category.id)
    }
}

/// Sole owner of the [`Snapshot`].
///
/// The snapshot is only ever swapped for a new `Rc`, so a reader holding an
/// older one keeps a consistent pair of lists.
#[derive(Debug, Default)]
pub struct StateStore {
    snapshot: RefCell<Rc<Snapshot>>,
    generation: Cell<u64>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Rc<Snapshot> {
        Rc::clone(&self.snapshot.borrow())
    }

    /// Number of successful refreshes so far.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Fetches both lists concurrently and replaces the snapshot only when
    /// both succeed.
    #[tracing::instrument(skip_all, fields(generation = self.generation.get()))]
    pub async fn refresh<C: RemoteClient>(
        &self,
        api: &CatalogApi<C>,
    ) -> Result<Rc<Snapshot>, Failure> {
        let (categories, links) = tokio::join!(api.list_categories(), api.list_links());

        let categories = categories.inspect_err(|failure| {
            warn!(error = %failure, "category list failed; keeping previous snapshot");
        })?;
        let links = links.inspect_err(|failure| {
            warn!(error = %failure, "link list failed; keeping previous snapshot");
        })?;

        let next = Rc::new(Snapshot::new(categories, links));
        self.snapshot.replace(Rc::clone(&next));
        self.generation.set(self.generation.get() + 1);

        debug!(
            categories = next.categories.len(),
            links = next.links.len(),
            generation = self.generation.get(),
            "snapshot replaced"
        );
        Ok(next)
    }
}
