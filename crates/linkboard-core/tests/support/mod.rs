#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use linkboard_core::{BoardClient, CatalogApi, Failure, Method, RemoteClient, normalize_response};
use linkboard_shared::{Category, CategoryCreate, Link, LinkPayload};
use serde_json::{Value, json};
use tokio::sync::oneshot;

type Route = (Method, String);

/// In-memory catalog service with the same validation rules and messages as
/// the real one. Individual requests can be held open or made to fail.
#[derive(Default)]
pub struct FakeCatalog {
    categories: RefCell<Vec<Category>>,
    links: RefCell<Vec<Link>>,
    next_category_id: Cell<i64>,
    next_link_id: Cell<i64>,
    holds: RefCell<HashMap<Route, oneshot::Receiver<()>>>,
    transport_failures: RefCell<HashMap<Route, String>>,
    calls: RefCell<Vec<Route>>,
}

impl FakeCatalog {
    pub fn with_categories(names: &[&str]) -> Rc<Self> {
        let fake = Self {
            next_category_id: Cell::new(1),
            next_link_id: Cell::new(1),
            ..Self::default()
        };
        for name in names {
            fake.insert_category(name);
        }
        Rc::new(fake)
    }

    pub fn insert_category(&self, name: &str) -> i64 {
        let id = self.next_category_id.get();
        self.next_category_id.set(id + 1);
        self.categories.borrow_mut().push(Category {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn insert_link_with_id(&self, id: i64, name: &str, category_id: i64) {
        self.links.borrow_mut().push(Link {
            id,
            name: name.to_string(),
            url: format!("https://example.com/{name}"),
            category_id,
            category_name: None,
        });
        self.next_link_id.set(self.next_link_id.get().max(id + 1));
    }

    /// The matching request waits until the returned sender fires.
    pub fn hold(&self, method: Method, path: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.holds.borrow_mut().insert((method, path.to_string()), rx);
        tx
    }

    /// The next matching request gets no response at all.
    pub fn fail_transport(&self, method: Method, path: &str, message: &str) {
        self.transport_failures
            .borrow_mut()
            .insert((method, path.to_string()), message.to_string());
    }

    pub fn calls(&self) -> Vec<Route> {
        self.calls.borrow().clone()
    }

    pub fn link_ids(&self) -> Vec<i64> {
        self.links.borrow().iter().map(|link| link.id).collect()
    }

    fn respond(&self, path: &str, method: Method, body: Option<&Value>) -> (u16, String) {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match (method, segments.as_slice()) {
            (Method::Get, ["api", "categories"]) => ok(200, json!(*self.categories.borrow())),
            (Method::Get, ["api", "links"]) => self.list_links(),
            (Method::Post, ["api", "categories"]) => self.create_category(body),
            (Method::Post, ["api", "links"]) => self.create_link(body),
            (Method::Put, ["api", "links", id]) => self.update_link(id, body),
            (Method::Delete, ["api", "links", id]) => self.delete_link(id),
            (Method::Delete, ["api", "categories", id]) => self.delete_category(id),
            _ => (404, "<html><body>Not Found</body></html>".to_string()),
        }
    }

    fn list_links(&self) -> (u16, String) {
        let categories = self.categories.borrow();
        let links: Vec<Link> = self
            .links
            .borrow()
            .iter()
            .map(|link| Link {
                category_name: categories
                    .iter()
                    .find(|category| category.id == link.category_id)
                    .map(|category| category.name.clone()),
                ..link.clone()
            })
            .collect();
        ok(200, json!(links))
    }

    fn create_category(&self, body: Option<&Value>) -> (u16, String) {
        let name = body
            .cloned()
            .and_then(|value| serde_json::from_value::<CategoryCreate>(value).ok())
            .map(|create| create.name.trim().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            return error(400, "Category name is required.");
        }
        if self.categories.borrow().iter().any(|category| category.name == name) {
            return error(400, "Category already exists.");
        }
        let id = self.insert_category(&name);
        ok(201, json!({"id": id, "name": name}))
    }

    fn validate_link(&self, body: Option<&Value>) -> Result<(String, String, i64), (u16, String)> {
        let payload = body
            .cloned()
            .and_then(|value| serde_json::from_value::<LinkPayload>(value).ok())
            .ok_or_else(|| error(400, "Name, URL and category are required."))?;
        let name = payload.name.trim().to_string();
        let url = payload.url.trim().to_string();
        let category_id = payload.category_id.unwrap_or(0);
        if name.is_empty() || url.is_empty() || category_id == 0 {
            return Err(error(400, "Name, URL and category are required."));
        }
        if !self.categories.borrow().iter().any(|category| category.id == category_id) {
            return Err(error(400, "Selected category does not exist."));
        }
        Ok((name, url, category_id))
    }

    fn create_link(&self, body: Option<&Value>) -> (u16, String) {
        let (name, url, category_id) = match self.validate_link(body) {
            Ok(valid) => valid,
            Err(rejection) => return rejection,
        };
        let id = self.next_link_id.get();
        self.next_link_id.set(id + 1);
        let link = Link {
            id,
            name,
            url,
            category_id,
            category_name: None,
        };
        self.links.borrow_mut().push(link.clone());
        ok(201, json!(link))
    }

    fn update_link(&self, raw_id: &str, body: Option<&Value>) -> (u16, String) {
        let (name, url, category_id) = match self.validate_link(body) {
            Ok(valid) => valid,
            Err(rejection) => return rejection,
        };
        let id: i64 = raw_id.parse().unwrap_or(-1);
        let mut links = self.links.borrow_mut();
        let Some(link) = links.iter_mut().find(|link| link.id == id) else {
            return error(404, "Link not found.");
        };
        link.name = name;
        link.url = url;
        link.category_id = category_id;
        ok(200, json!(link.clone()))
    }

    fn delete_link(&self, raw_id: &str) -> (u16, String) {
        let id: i64 = raw_id.parse().unwrap_or(-1);
        let mut links = self.links.borrow_mut();
        let before = links.len();
        links.retain(|link| link.id != id);
        if links.len() == before {
            return error(404, "Link not found.");
        }
        (204, "{}".to_string())
    }

    fn delete_category(&self, raw_id: &str) -> (u16, String) {
        let id: i64 = raw_id.parse().unwrap_or(-1);
        if self.categories.borrow().len() <= 1 {
            return error(400, "At least one category is required.");
        }
        if self.links.borrow().iter().any(|link| link.category_id == id) {
            return error(400, "Move or delete links first.");
        }
        let mut categories = self.categories.borrow_mut();
        let before = categories.len();
        categories.retain(|category| category.id != id);
        if categories.len() == before {
            return error(404, "Category not found.");
        }
        (204, "{}".to_string())
    }
}

fn ok(status: u16, body: Value) -> (u16, String) {
    (status, body.to_string())
}

fn error(status: u16, message: &str) -> (u16, String) {
    (status, json!({"error": message}).to_string())
}

impl RemoteClient for FakeCatalog {
    async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Option<Value>, Failure> {
        let route = (method, path.to_string());
        self.calls.borrow_mut().push(route.clone());

        let hold = self.holds.borrow_mut().remove(&route);
        if let Some(release) = hold {
            let _ = release.await;
        }

        let failure = self.transport_failures.borrow_mut().remove(&route);
        if let Some(message) = failure {
            return Err(Failure::transport(message));
        }

        let (status, text) = self.respond(path, method, body);
        normalize_response(status, &text)
    }
}

pub fn board(fake: &Rc<FakeCatalog>) -> BoardClient<Rc<FakeCatalog>> {
    BoardClient::new(CatalogApi::new(Rc::clone(fake), ""))
}
