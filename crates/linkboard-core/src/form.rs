//! Link form state machine.
//!
//! The form is either adding a new link or editing exactly one existing link.
//! Field values are kept as the raw text the user typed; they are only
//! trimmed and coerced when a payload is built.

use linkboard_shared::{CategoryId, LinkId, LinkPayload};
use tracing::debug;

use crate::store::Snapshot;

pub const ADD_LABEL: &str = "Add Link";
pub const SAVE_LABEL: &str = "Save Link";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Adding,
    Editing(LinkId),
}

impl FormMode {
    pub fn edit_target(self) -> Option<LinkId> {
        match self {
            FormMode::Adding => None,
            FormMode::Editing(id) => Some(id),
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            FormMode::Adding => ADD_LABEL,
            FormMode::Editing(_) => SAVE_LABEL,
        }
    }

    pub fn cancel_visible(self) -> bool {
        matches!(self, FormMode::Editing(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Name,
    Url,
    Category,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFields {
    pub name: String,
    pub url: String,
    /// Selected category, as the selector's string value.
    pub category_id: String,
}

impl LinkFields {
    pub fn payload(&self) -> LinkPayload {
        LinkPayload {
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
            category_id: parse_category_id(&self.category_id),
        }
    }

    fn selected_category(&self) -> Option<CategoryId> {
        parse_category_id(&self.category_id)
    }
}

fn parse_category_id(raw: &str) -> Option<CategoryId> {
    raw.trim().parse().ok()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormController {
    mode: FormMode,
    fields: LinkFields,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn edit_target(&self) -> Option<LinkId> {
        self.mode.edit_target()
    }

    pub fn fields(&self) -> &LinkFields {
        &self.fields
    }

    pub fn submit_label(&self) -> &'static str {
        self.mode.submit_label()
    }

    pub fn cancel_visible(&self) -> bool {
        self.mode.cancel_visible()
    }

    pub fn payload(&self) -> LinkPayload {
        self.fields.payload()
    }

    pub fn set_field(&mut self, field: LinkField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LinkField::Name => self.fields.name = value,
            LinkField::Url => self.fields.url = value,
            LinkField::Category => self.fields.category_id = value,
        }
    }

    /// Switches to editing `id`, copying the link's current values into the
    /// fields. Returns `false` and changes nothing when the snapshot has no
    /// such link.
    pub fn begin_edit(&mut self, snapshot: &Snapshot, id: LinkId) -> bool {
        let Some(link) = snapshot.link(id) else {
            debug!(link_id = id, "edit requested for unknown link; ignoring");
            return false;
        };

        self.mode = FormMode::Editing(link.id);
        self.fields = LinkFields {
            name: link.name.clone(),
            url: link.url.clone(),
            category_id: link.category_id.to_string(),
        };
        debug!(link_id = id, "editing link");
        true
    }

    pub fn cancel(&mut self, snapshot: &Snapshot) {
        self.reset(snapshot);
    }

    /// Back to adding with blank fields and the first category selected.
    pub fn reset(&mut self, snapshot: &Snapshot) {
        self.mode = FormMode::Adding;
        self.fields = LinkFields {
            category_id: default_selection(snapshot),
            ..LinkFields::default()
        };
    }

    /// Keeps the selector pointing at a category that still exists after a
    /// refresh, falling back to the first one.
    pub fn sync_categories(&mut self, snapshot: &Snapshot) {
        let still_present = self
            .fields
            .selected_category()
            .is_some_and(|id| snapshot.category(id).is_some());
        if !still_present {
            self.fields.category_id = default_selection(snapshot);
        }
    }
}

fn default_selection(snapshot: &Snapshot) -> String {
    snapshot
        .first_category_id()
        .map(|id| id.to_string())
        .unwrap_or_default()
}
