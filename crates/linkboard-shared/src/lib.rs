use serde::{
  Deserialize,
  Serialize
};

pub type CategoryId = i64;
pub type LinkId = i64;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Category {
  pub id:   CategoryId,
  pub name: String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Link {
  pub id:            LinkId,
  pub name:          String,
  pub url:           String,
  pub category_id:   CategoryId,
  /// Denormalized by the list endpoint;
  /// never used for grouping.
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub category_name: Option<String>
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct CategoryCreate {
  pub name: String
}

/// Body of both the create and the
/// update link calls.
///
/// `category_id` is `None` when the
/// selected value was not numeric; it is
/// sent as `null` so the service reports
/// the missing category itself.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct LinkPayload {
  pub name:        String,
  pub url:         String,
  pub category_id: Option<CategoryId>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
)]
pub struct ErrorBody {
  #[serde(default)]
  pub error: Option<String>
}
