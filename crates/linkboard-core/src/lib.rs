pub mod board;
pub mod config;
pub mod form;
pub mod intent;
pub mod remote;
pub mod render;
pub mod store;

pub use board::BoardClient;
pub use config::ClientConfig;
pub use form::{
  FormController,
  FormMode,
  LinkField,
  LinkFields
};
pub use intent::{
  Affordance,
  Intent,
  TargetDescriptor,
  classify
};
pub use remote::{
  CatalogApi,
  Failure,
  Method,
  RemoteClient,
  normalize_response
};
pub use render::{
  BoardView,
  CategoryOption,
  ColumnBody,
  ColumnView,
  LinkRow,
  TextRenderer
};
pub use store::{
  Snapshot,
  StateStore
};
