pub mod api;
pub mod bus;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod form;
pub mod notification;
pub mod record;
pub mod render;
pub mod table;
pub mod toast;
pub mod validate;
pub mod value;

pub use api::ResourceApi;
pub use api::http::HttpApi;
pub use api::memory::MemoryApi;
pub use bus::{Bus, Observer, SharedObserver};
pub use config::AppConfig;
pub use coordinator::Coordinator;
pub use error::{ApiError, ConfigError, SurfaceError};
pub use form::FieldSet;
pub use form::modal::ModalForm;
pub use form::schema::{FieldKind, FieldSchema, Surround};
pub use notification::Notification;
pub use record::{Record, RecordId};
pub use render::text::TextSurface;
pub use render::{Column, RenderSurface, RowView, SurfaceEvent, TableView};
pub use table::pagination::Pagination;
pub use table::{ColumnSpec, SortOrder, SortState, TableController};
pub use toast::{Toast, ToastKind, ToastLog, ToastSink};
pub use validate::locales::Locale;
pub use validate::{FieldError, FormValidator};
pub use value::Value;
