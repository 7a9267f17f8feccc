pub mod pagination;

use crate::bus::Observer;
use crate::notification::Notification;
use crate::record::{Record, RecordId};
use crate::render::{Column, RenderSurface, RowView, SurfaceEvent, TableView};
use crate::table::pagination::Pagination;
use crate::value::{Value, compare_values};
use serde::{Deserialize, Serialize};

/// Explicit column → label mapping from configuration. Without one the
/// controller infers columns from the widest record seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub order: SortOrder,
}

/// Owns the in-memory page of records plus pagination and sort state,
/// and reconciles CRUD outcomes into it. Never calls the API or the
/// form directly; intents leave as bus notifications.
pub struct TableController {
    records: Vec<Record>,
    pagination: Pagination,
    sort: Option<SortState>,
    column_specs: Option<Vec<ColumnSpec>>,
    surface: Box<dyn RenderSurface>,
}

impl TableController {
    pub fn new(surface: Box<dyn RenderSurface>, rows_per_page: usize) -> Self {
        Self {
            records: Vec::new(),
            pagination: Pagination::new(rows_per_page),
            sort: None,
            column_specs: None,
            surface,
        }
    }

    pub fn with_columns(mut self, specs: Vec<ColumnSpec>) -> Self {
        if !specs.is_empty() {
            self.column_specs = Some(specs);
        }
        self
    }

    /// Replaces the whole collection, back on page one. Records with a
    /// duplicate or missing identifier are dropped with a warning;
    /// identifiers are unique within the collection.
    pub fn load(&mut self, records: Vec<Record>) {
        self.records.clear();
        for record in records {
            match record.id {
                Some(id) if self.find_index(id).is_some() => {
                    log::warn!("dropping record with duplicate id {id}");
                }
                Some(_) => self.records.push(record),
                None => log::warn!("dropping record without an id"),
            }
        }
        self.pagination.reset(self.records.len());
        self.render();
    }

    /// Appends a record. Adding an identifier already present is a
    /// no-op. When the appended record opens a new last page, the view
    /// follows it there; otherwise the current page is preserved.
    pub fn add(&mut self, record: Record) {
        let Some(id) = record.id else {
            log::warn!("ignoring added record without an id");
            return;
        };
        if self.find_index(id).is_some() {
            log::debug!("record {id} already present, add ignored");
            return;
        }

        let last_page_before = self.pagination.total_pages();
        self.records.push(record);
        self.pagination.recompute(self.records.len());

        let appended_page = self.pagination.page_of(self.records.len() - 1);
        if appended_page > last_page_before {
            self.pagination.set_page(self.pagination.total_pages());
        }
        self.render();
    }

    /// Replaces the record with the same identifier in place. No
    /// pagination change and no page navigation.
    pub fn update_one(&mut self, record: Record) {
        let Some(id) = record.id else {
            log::warn!("ignoring updated record without an id");
            return;
        };
        let Some(index) = self.find_index(id) else {
            log::warn!("no record {id} to update");
            return;
        };
        self.records[index] = record;
        self.render();
    }

    /// Removes the record, clamping the current page back into range
    /// when the last page disappears underneath it.
    pub fn remove_one(&mut self, id: RecordId) {
        let Some(index) = self.find_index(id) else {
            log::debug!("no record {id} to remove");
            return;
        };
        self.records.remove(index);
        self.pagination.recompute(self.records.len());
        self.render();
    }

    /// Toggles sort order when `column` is already the sort column,
    /// otherwise sorts ascending. Stable for equal keys; the current
    /// page is preserved.
    pub fn sort_by(&mut self, column: &str) {
        let order = match &self.sort {
            Some(state) if state.column == column => state.order.toggled(),
            _ => SortOrder::Asc,
        };
        self.sort = Some(SortState {
            column: column.to_string(),
            order,
        });

        self.records.sort_by(|left, right| {
            let ordering =
                compare_values(left.value_of(column).as_ref(), right.value_of(column).as_ref());
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        self.render();
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
        self.render();
    }

    /// Translates a rendering-surface event into table mutations or
    /// outgoing intent notifications.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) -> Vec<Notification> {
        match event {
            SurfaceEvent::EditClicked { id } => {
                vec![Notification::EditRequested { id: Some(id) }]
            }
            SurfaceEvent::AddClicked => vec![Notification::EditRequested { id: None }],
            SurfaceEvent::DeleteClicked { id } => {
                vec![Notification::DeleteRequested { id }]
            }
            SurfaceEvent::SortClicked { column } => {
                self.sort_by(&column);
                Vec::new()
            }
            SurfaceEvent::PageClicked { page } => {
                self.set_page(page);
                Vec::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.find_index(id).map(|index| &self.records[index])
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn page_slice(&self) -> &[Record] {
        &self.records[self.pagination.page_range(self.records.len())]
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Display columns: the explicit map when configured, else `id`
    /// followed by the fields of the widest record seen.
    pub fn columns(&self) -> Vec<Column> {
        if let Some(specs) = &self.column_specs {
            return specs
                .iter()
                .map(|spec| {
                    let label = spec
                        .label
                        .clone()
                        .unwrap_or_else(|| label_for(&spec.key));
                    Column::new(&spec.key, label)
                })
                .collect();
        }

        let mut columns = vec![Column::new("id", "ID")];
        let mut widest: Option<&Record> = None;
        for record in &self.records {
            if widest.map(Record::field_count).unwrap_or(0) < record.field_count() {
                widest = Some(record);
            }
        }
        if let Some(record) = widest {
            for key in record.fields.keys() {
                columns.push(Column::new(key, label_for(key)));
            }
        }
        columns
    }

    fn find_index(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id == Some(id))
    }

    fn render(&mut self) {
        let columns = self.columns();
        let rows = self
            .page_slice()
            .iter()
            .map(|record| RowView {
                id: record.id,
                cells: columns
                    .iter()
                    .map(|column| record.value_of(&column.key).unwrap_or(Value::Null))
                    .collect(),
            })
            .collect();

        let view = TableView {
            columns,
            rows,
            current_page: self.pagination.current_page(),
            total_pages: self.pagination.total_pages(),
            sort: self.sort.clone(),
        };

        // A surface failure is fatal for this render only.
        if let Err(err) = self.surface.render(&view) {
            log::error!("table render failed: {err}");
        }
    }
}

impl Observer for TableController {
    fn name(&self) -> &str {
        "table"
    }

    fn on_notification(
        &mut self,
        notification: &Notification,
    ) -> Result<Vec<Notification>, String> {
        match notification {
            Notification::RecordAdded { record } => self.add(record.clone()),
            Notification::RecordUpdated { record } => self.update_one(record.clone()),
            Notification::RecordDeleted { id } => self.remove_one(*id),
            other => log::trace!("table ignoring {}", other.tag()),
        }
        Ok(Vec::new())
    }
}

fn label_for(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
