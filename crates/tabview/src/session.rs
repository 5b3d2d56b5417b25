//! Viewer session: the stateful shell around the view pipeline.

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::columns::{ColumnManager, ColumnState, DEFAULT_VISIBLE_COLUMNS};
use crate::dataset::Dataset;
use crate::error::{Result, TabviewError};
use crate::export::{self, Export, ExportFormat, ExportScope};
use crate::input::{
    ParseOutput, Parser, ParserAdapter, ParserConfig, SAMPLE_CSV, SAMPLE_IDENTITY, SourceMetadata,
    identity_from_path,
};
use crate::persistence::PreferenceGateway;
use crate::view::pagination::{self, DEFAULT_PAGE_SIZE};
use crate::view::{FilterScope, FilterState, PageState, SortState, View, recompute_view, sort};

/// Configuration for a viewer session.
#[derive(Debug, Clone)]
pub struct TabviewConfig {
    /// Parser configuration (also supplies the row cap).
    pub parser: ParserConfig,
    /// Rows per page.
    pub page_size: NonZeroUsize,
    /// Leading fields shown when no preferences are saved.
    pub default_visible_columns: usize,
}

impl Default for TabviewConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            page_size: DEFAULT_PAGE_SIZE,
            default_visible_columns: DEFAULT_VISIBLE_COLUMNS,
        }
    }
}

/// How the current page is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Table,
    /// The page as pretty-printed JSON (the clipboard payload).
    Json,
}

/// Everything that belongs to one ingested dataset.
struct Loaded {
    dataset: Dataset,
    source: SourceMetadata,
    columns: ColumnManager,
}

/// One user's view over the most recently loaded dataset.
///
/// Every method is a single atomic transition. A failed load leaves the
/// previously installed dataset, its column state and the search, sort and
/// page state exactly as they were.
pub struct Session {
    config: TabviewConfig,
    parser: Arc<dyn ParserAdapter>,
    gateway: PreferenceGateway,
    loaded: Option<Loaded>,
    filter: FilterState,
    sort: SortState,
    page: PageState,
    mode: ViewMode,
}

impl Session {
    /// Create a session with default configuration.
    pub fn new(gateway: PreferenceGateway) -> Self {
        Self::with_config(TabviewConfig::default(), gateway)
    }

    /// Create a session with custom configuration.
    pub fn with_config(config: TabviewConfig, gateway: PreferenceGateway) -> Self {
        let parser = Arc::new(Parser::with_config(config.parser.clone()));
        let page = PageState::new(config.page_size);
        Self {
            config,
            parser,
            gateway,
            loaded: None,
            filter: FilterState::default(),
            sort: SortState::default(),
            page,
            mode: ViewMode::default(),
        }
    }

    /// Replace the parser adapter.
    pub fn with_parser(mut self, parser: impl ParserAdapter + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    pub fn config(&self) -> &TabviewConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    /// Read a file and load it. The file name becomes the dataset identity.
    pub async fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&Dataset> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path).await.map_err(|e| TabviewError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.load_bytes(identity_from_path(path), &contents)
    }

    /// Decode UTF-8 bytes and load them.
    pub fn load_bytes(&mut self, identity: impl Into<String>, contents: &[u8]) -> Result<&Dataset> {
        let text = std::str::from_utf8(contents).map_err(|e| TabviewError::Parse {
            row: 0,
            message: format!("input is not valid UTF-8: {e}"),
        })?;
        self.load_text(identity, text)
    }

    /// Parse and ingest raw text, replacing the current dataset on success.
    pub fn load_text(&mut self, identity: impl Into<String>, text: &str) -> Result<&Dataset> {
        let identity = identity.into();
        let output = self.parser.parse(text)?;
        let output = self.enforce_row_cap(output);
        if output.fields.is_empty() {
            return Err(TabviewError::Processing(format!(
                "'{identity}' parsed without any fields"
            )));
        }
        let source = SourceMetadata::new(identity.clone(), text.as_bytes(), &output);

        let dataset = Dataset::ingest(identity, output.fields, output.records)?;
        let columns = ColumnManager::load(
            self.gateway.clone(),
            dataset.identity(),
            dataset.fields(),
            self.config.default_visible_columns,
        );

        info!(
            "Loaded '{}': {} rows, {} columns{}",
            dataset.identity(),
            dataset.row_count(),
            dataset.column_count(),
            if source.truncated { " (truncated)" } else { "" }
        );

        self.filter = FilterState::default();
        self.sort = SortState::default();
        self.page.page_index = 1;

        let loaded = self.loaded.insert(Loaded {
            dataset,
            source,
            columns,
        });
        Ok(&loaded.dataset)
    }

    /// Load the built-in sample dataset.
    pub fn load_sample(&mut self) -> Result<&Dataset> {
        self.load_text(SAMPLE_IDENTITY, SAMPLE_CSV)
    }

    fn enforce_row_cap(&self, mut output: ParseOutput) -> ParseOutput {
        if let Some(max) = self.config.parser.max_rows {
            if output.records.len() > max {
                warn!(
                    "Parser returned {} rows, dropping everything past {max}",
                    output.records.len()
                );
                output.records.truncate(max);
                output.truncated = true;
            }
        }
        output
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn dataset(&self) -> Option<&Dataset> {
        self.loaded.as_ref().map(|l| &l.dataset)
    }

    pub fn source(&self) -> Option<&SourceMetadata> {
        self.loaded.as_ref().map(|l| &l.source)
    }

    pub fn columns(&self) -> Option<&ColumnState> {
        self.loaded.as_ref().map(|l| l.columns.state())
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    fn loaded(&self) -> Result<&Loaded> {
        self.loaded.as_ref().ok_or(TabviewError::NoDataset)
    }

    fn loaded_mut(&mut self) -> Result<&mut Loaded> {
        self.loaded.as_mut().ok_or(TabviewError::NoDataset)
    }

    fn ensure_field(&self, field: &str) -> Result<()> {
        if self.loaded()?.dataset.has_field(field) {
            Ok(())
        } else {
            Err(TabviewError::UnknownField(field.to_string()))
        }
    }

    /// Run the pipeline for the current state.
    pub fn view(&self) -> Result<View<'_>> {
        let loaded = self.loaded()?;
        Ok(recompute_view(
            &loaded.dataset,
            &self.filter,
            &self.sort,
            &self.page,
            loaded.columns.state(),
        ))
    }

    // ---------------------------------------------------------------------
    // Search and sort
    // ---------------------------------------------------------------------

    /// Change the search term and go back to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.term = term.into();
        self.page.page_index = 1;
    }

    /// Change which field(s) the search looks at and go back to the first page.
    pub fn set_search_scope(&mut self, scope: FilterScope) -> Result<()> {
        if let FilterScope::Field(field) = &scope {
            self.ensure_field(field)?;
        }
        self.filter.scope = scope;
        self.page.page_index = 1;
        Ok(())
    }

    /// Sort by `field`, flipping to descending on a repeated request.
    pub fn request_sort(&mut self, field: &str) -> Result<&SortState> {
        self.ensure_field(field)?;
        self.sort = sort::request_sort(&self.sort, field);
        Ok(&self.sort)
    }

    /// Drop the sort and fall back to the filter order.
    pub fn clear_sort(&mut self) {
        self.sort = SortState::default();
    }

    // ---------------------------------------------------------------------
    // Paging
    // ---------------------------------------------------------------------

    /// Go to a page, clamped to the pages that exist. Returns the new index.
    pub fn go_to_page(&mut self, index: usize) -> Result<usize> {
        let total_pages = self.view()?.page.total_pages;
        self.page.page_index = pagination::clamp_index(index, total_pages);
        Ok(self.page.page_index)
    }

    pub fn first_page(&mut self) -> Result<usize> {
        self.go_to_page(1)
    }

    pub fn previous_page(&mut self) -> Result<usize> {
        self.go_to_page(self.page.page_index.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> Result<usize> {
        self.go_to_page(self.page.page_index + 1)
    }

    pub fn last_page(&mut self) -> Result<usize> {
        self.go_to_page(usize::MAX)
    }

    /// Change the page size and go back to the first page.
    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page.page_size = page_size;
        self.page.page_index = 1;
    }

    /// Switch "show all rows on one page" on or off.
    pub fn set_show_all(&mut self, show_all: bool) {
        self.page.show_all = show_all;
        self.page.page_index = 1;
    }

    // ---------------------------------------------------------------------
    // Columns
    // ---------------------------------------------------------------------

    pub fn toggle_column(&mut self, field: &str) -> Result<&ColumnState> {
        self.loaded_mut()?.columns.toggle_visibility(field)
    }

    pub fn set_all_columns(&mut self, show: bool) -> Result<&ColumnState> {
        Ok(self.loaded_mut()?.columns.set_all_visible(show))
    }

    pub fn reorder_columns(&mut self, from: usize, to: usize) -> Result<&ColumnState> {
        self.loaded_mut()?.columns.reorder(from, to)
    }

    // ---------------------------------------------------------------------
    // Presentation and export
    // ---------------------------------------------------------------------

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Pretty JSON of the current page.
    pub fn clipboard_payload(&self) -> Result<String> {
        let view = self.view()?;
        let records = view.page_records();
        if records.is_empty() {
            return Err(TabviewError::EmptyData("current page is empty".to_string()));
        }
        export::clipboard_payload(&records)
    }

    /// Serialize the matching rows (or just the current page).
    pub fn export(&self, format: ExportFormat, scope: ExportScope) -> Result<Export> {
        let loaded = self.loaded()?;
        let view = self.view()?;
        let records = match scope {
            ExportScope::Matched => view.matched_records(),
            ExportScope::Page => view.page_records(),
        };
        if records.is_empty() {
            return Err(TabviewError::EmptyData("no rows to export".to_string()));
        }

        let contents = match format {
            ExportFormat::Json => export::to_json(&records)?,
            ExportFormat::Csv => export::to_delimited_text(loaded.dataset.fields(), &records)?,
        };
        let file_name = export::export_file_name(loaded.dataset.identity(), format);
        info!("Exported {} rows as {file_name}", records.len());

        Ok(Export {
            file_name,
            format,
            contents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn session() -> Session {
        Session::new(PreferenceGateway::new(Arc::new(MemoryStore::new())))
    }

    fn numbers_csv(n: usize) -> String {
        let mut text = String::from("id,label\n");
        for i in 1..=n {
            text.push_str(&format!("{i},row{i}\n"));
        }
        text
    }

    #[test]
    fn test_operations_need_a_dataset() {
        let mut session = session();
        assert!(matches!(session.view(), Err(TabviewError::NoDataset)));
        assert!(matches!(session.toggle_column("x"), Err(TabviewError::NoDataset)));
        assert!(matches!(session.request_sort("x"), Err(TabviewError::NoDataset)));
    }

    #[test]
    fn test_new_dataset_resets_transient_state() {
        let mut session = session();
        session.load_text("a.csv", &numbers_csv(30)).unwrap();
        session.set_search("row");
        session.request_sort("id").unwrap();
        session.go_to_page(2).unwrap();

        session.load_text("b.csv", &numbers_csv(5)).unwrap();
        assert_eq!(session.filter(), &FilterState::default());
        assert_eq!(session.sort(), &SortState::default());
        assert_eq!(session.page_state().page_index, 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut session = session();
        session.load_text("good.csv", &numbers_csv(3)).unwrap();
        session.set_search("row2");

        assert!(matches!(
            session.load_text("empty.csv", ""),
            Err(TabviewError::Processing(_))
        ));
        assert!(matches!(
            session.load_text("dup.csv", "a,a\n1,2"),
            Err(TabviewError::DuplicateField(_))
        ));
        assert!(matches!(
            session.load_bytes("bad.csv", b"\xff\xfe"),
            Err(TabviewError::Parse { .. })
        ));

        assert_eq!(session.dataset().unwrap().identity(), "good.csv");
        assert_eq!(session.filter().term, "row2");
    }

    #[test]
    fn test_paging_is_clamped() {
        let mut session = session();
        session.load_text("n.csv", &numbers_csv(25)).unwrap();

        assert_eq!(session.last_page().unwrap(), 3);
        assert_eq!(session.next_page().unwrap(), 3);
        assert_eq!(session.go_to_page(0).unwrap(), 1);
        assert_eq!(session.previous_page().unwrap(), 1);
        assert_eq!(session.next_page().unwrap(), 2);
    }

    #[test]
    fn test_search_resets_page() {
        let mut session = session();
        session.load_text("n.csv", &numbers_csv(25)).unwrap();
        session.go_to_page(3).unwrap();

        session.set_search("row1");
        assert_eq!(session.page_state().page_index, 1);
        // row1, row10..row19
        assert_eq!(session.view().unwrap().matched_count(), 11);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let mut session = session();
        session.load_text("n.csv", &numbers_csv(2)).unwrap();

        assert!(matches!(
            session.set_search_scope(FilterScope::Field("nope".into())),
            Err(TabviewError::UnknownField(_))
        ));
        assert!(matches!(
            session.request_sort("nope"),
            Err(TabviewError::UnknownField(_))
        ));
    }

    #[test]
    fn test_row_cap_is_enforced_for_any_adapter() {
        struct Unbounded;

        impl ParserAdapter for Unbounded {
            fn parse(&self, text: &str) -> Result<ParseOutput> {
                let config = ParserConfig {
                    max_rows: None,
                    ..ParserConfig::default()
                };
                Parser::with_config(config).parse_str(text)
            }
        }

        let config = TabviewConfig {
            parser: ParserConfig {
                max_rows: Some(4),
                ..ParserConfig::default()
            },
            ..TabviewConfig::default()
        };
        let mut session = Session::with_config(
            config,
            PreferenceGateway::new(Arc::new(MemoryStore::new())),
        )
        .with_parser(Unbounded);

        session.load_text("n.csv", &numbers_csv(10)).unwrap();
        assert_eq!(session.dataset().unwrap().row_count(), 4);
        assert!(session.source().unwrap().truncated);
    }

    #[test]
    fn test_adapter_output_without_fields_is_rejected() {
        use crate::dataset::Record;

        struct NoFields;

        impl ParserAdapter for NoFields {
            fn parse(&self, _text: &str) -> Result<ParseOutput> {
                Ok(ParseOutput {
                    fields: Vec::new(),
                    records: vec![Record::new(), Record::new()],
                    issues: Vec::new(),
                    delimiter: b',',
                    truncated: false,
                })
            }
        }

        let mut session = session();
        session.load_text("good.csv", &numbers_csv(3)).unwrap();
        session.set_search("row2");

        let mut session = session.with_parser(NoFields);
        let err = session.load_text("empty.csv", "anything").unwrap_err();
        assert!(matches!(err, TabviewError::Processing(_)));

        assert_eq!(session.dataset().unwrap().identity(), "good.csv");
        assert_eq!(session.dataset().unwrap().row_count(), 3);
        assert_eq!(session.filter().term, "row2");
    }

    #[test]
    fn test_export_guards_empty_results() {
        let mut session = session();
        session.load_text("n.csv", &numbers_csv(3)).unwrap();
        session.set_search("no such thing");

        assert!(matches!(
            session.export(ExportFormat::Json, ExportScope::Matched),
            Err(TabviewError::EmptyData(_))
        ));
        assert!(matches!(
            session.clipboard_payload(),
            Err(TabviewError::EmptyData(_))
        ));
    }

    #[test]
    fn test_sample_dataset() {
        let mut session = session();
        let dataset = session.load_sample().unwrap();
        assert_eq!(dataset.identity(), "sample_data.csv");
        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.column_count(), 5);
    }
}
