//! Virtual table schema: the ordered set of columns a scan addresses

use crate::columns::StorageColumn;

/// Columns of one virtual table, in declaration order.
pub struct StorageSchema<'a> {
    columns: Vec<Box<dyn StorageColumn + 'a>>,
    primary_keys: Vec<String>,
    row_count: Option<u32>,
}

impl<'a> StorageSchema<'a> {
    /// Creates a schema from boxed columns
    pub fn new(columns: Vec<Box<dyn StorageColumn + 'a>>) -> Self {
        Self {
            columns,
            primary_keys: Vec::new(),
            row_count: None,
        }
    }

    /// Declares the primary key columns by name
    pub fn with_primary_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Fixes the row count instead of deriving it from column storage.
    ///
    /// Needed when no column is backed by storage (e.g. only id columns).
    pub fn with_row_count(mut self, rows: u32) -> Self {
        self.row_count = Some(rows);
        self
    }

    /// Number of rows a scan may visit.
    ///
    /// The shortest storage-backed column wins, so a scan never indexes past
    /// the end of any view.
    pub fn row_count(&self) -> u32 {
        let derived = self.columns.iter().filter_map(|c| c.row_count()).min();
        match (self.row_count, derived) {
            (Some(fixed), Some(derived)) => fixed.min(derived),
            (Some(fixed), None) => fixed,
            (None, Some(derived)) => derived,
            (None, None) => 0,
        }
    }

    /// Returns the column at `idx`
    pub fn column(&self, idx: usize) -> Option<&dyn StorageColumn> {
        self.columns.get(idx).map(|c| c.as_ref() as &dyn StorageColumn)
    }

    /// Returns the index of the column called `name`
    pub fn find(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates columns in declaration order
    pub fn columns(&self) -> impl Iterator<Item = &dyn StorageColumn> {
        self.columns.iter().map(|c| c.as_ref() as &dyn StorageColumn)
    }

    /// Names of columns not marked hidden
    pub fn visible_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| !c.hidden())
            .map(|c| c.name())
            .collect()
    }

    /// Declared primary key column names
    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    /// Renders the schema as a `CREATE TABLE` statement for the executor
    pub fn to_create_table_sql(&self, table: &str) -> String {
        let mut defs: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let mut def = format!("{} {}", c.name(), c.column_type().sql_type());
                if c.hidden() {
                    def.push_str(" HIDDEN");
                }
                def
            })
            .collect();

        if self.primary_keys.is_empty() {
            return format!("CREATE TABLE {}({});", table, defs.join(", "));
        }

        defs.push(format!("PRIMARY KEY({})", self.primary_keys.join(", ")));
        format!("CREATE TABLE {}({}) WITHOUT ROWID;", table, defs.join(", "))
    }
}
