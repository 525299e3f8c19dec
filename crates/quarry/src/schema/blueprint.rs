//! Table blueprints compiled to DDL.
//!
//! A [`Blueprint`] accumulates column definitions and table-level commands
//! for exactly one table, then compiles to a single `CREATE TABLE` or
//! `ALTER TABLE` statement depending on its [`Mode`]. The mode is fixed at
//! construction and never changes.
//!
//! Column-adding calls return a `&mut Column` handle; modifiers
//! (`nullable`, `default`, `unique`, `change`) are methods on that handle,
//! so each decoration targets an explicit column rather than an implicit
//! "last appended" slot.

/// Storage engine used for created tables.
pub const DEFAULT_ENGINE: &str = "InnoDB";
/// Character set used for created tables.
pub const DEFAULT_CHARSET: &str = "utf8mb4";

/// Blueprint mode, fixed for the blueprint's entire lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Alter,
}

/// Column base types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// `INT AUTO_INCREMENT PRIMARY KEY`
    Increments,
    /// `INT`
    Integer,
    /// `VARCHAR(n)`
    Varchar(u32),
    /// `TEXT`
    Text,
    /// `DATE`
    Date,
    /// `DATETIME`
    DateTime,
    /// `TIME`
    Time,
    /// `TINYINT(1)`
    Boolean,
}

impl ColumnType {
    fn sql(self) -> String {
        match self {
            ColumnType::Increments => "INT AUTO_INCREMENT PRIMARY KEY".to_string(),
            ColumnType::Integer => "INT".to_string(),
            ColumnType::Varchar(len) => format!("VARCHAR({len})"),
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::DateTime => "DATETIME".to_string(),
            ColumnType::Time => "TIME".to_string(),
            ColumnType::Boolean => "TINYINT(1)".to_string(),
        }
    }
}

/// Literal rendered after `DEFAULT`. Strings are single-quoted, everything
/// else renders bare (booleans as 1/0).
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl DefaultValue {
    fn render(&self) -> String {
        match self {
            DefaultValue::Int(i) => i.to_string(),
            DefaultValue::Float(f) => f.to_string(),
            DefaultValue::Bool(b) => i32::from(*b).to_string(),
            DefaultValue::Str(s) => format!("'{s}'"),
        }
    }
}

impl From<i32> for DefaultValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for DefaultValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for DefaultValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for DefaultValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for DefaultValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// One column definition under construction.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    ty: ColumnType,
    nullable: bool,
    default: Option<DefaultValue>,
    unique: bool,
    change: bool,
}

impl Column {
    fn new(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            nullable: false,
            default: None,
            unique: false,
            change: false,
        }
    }

    /// Mark the column as accepting NULL.
    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }

    /// Set the column default.
    pub fn default(&mut self, value: impl Into<DefaultValue>) -> &mut Self {
        self.default = Some(value.into());
        self
    }

    /// Add a UNIQUE constraint.
    pub fn unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    /// Render this column as `MODIFY COLUMN` instead of `ADD COLUMN` in an
    /// alter blueprint (redefine an existing column). No effect in create
    /// mode.
    pub fn change(&mut self) -> &mut Self {
        self.change = true;
        self
    }

    fn definition(&self) -> String {
        let mut sql = format!("`{}` {}", self.name, self.ty.sql());
        if self.nullable {
            sql.push_str(" NULL");
        }
        if let Some(default) = &self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.render());
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        sql
    }

    fn render(&self, mode: Mode) -> String {
        match mode {
            Mode::Create => self.definition(),
            Mode::Alter if self.change => format!("MODIFY COLUMN {}", self.definition()),
            Mode::Alter => format!("ADD COLUMN {}", self.definition()),
        }
    }
}

/// Table-level command, rendered after all column fragments.
#[derive(Debug, Clone)]
enum TableCommand {
    DropColumn(String),
    RenameColumn {
        from: String,
        to: String,
        definition: String,
    },
}

impl TableCommand {
    fn render(&self) -> String {
        match self {
            TableCommand::DropColumn(name) => format!("DROP COLUMN `{name}`"),
            // CHANGE COLUMN works on both MySQL 5.7 and 8.0; it requires
            // the full column definition.
            TableCommand::RenameColumn {
                from,
                to,
                definition,
            } => format!("CHANGE COLUMN `{from}` `{to}` {definition}"),
        }
    }
}

/// Column/command accumulator for one table.
#[derive(Debug, Clone)]
pub struct Blueprint {
    table: String,
    mode: Mode,
    columns: Vec<Column>,
    commands: Vec<TableCommand>,
}

impl Blueprint {
    /// Create a blueprint for the given table in the given mode.
    pub fn new(table: &str, mode: Mode) -> Self {
        Self {
            table: table.to_string(),
            mode,
            columns: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// The blueprint's mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn add_column(&mut self, name: &str, ty: ColumnType) -> &mut Column {
        self.columns.push(Column::new(name, ty));
        self.columns.last_mut().expect("column just pushed")
    }

    // ==================== Column definitions ====================

    /// Auto-increment primary key named `id`.
    pub fn id(&mut self) -> &mut Column {
        self.increments("id")
    }

    /// Auto-increment primary key with a custom name.
    pub fn increments(&mut self, name: &str) -> &mut Column {
        self.add_column(name, ColumnType::Increments)
    }

    /// `INT` column.
    pub fn integer(&mut self, name: &str) -> &mut Column {
        self.add_column(name, ColumnType::Integer)
    }

    /// `VARCHAR(255)` column.
    pub fn string(&mut self, name: &str) -> &mut Column {
        self.varchar(name, 255)
    }

    /// `VARCHAR(len)` column.
    pub fn varchar(&mut self, name: &str, len: u32) -> &mut Column {
        self.add_column(name, ColumnType::Varchar(len))
    }

    /// `TEXT` column.
    pub fn text(&mut self, name: &str) -> &mut Column {
        self.add_column(name, ColumnType::Text)
    }

    /// `DATE` column.
    pub fn date(&mut self, name: &str) -> &mut Column {
        self.add_column(name, ColumnType::Date)
    }

    /// `DATETIME` column.
    pub fn datetime(&mut self, name: &str) -> &mut Column {
        self.add_column(name, ColumnType::DateTime)
    }

    /// `TIME` column.
    pub fn time(&mut self, name: &str) -> &mut Column {
        self.add_column(name, ColumnType::Time)
    }

    /// `TINYINT(1)` column.
    pub fn boolean(&mut self, name: &str) -> &mut Column {
        self.add_column(name, ColumnType::Boolean)
    }

    /// Bookkeeping columns: `created_at`, `created_by`, `updated_at`,
    /// `updated_by` (unix-time INTs defaulting to 0).
    pub fn timestamps(&mut self) {
        for name in ["created_at", "created_by", "updated_at", "updated_by"] {
            self.integer(name).default(0);
        }
    }

    /// Soft-delete columns: `deleted_at`, `deleted_by`.
    pub fn soft_delete(&mut self) {
        for name in ["deleted_at", "deleted_by"] {
            self.integer(name).default(0);
        }
    }

    // ==================== Table commands ====================

    /// Drop a column.
    pub fn drop_column(&mut self, name: &str) -> &mut Self {
        self.commands.push(TableCommand::DropColumn(name.to_string()));
        self
    }

    /// Rename a column. MySQL needs the full column definition here
    /// (e.g. `"VARCHAR(255) NOT NULL"`).
    pub fn rename_column(&mut self, from: &str, to: &str, definition: &str) -> &mut Self {
        self.commands.push(TableCommand::RenameColumn {
            from: from.to_string(),
            to: to.to_string(),
            definition: definition.to_string(),
        });
        self
    }

    // ==================== SQL generation ====================

    /// Compile the accumulated description into one DDL statement.
    ///
    /// Create mode always yields a statement. Alter mode yields `None` when
    /// nothing was accumulated so that an empty `ALTER TABLE` is never
    /// emitted.
    pub fn build(&self) -> Option<String> {
        match self.mode {
            Mode::Create => {
                let cols: Vec<String> =
                    self.columns.iter().map(|c| c.render(Mode::Create)).collect();
                Some(format!(
                    "CREATE TABLE IF NOT EXISTS `{}` ({}) ENGINE={} DEFAULT CHARSET={};",
                    self.table,
                    cols.join(", "),
                    DEFAULT_ENGINE,
                    DEFAULT_CHARSET
                ))
            }
            Mode::Alter => {
                let mut parts: Vec<String> =
                    self.columns.iter().map(|c| c.render(Mode::Alter)).collect();
                parts.extend(self.commands.iter().map(TableCommand::render));

                if parts.is_empty() {
                    return None;
                }
                Some(format!(
                    "ALTER TABLE `{}` {};",
                    self.table,
                    parts.join(", ")
                ))
            }
        }
    }
}
