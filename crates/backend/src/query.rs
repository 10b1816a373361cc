//! Table reads expressed as PostgREST query parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The backend tables this client touches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Table {
    Profiles,
    Students,
    Teachers,
    Classes,
    Attendance,
    AttendanceSessions,
    Tests,
    TestResults,
    Events,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Profiles => "profiles",
            Table::Students => "students",
            Table::Teachers => "teachers",
            Table::Classes => "classes",
            Table::Attendance => "attendance",
            Table::AttendanceSessions => "attendance_sessions",
            Table::Tests => "tests",
            Table::TestResults => "test_results",
            Table::Events => "events",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "profiles" => Some(Table::Profiles),
            "students" => Some(Table::Students),
            "teachers" => Some(Table::Teachers),
            "classes" => Some(Table::Classes),
            "attendance" => Some(Table::Attendance),
            "attendance_sessions" => Some(Table::AttendanceSessions),
            "tests" => Some(Table::Tests),
            "test_results" => Some(Table::TestResults),
            "events" => Some(Table::Events),
            _ => None,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
}

impl FilterOp {
    fn prefix(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Gte => "gte",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// A read (or update target) against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub table: Table,
    pub select: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    /// `select=*` over the whole table.
    pub fn table(table: Table) -> Self {
        Self {
            table,
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = columns.into();
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            op: FilterOp::Eq,
            value: value.into(),
        });
        self
    }

    pub fn gte(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            op: FilterOp::Gte,
            value: value.into(),
        });
        self
    }

    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Tables embedded through `name(*)` in the select list.
    pub fn embedded(&self) -> Vec<Table> {
        self.select
            .split(',')
            .filter_map(|part| {
                let part = part.trim();
                let name = part.strip_suffix("(*)")?;
                Table::parse(name.trim())
            })
            .collect()
    }

    /// Filters only, for use as an update target.
    pub fn filter_pairs(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .map(|f| (f.column.clone(), format!("{}.{}", f.op.prefix(), f.value)))
            .collect()
    }

    /// Full query string pairs in PostgREST form.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select.clone())];
        pairs.extend(self.filter_pairs());
        if let Some(order) = &self.order {
            let dir = if order.ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{}.{dir}", order.column)));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}
