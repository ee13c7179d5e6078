use crate::config::{ColumnDef, ConfigError, VisibilityRules};
use crate::domain::Category;

/// Marks every column whose field is not listed for `category` as hidden.
/// Column order is preserved.
pub fn apply_visibility(
    columns: &[ColumnDef],
    category: Category,
    rules: &VisibilityRules,
) -> Result<Vec<ColumnDef>, ConfigError> {
    let visible = rules.visible_fields(category)?;
    Ok(columns
        .iter()
        .map(|column| ColumnDef {
            hidden: !visible.contains(column.field),
            ..column.clone()
        })
        .collect())
}

/// Holds the column set currently shown by the table.
pub struct ColumnVisibility {
    definitions: Vec<ColumnDef>,
    rules: VisibilityRules,
    category: Option<Category>,
    columns: Vec<ColumnDef>,
}

impl ColumnVisibility {
    pub fn new(definitions: Vec<ColumnDef>, rules: VisibilityRules) -> Self {
        Self {
            columns: definitions.clone(),
            definitions,
            rules,
            category: None,
        }
    }

    /// Recomputes the column set from scratch. An unconfigured category hides
    /// every column rather than showing all of them.
    pub fn on_category_changed(&mut self, category: Category) -> Result<&[ColumnDef], ConfigError> {
        self.category = Some(category);
        match apply_visibility(&self.definitions, category, &self.rules) {
            Ok(columns) => {
                self.columns = columns;
                Ok(&self.columns)
            }
            Err(e) => {
                self.columns = self
                    .definitions
                    .iter()
                    .map(|column| ColumnDef {
                        hidden: true,
                        ..column.clone()
                    })
                    .collect();
                Err(e)
            }
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| !c.hidden)
    }
}
